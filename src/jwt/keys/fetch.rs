use crate::client_defaults::DEFAULT_TIMEOUT;
use crate::error::{read_body_with_limit_async, Error, MAX_ERROR_BODY_BYTES};
use crate::jwt::constants::MAX_KEY_SET_BYTES;
use async_trait::async_trait;
use log::debug;
use reqwest::Client as AsyncHttpClient;
use std::fmt;
use std::time::Duration;
use url::Url;

use super::sanitize::{key_set_from_slice, redact_url, sanitize_error_body, RawKeySet};

/// Retrieves a complete key set from its source.
#[async_trait]
pub trait KeyFetcher: Send + Sync + fmt::Debug {
    async fn fetch(&self) -> Result<RawKeySet, Error>;
}

/// Fetches a key set with an unauthenticated HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpKeyFetcher {
    url: Url,
    http: AsyncHttpClient,
    timeout: Option<Duration>,
}

impl HttpKeyFetcher {
    pub fn new(url: impl AsRef<str>) -> Result<Self, Error> {
        let url = Url::parse(url.as_ref())?;
        let http = AsyncHttpClient::builder().build()?;
        Ok(Self {
            url,
            http,
            timeout: Some(DEFAULT_TIMEOUT),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_http_client(mut self, http: AsyncHttpClient) -> Self {
        self.http = http;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl KeyFetcher for HttpKeyFetcher {
    async fn fetch(&self) -> Result<RawKeySet, Error> {
        let redacted = redact_url(&self.url);
        debug!("fetching public keys from {redacted}");
        let mut req = self.http.get(self.url.clone());
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let mut resp = req
            .send()
            .await
            .map_err(|err| Error::KeyFetch(format!("uri {redacted}: {err}")))?;
        let status = resp.status();
        if !status.is_success() {
            let body = read_body_with_limit_async(&mut resp, MAX_ERROR_BODY_BYTES)
                .await
                .unwrap_or_default();
            let body_preview = sanitize_error_body(&body);
            return Err(Error::KeyFetch(if body_preview.is_empty() {
                format!("uri {redacted} status {status}")
            } else {
                format!("uri {redacted} status {status} body_preview {body_preview}")
            }));
        }
        let body = read_body_with_limit_async(&mut resp, MAX_KEY_SET_BYTES + 1)
            .await
            .map_err(|err| Error::KeyFetch(format!("uri {redacted}: {err}")))?;
        if body.len() > MAX_KEY_SET_BYTES {
            return Err(Error::KeyFetch(format!(
                "uri {redacted}: key set exceeds {MAX_KEY_SET_BYTES} bytes"
            )));
        }
        key_set_from_slice(&body)
            .map_err(|err| Error::KeyFetch(format!("uri {redacted}: invalid key set: {err}")))
    }
}
