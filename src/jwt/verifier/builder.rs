use crate::error::Error;
use reqwest::Client as AsyncHttpClient;
use std::sync::Arc;
use std::time::Duration;

use super::firebase::FirebaseJwtVerifier;
use crate::client_defaults::DEFAULT_TIMEOUT;
use crate::jwt::clock::{Clock, SystemClock};
use crate::jwt::keys::{HttpKeyFetcher, KeyProvider, KeyResolver};
use crate::jwt::types::{TokenKind, VerifierOptions};

pub struct FirebaseJwtVerifierBuilder {
    options: VerifierOptions,
    id_token_keys_url: String,
    session_keys_url: String,
    id_token_keys: Option<Arc<dyn KeyResolver>>,
    session_token_keys: Option<Arc<dyn KeyResolver>>,
    http: Option<AsyncHttpClient>,
    timeout: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl FirebaseJwtVerifierBuilder {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self::from_options(VerifierOptions::new(project_id))
    }

    pub fn from_options(options: VerifierOptions) -> Self {
        Self {
            options,
            id_token_keys_url: TokenKind::IdToken.keys_url().to_string(),
            session_keys_url: TokenKind::SessionToken.keys_url().to_string(),
            id_token_keys: None,
            session_token_keys: None,
            http: None,
            timeout: Some(DEFAULT_TIMEOUT),
            clock: Arc::new(SystemClock),
        }
    }

    /// Requires `firebase.tenant` to equal `tenant_id`. An empty id disables the check.
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.options = self.options.with_tenant_id(tenant_id);
        self
    }

    /// Clock skew tolerated on `exp` and `nbf`. Defaults to zero.
    pub fn leeway(mut self, leeway: Duration) -> Self {
        self.options = self.options.with_leeway(leeway.as_secs());
        self
    }

    /// Timeout applied to each key set request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn http_client(mut self, http: AsyncHttpClient) -> Self {
        self.http = Some(http);
        self
    }

    pub fn id_token_keys_url(mut self, url: impl Into<String>) -> Self {
        self.id_token_keys_url = url.into();
        self
    }

    pub fn session_keys_url(mut self, url: impl Into<String>) -> Self {
        self.session_keys_url = url.into();
        self
    }

    /// Replaces the ID token key provider; the ID token URL is then unused.
    pub fn id_token_key_resolver(mut self, resolver: Arc<dyn KeyResolver>) -> Self {
        self.id_token_keys = Some(resolver);
        self
    }

    /// Replaces the session cookie key provider; the session URL is then unused.
    pub fn session_key_resolver(mut self, resolver: Arc<dyn KeyResolver>) -> Self {
        self.session_token_keys = Some(resolver);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(mut self) -> Result<FirebaseJwtVerifier, Error> {
        if self.options.project_id.trim().is_empty() {
            return Err(Error::Config("project id must not be empty".to_string()));
        }
        let id_token_keys = match self.id_token_keys.take() {
            Some(resolver) => resolver,
            None => self.key_provider(&self.id_token_keys_url)?,
        };
        let session_token_keys = match self.session_token_keys.take() {
            Some(resolver) => resolver,
            None => self.key_provider(&self.session_keys_url)?,
        };
        Ok(FirebaseJwtVerifier {
            options: self.options,
            id_token_keys,
            session_token_keys,
            clock: self.clock,
        })
    }

    fn key_provider(&self, url: &str) -> Result<Arc<dyn KeyResolver>, Error> {
        let mut fetcher = HttpKeyFetcher::new(url)?;
        if let Some(http) = &self.http {
            fetcher = fetcher.with_http_client(http.clone());
        }
        fetcher = match self.timeout {
            Some(timeout) => fetcher.with_timeout(timeout),
            None => fetcher.without_timeout(),
        };
        Ok(Arc::new(KeyProvider::with_fetcher(fetcher)))
    }
}
