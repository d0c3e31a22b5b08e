use jsonwebtoken::errors::ErrorKind;

pub(crate) const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing \"kid\" parameter in jwt header")]
    MissingKid,
    #[error("failed to fetch public keys: {0}")]
    KeyFetch(String),
    #[error("public key not found for kid: {0}")]
    KeyNotFound(String),
    #[error("failed to import public key for kid: {kid}")]
    KeyImport {
        kid: String,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid claim {claim}: {message}")]
    InvalidClaim { claim: String, message: String },
}

impl Error {
    /// Returns the underlying `jsonwebtoken` error kind for signature and
    /// standard claim failures.
    pub fn jwt_kind(&self) -> Option<&ErrorKind> {
        match self {
            Error::Jwt(err) => Some(err.kind()),
            _ => None,
        }
    }

    pub(crate) fn invalid_claim(claim: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidClaim {
            claim: claim.into(),
            message: message.into(),
        }
    }
}

/// Reads at most `limit` bytes of the response body.
pub(crate) async fn read_body_with_limit_async(
    resp: &mut reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, Error> {
    let mut body = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        let remaining = limit.saturating_sub(body.len());
        if chunk.len() > remaining {
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
