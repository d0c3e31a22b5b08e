use crate::error::Error;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::import::{KeyImporter, PemKeyImporter};

/// Resolves the `kid` and `alg` of a token header to a verification key.
#[async_trait]
pub trait KeyResolver: Send + Sync {
    async fn resolve(&self, kid: &str, alg: Algorithm) -> Result<Arc<DecodingKey>, Error>;
}

/// Fixed in-memory key map that never fetches.
#[derive(Clone, Default)]
pub struct StaticKeyResolver {
    keys: HashMap<String, Arc<DecodingKey>>,
}

impl StaticKeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, kid: impl Into<String>, key: DecodingKey) -> Self {
        self.keys.insert(kid.into(), Arc::new(key));
        self
    }

    /// Adds an RSA public key or certificate in PEM form.
    pub fn with_rsa_pem(self, kid: impl Into<String>, pem: &str) -> Result<Self, Error> {
        let kid = kid.into();
        let key = PemKeyImporter
            .import(pem, Algorithm::RS256)
            .map_err(|source| Error::KeyImport {
                kid: kid.clone(),
                source,
            })?;
        Ok(self.with_key(kid, key))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for StaticKeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticKeyResolver")
            .field("kids", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl KeyResolver for StaticKeyResolver {
    async fn resolve(&self, kid: &str, _alg: Algorithm) -> Result<Arc<DecodingKey>, Error> {
        self.keys
            .get(kid)
            .cloned()
            .ok_or_else(|| Error::KeyNotFound(kid.to_string()))
    }
}
