use crate::error::Error;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, RwLock as AsyncRwLock};

use super::fetch::{HttpKeyFetcher, KeyFetcher};
use super::import::{KeyImporter, PemKeyImporter};
use super::resolver::KeyResolver;
use super::sanitize::RawKeySet;

#[derive(Clone)]
pub(crate) enum KeyEntry {
    Raw(String),
    Imported(Arc<DecodingKey>),
}

impl fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEntry::Raw(_) => f.write_str("Raw"),
            KeyEntry::Imported(_) => f.write_str("Imported"),
        }
    }
}

pub(crate) type KeySet = HashMap<String, KeyEntry>;

/// Caches the key set of one signing authority and refetches it whole on a `kid` miss.
///
/// There is no expiry: an unknown `kid` is the only refresh trigger, and every
/// refresh replaces the cached set, including keys that were already imported.
/// Entries are imported lazily on first use and stay imported.
pub struct KeyProvider {
    fetcher: Arc<dyn KeyFetcher>,
    importer: Arc<dyn KeyImporter>,
    pub(super) cache: AsyncRwLock<KeySet>,
    fetch_lock: AsyncMutex<()>,
}

impl KeyProvider {
    /// Creates a provider fetching from `url` over HTTP.
    pub fn new(url: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Self::with_fetcher(HttpKeyFetcher::new(url)?))
    }

    /// Creates a provider fetching from `url` with the given request timeout.
    pub fn with_timeout(url: impl AsRef<str>, timeout: Duration) -> Result<Self, Error> {
        Ok(Self::with_fetcher(
            HttpKeyFetcher::new(url)?.with_timeout(timeout),
        ))
    }

    pub fn with_fetcher(fetcher: impl KeyFetcher + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            importer: Arc::new(PemKeyImporter),
            cache: AsyncRwLock::new(KeySet::new()),
            fetch_lock: AsyncMutex::new(()),
        }
    }

    pub fn with_importer(mut self, importer: impl KeyImporter + 'static) -> Self {
        self.importer = Arc::new(importer);
        self
    }

    /// Seeds the cache with a key set, as if it had just been fetched.
    pub fn with_preloaded(self, keys: RawKeySet) -> Self {
        let mut this = self;
        this.cache = AsyncRwLock::new(raw_entries(keys));
        this
    }

    /// Fetches the key set and replaces the cache with it.
    pub async fn refresh(&self) -> Result<(), Error> {
        let _guard = self.fetch_lock.lock().await;
        self.refresh_locked().await
    }

    /// Key ids currently cached.
    pub async fn key_ids(&self) -> Vec<String> {
        let mut kids: Vec<String> = self.cache.read().await.keys().cloned().collect();
        kids.sort();
        kids
    }

    pub async fn get_key(&self, kid: &str, alg: Algorithm) -> Result<Arc<DecodingKey>, Error> {
        {
            let cache = self.cache.read().await;
            if let Some(KeyEntry::Imported(key)) = cache.get(kid) {
                return Ok(Arc::clone(key));
            }
        }

        if !self.cache.read().await.contains_key(kid) {
            let _guard = self.fetch_lock.lock().await;
            // Another caller may have refreshed while this one waited.
            if !self.cache.read().await.contains_key(kid) {
                self.refresh_locked().await?;
            }
        }

        let mut cache = self.cache.write().await;
        let Some(entry) = cache.get_mut(kid) else {
            return Err(Error::KeyNotFound(kid.to_string()));
        };
        let key = match entry {
            KeyEntry::Imported(key) => return Ok(Arc::clone(key)),
            KeyEntry::Raw(pem) => {
                let key = self
                    .importer
                    .import(pem, alg)
                    .map_err(|source| Error::KeyImport {
                        kid: kid.to_string(),
                        source,
                    })?;
                Arc::new(key)
            }
        };
        debug!("imported public key; kid={kid}, alg={alg:?}");
        *entry = KeyEntry::Imported(Arc::clone(&key));
        Ok(key)
    }

    async fn refresh_locked(&self) -> Result<(), Error> {
        let keys = self.fetcher.fetch().await.map_err(|err| {
            warn!("public key fetch failed: {err}");
            match err {
                Error::KeyFetch(_) => err,
                other => Error::KeyFetch(other.to_string()),
            }
        })?;
        debug!("fetched {} public keys", keys.len());
        *self.cache.write().await = raw_entries(keys);
        Ok(())
    }
}

impl fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyProvider")
            .field("fetcher", &self.fetcher)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KeyResolver for KeyProvider {
    async fn resolve(&self, kid: &str, alg: Algorithm) -> Result<Arc<DecodingKey>, Error> {
        self.get_key(kid, alg).await
    }
}

fn raw_entries(keys: RawKeySet) -> KeySet {
    keys.into_iter()
        .map(|(kid, pem)| (kid, KeyEntry::Raw(pem)))
        .collect()
}
