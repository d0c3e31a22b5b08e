mod fetch;
mod import;
mod provider;
mod resolver;
mod sanitize;


pub use fetch::{HttpKeyFetcher, KeyFetcher};
pub use import::{KeyImporter, PemKeyImporter};
pub use provider::KeyProvider;
pub use resolver::{KeyResolver, StaticKeyResolver};
pub use sanitize::{key_set_from_slice, RawKeySet};
