#![forbid(unsafe_code)]

mod client_defaults;
mod error;
mod jwt;

pub use error::Error;

pub use jwt::{
    key_set_from_slice, Audience, Clock, FirebaseClaims, FirebaseInfo, FirebaseJwtVerifier,
    FirebaseJwtVerifierBuilder, FixedClock, HttpKeyFetcher, KeyFetcher, KeyImporter, KeyProvider,
    KeyResolver, PemKeyImporter, RawKeySet, StaticKeyResolver, SystemClock, TokenKind,
    VerifierOptions, GOOGLE_IDENTITYTOOLKIT_PUBLIC_KEYS_URL, GOOGLE_PUBLIC_KEYS_URL,
};
