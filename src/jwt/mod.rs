mod clock;
mod constants;
mod keys;
mod types;
mod verifier;


pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::{GOOGLE_IDENTITYTOOLKIT_PUBLIC_KEYS_URL, GOOGLE_PUBLIC_KEYS_URL};
pub use keys::{
    key_set_from_slice, HttpKeyFetcher, KeyFetcher, KeyImporter, KeyProvider, KeyResolver,
    PemKeyImporter, RawKeySet, StaticKeyResolver,
};
pub use types::{Audience, FirebaseClaims, FirebaseInfo, TokenKind, VerifierOptions};
pub use verifier::{FirebaseJwtVerifier, FirebaseJwtVerifierBuilder};
