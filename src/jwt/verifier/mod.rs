mod builder;
mod firebase;
mod helpers;


pub use builder::FirebaseJwtVerifierBuilder;
pub use firebase::FirebaseJwtVerifier;
