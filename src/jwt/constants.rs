use jsonwebtoken::Algorithm;

/// X.509 certificates used to sign Firebase ID tokens.
pub const GOOGLE_PUBLIC_KEYS_URL: &str =
    "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";
/// X.509 certificates used to sign Firebase session cookies.
pub const GOOGLE_IDENTITYTOOLKIT_PUBLIC_KEYS_URL: &str =
    "https://www.googleapis.com/identitytoolkit/v3/relyingparty/publicKeys";

pub(crate) const ID_TOKEN_ISSUER_PREFIX: &str = "https://securetoken.google.com/";
pub(crate) const SESSION_TOKEN_ISSUER_PREFIX: &str = "https://session.firebase.google.com/";

pub(crate) const FIREBASE_ALG: Algorithm = Algorithm::RS256;
pub(crate) const REQUIRED_CLAIMS: &[&str] =
    &["exp", "iat", "aud", "iss", "sub", "auth_time", "firebase"];
pub(crate) const TENANT_CLAIM_PATH: &str = "firebase.tenant";
pub(crate) const SIGN_IN_PROVIDER_CLAIM_PATH: &str = "firebase.sign_in_provider";
pub(crate) const IDENTITIES_CLAIM_PATH: &str = "firebase.identities";

// Google's key sets hold a handful of certificates; anything near this is not a key set.
pub(crate) const MAX_KEY_SET_BYTES: usize = 1024 * 1024;
