use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey};

/// Turns a PEM-encoded key from a key set into a verification key.
pub trait KeyImporter: Send + Sync {
    fn import(&self, pem: &str, alg: Algorithm) -> Result<DecodingKey, JwtError>;
}

/// Imports PEM public keys and X.509 certificates for the family of `alg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PemKeyImporter;

impl KeyImporter for PemKeyImporter {
    fn import(&self, pem: &str, alg: Algorithm) -> Result<DecodingKey, JwtError> {
        match alg {
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => DecodingKey::from_rsa_pem(pem.as_bytes()),
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem.as_bytes()),
            Algorithm::EdDSA => DecodingKey::from_ed_pem(pem.as_bytes()),
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                Err(ErrorKind::InvalidAlgorithm.into())
            }
        }
    }
}
