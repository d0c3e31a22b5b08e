use crate::error::Error;
use jsonwebtoken::{decode, Algorithm, Validation};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::builder::FirebaseJwtVerifierBuilder;
use super::helpers::{
    decode_jwt_header, jwt_json_error, split_jwt, validate_claims, ClaimsPolicy,
};
use crate::jwt::clock::Clock;
use crate::jwt::constants::{FIREBASE_ALG, TENANT_CLAIM_PATH};
use crate::jwt::keys::KeyResolver;
use crate::jwt::types::{FirebaseClaims, TokenKind, VerifierOptions};

/// Verifies Firebase ID tokens and session cookies for one project.
///
/// Each token kind has its own key resolver; by default these are
/// [`KeyProvider`](crate::KeyProvider)s bound to Google's certificate endpoints.
pub struct FirebaseJwtVerifier {
    pub(super) options: VerifierOptions,
    pub(super) id_token_keys: Arc<dyn KeyResolver>,
    pub(super) session_token_keys: Arc<dyn KeyResolver>,
    pub(super) clock: Arc<dyn Clock>,
}

impl FirebaseJwtVerifier {
    /// Creates a verifier for `project_id` with default endpoints and no tenant restriction.
    pub fn new(project_id: impl Into<String>) -> Result<Self, Error> {
        Self::builder(project_id).build()
    }

    pub fn builder(project_id: impl Into<String>) -> FirebaseJwtVerifierBuilder {
        FirebaseJwtVerifierBuilder::new(project_id)
    }

    pub fn options(&self) -> &VerifierOptions {
        &self.options
    }

    /// Verifies a Firebase ID token.
    pub async fn verify_id_token(&self, token: &str) -> Result<FirebaseClaims, Error> {
        self.verify(token, TokenKind::IdToken).await
    }

    /// Verifies a Firebase session cookie.
    pub async fn verify_session_token(&self, token: &str) -> Result<FirebaseClaims, Error> {
        self.verify(token, TokenKind::SessionToken).await
    }

    pub async fn verify(&self, token: &str, kind: TokenKind) -> Result<FirebaseClaims, Error> {
        let project_id = self.options.project_id.as_str();
        let issuer = kind.issuer(project_id);
        let keys = match kind {
            TokenKind::IdToken => self.id_token_keys.as_ref(),
            TokenKind::SessionToken => self.session_token_keys.as_ref(),
        };
        self.verify_with(token, keys, &issuer, project_id).await
    }

    async fn verify_with(
        &self,
        token: &str,
        keys: &dyn KeyResolver,
        issuer: &str,
        audience: &str,
    ) -> Result<FirebaseClaims, Error> {
        let header = decode_jwt_header(split_jwt(token)?)?;
        let alg = Algorithm::from_str(&header.alg)
            .map_err(|_| Error::UnsupportedAlg(header.alg.clone()))?;
        if alg != FIREBASE_ALG {
            return Err(Error::UnsupportedAlg(header.alg));
        }
        let kid = header.kid.as_deref().ok_or(Error::MissingKid)?;
        let key = keys.resolve(kid, alg).await?;

        // Only the signature is checked here; claims are validated against the injected clock.
        let mut validation = Validation::new(FIREBASE_ALG);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        let token_data = decode::<Value>(token, &key, &validation)?;

        let policy = ClaimsPolicy {
            issuer,
            audience,
            now: self.clock.now(),
            leeway: self.options.leeway,
        };
        validate_claims(&token_data.claims, &policy)?;

        // `uid` is derived from `sub`; whatever the payload carries is discarded.
        let mut payload = token_data.claims;
        if let Some(object) = payload.as_object_mut() {
            object.remove("uid");
        }
        let mut claims: FirebaseClaims =
            serde_json::from_value(payload).map_err(jwt_json_error)?;
        if let Some(tenant_id) = self.options.tenant_id.as_deref() {
            if claims.firebase.tenant.as_deref() != Some(tenant_id) {
                return Err(Error::invalid_claim(TENANT_CLAIM_PATH, "invalid tenant id"));
            }
        }
        claims.uid = claims.sub.clone();
        Ok(claims)
    }
}

impl fmt::Debug for FirebaseJwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseJwtVerifier")
            .field("options", &self.options)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
