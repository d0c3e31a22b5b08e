use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::constants::{
    GOOGLE_IDENTITYTOOLKIT_PUBLIC_KEYS_URL, GOOGLE_PUBLIC_KEYS_URL, ID_TOKEN_ISSUER_PREFIX,
    SESSION_TOKEN_ISSUER_PREFIX,
};

#[derive(Debug, Clone)]
pub(crate) struct JwtHeader {
    pub(crate) alg: String,
    pub(crate) kid: Option<String>,
}

/// The two token variants issued by Firebase Authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    IdToken,
    SessionToken,
}

impl TokenKind {
    /// Expected `iss` claim for tokens of this kind in `project_id`.
    pub fn issuer(self, project_id: &str) -> String {
        match self {
            TokenKind::IdToken => format!("{ID_TOKEN_ISSUER_PREFIX}{project_id}"),
            TokenKind::SessionToken => format!("{SESSION_TOKEN_ISSUER_PREFIX}{project_id}"),
        }
    }

    /// Well-known endpoint serving the signing certificates for this kind.
    pub fn keys_url(self) -> &'static str {
        match self {
            TokenKind::IdToken => GOOGLE_PUBLIC_KEYS_URL,
            TokenKind::SessionToken => GOOGLE_IDENTITYTOOLKIT_PUBLIC_KEYS_URL,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IdToken => f.write_str("id token"),
            TokenKind::SessionToken => f.write_str("session token"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierOptions {
    pub project_id: String,
    /// When set, `firebase.tenant` must match exactly.
    pub tenant_id: Option<String>,
    /// Clock skew tolerated on `exp` and `nbf`, in seconds.
    pub leeway: u64,
}

impl VerifierOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            tenant_id: None,
            leeway: 0,
        }
    }

    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        let tenant_id = tenant_id.into();
        self.tenant_id = (!tenant_id.is_empty()).then_some(tenant_id);
        self
    }

    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Multiple(auds) => auds.iter().any(|aud| aud == audience),
        }
    }
}

/// Verified claims of a Firebase ID token or session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirebaseClaims {
    pub aud: Audience,
    /// Time the end user originally authenticated, in seconds since the epoch.
    ///
    /// Unlike `iat`, this stays the same across token refreshes within one
    /// sign-in session.
    #[serde(deserialize_with = "numeric_date")]
    pub auth_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(deserialize_with = "numeric_date")]
    pub exp: u64,
    pub firebase: FirebaseInfo,
    #[serde(deserialize_with = "numeric_date")]
    pub iat: u64,
    pub iss: String,
    pub sub: String,
    /// Copy of `sub`, set after verification for parity with the Firebase Admin SDK.
    #[serde(default)]
    pub uid: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The reserved `firebase` claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirebaseInfo {
    #[serde(default)]
    pub identities: Map<String, Value>,
    /// e.g. `password`, `google.com`, `phone`, `anonymous`, `custom`,
    /// or an `oidc.`/`saml.` prefixed provider id.
    pub sign_in_provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_in_second_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_factor_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts JSON integers and non-negative finite floats as seconds since the epoch.
///
/// Fractions round up, so `exp <= now` on whole seconds agrees with the raw value.
pub(crate) fn numeric_date<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumericDate;

    impl<'de> serde::de::Visitor<'de> for NumericDate {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a numeric value representable as u64")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.is_finite() && value >= 0.0 && value < (u64::MAX as f64) {
                Ok(value.ceil() as u64)
            } else {
                Err(E::custom("numeric value must be representable as u64"))
            }
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u64::try_from(value).map_err(|_| E::custom("numeric value must not be negative"))
        }
    }

    deserializer.deserialize_any(NumericDate)
}
