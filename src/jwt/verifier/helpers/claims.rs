use crate::error::Error;
use jsonwebtoken::errors::ErrorKind;
use serde_json::{Map, Value};

use super::errors::{jwt_error, jwt_json_error};
use crate::jwt::constants::{
    IDENTITIES_CLAIM_PATH, REQUIRED_CLAIMS, SIGN_IN_PROVIDER_CLAIM_PATH, TENANT_CLAIM_PATH,
};
use crate::jwt::types::{numeric_date, Audience};

pub(in crate::jwt::verifier) struct ClaimsPolicy<'a> {
    pub(in crate::jwt::verifier) issuer: &'a str,
    pub(in crate::jwt::verifier) audience: &'a str,
    pub(in crate::jwt::verifier) now: u64,
    pub(in crate::jwt::verifier) leeway: u64,
}

#[derive(serde::Deserialize)]
struct ClaimsForValidation {
    #[serde(deserialize_with = "numeric_type", default)]
    exp: TryParse<u64>,
    #[serde(deserialize_with = "numeric_type", default)]
    nbf: TryParse<u64>,
    #[serde(deserialize_with = "numeric_type", default)]
    iat: TryParse<u64>,
    #[serde(deserialize_with = "numeric_type", default)]
    auth_time: TryParse<u64>,
    #[serde(default)]
    sub: TryParse<String>,
    #[serde(default)]
    iss: TryParse<String>,
    #[serde(default)]
    aud: TryParse<Audience>,
    #[serde(default)]
    firebase: TryParse<Map<String, Value>>,
}

#[derive(Debug, Default)]
enum TryParse<T> {
    Parsed(T),
    FailedToParse,
    #[default]
    NotPresent,
}

impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for TryParse<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer) {
            Ok(Some(value)) => TryParse::Parsed(value),
            Ok(None) => TryParse::NotPresent,
            Err(_) => TryParse::FailedToParse,
        })
    }
}

impl<T> TryParse<T> {
    fn require(self, claim: &str, message: &str) -> Result<T, Error> {
        match self {
            TryParse::Parsed(value) => Ok(value),
            _ => Err(Error::invalid_claim(claim, message)),
        }
    }
}

/// Checks that every required claim is present, then issuer, subject,
/// audience, `iat`, `nbf`, `exp`, `auth_time`, `firebase` and the optional
/// typed claims in that order.
pub(in crate::jwt::verifier) fn validate_claims(
    claims: &Value,
    policy: &ClaimsPolicy<'_>,
) -> Result<(), Error> {
    let Some(object) = claims.as_object() else {
        return Err(jwt_error(ErrorKind::InvalidToken));
    };
    for required_claim in REQUIRED_CLAIMS {
        if !object.contains_key(*required_claim) {
            return Err(jwt_error(ErrorKind::MissingRequiredClaim(
                required_claim.to_string(),
            )));
        }
    }

    let claims: ClaimsForValidation =
        serde::Deserialize::deserialize(claims).map_err(jwt_json_error)?;

    let iss = claims.iss.require("iss", "claim must be a string")?;
    if iss != policy.issuer {
        return Err(jwt_error(ErrorKind::InvalidIssuer));
    }

    claims.sub.require("sub", "claim must be a string")?;

    let aud = claims
        .aud
        .require("aud", "claim must be a string or an array of strings")?;
    if !aud.contains(policy.audience) {
        return Err(jwt_error(ErrorKind::InvalidAudience));
    }

    claims.iat.require("iat", "claim must be a number")?;

    match claims.nbf {
        TryParse::Parsed(nbf) if nbf > policy.now.saturating_add(policy.leeway) => {
            return Err(jwt_error(ErrorKind::ImmatureSignature));
        }
        TryParse::FailedToParse => {
            return Err(Error::invalid_claim("nbf", "claim must be a number"));
        }
        _ => {}
    }

    let exp = claims.exp.require("exp", "claim must be a number")?;
    if exp <= policy.now.saturating_sub(policy.leeway) {
        return Err(jwt_error(ErrorKind::ExpiredSignature));
    }

    claims
        .auth_time
        .require("auth_time", "claim must be a number")?;

    let firebase = claims
        .firebase
        .require("firebase", "claim must be an object")?;
    if !matches!(firebase.get("sign_in_provider"), Some(Value::String(_))) {
        return Err(Error::invalid_claim(
            SIGN_IN_PROVIDER_CLAIM_PATH,
            "claim must be a string",
        ));
    }
    if !matches!(firebase.get("identities"), None | Some(Value::Object(_))) {
        return Err(Error::invalid_claim(
            IDENTITIES_CLAIM_PATH,
            "claim must be an object",
        ));
    }
    for (field, path) in FIREBASE_STRING_FIELDS {
        check_optional(&firebase, field, path, "claim must be a string", Value::is_string)?;
    }
    for (claim, message, is_valid) in OPTIONAL_CLAIMS {
        check_optional(object, claim, claim, message, *is_valid)?;
    }

    Ok(())
}

/// Optional top-level claims with a fixed type. `null` counts as absent.
const OPTIONAL_CLAIMS: &[(&str, &str, fn(&Value) -> bool)] = &[
    ("email", "claim must be a string", Value::is_string),
    ("email_verified", "claim must be a boolean", Value::is_boolean),
];

const FIREBASE_STRING_FIELDS: &[(&str, &str)] = &[
    ("sign_in_second_factor", "firebase.sign_in_second_factor"),
    ("second_factor_identifier", "firebase.second_factor_identifier"),
    ("tenant", TENANT_CLAIM_PATH),
];

fn check_optional(
    object: &Map<String, Value>,
    claim: &str,
    path: &str,
    message: &str,
    is_valid: fn(&Value) -> bool,
) -> Result<(), Error> {
    match object.get(claim) {
        None | Some(Value::Null) => Ok(()),
        Some(value) if is_valid(value) => Ok(()),
        Some(_) => Err(Error::invalid_claim(path, message)),
    }
}

fn numeric_type<'de, D>(deserializer: D) -> Result<TryParse<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match numeric_date(deserializer) {
        Ok(value) => Ok(TryParse::Parsed(value)),
        Err(_) => Ok(TryParse::FailedToParse),
    }
}
