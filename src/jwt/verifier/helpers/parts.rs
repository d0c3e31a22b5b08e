use crate::error::Error;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::errors::ErrorKind;
use serde_json::Value;

use super::errors::{jwt_error, jwt_json_error};
use crate::jwt::types::JwtHeader;

/// Returns the protected header segment of a compact JWS.
pub(in crate::jwt::verifier) fn split_jwt(token: &str) -> Result<&str, Error> {
    let mut iter = token.split('.');
    let header = iter
        .next()
        .ok_or_else(|| jwt_error(ErrorKind::InvalidToken))?;
    if iter.by_ref().take(2).count() != 2 || iter.next().is_some() {
        return Err(jwt_error(ErrorKind::InvalidToken));
    }
    Ok(header)
}

pub(in crate::jwt::verifier) fn decode_jwt_header(encoded: &str) -> Result<JwtHeader, Error> {
    let header_bytes = base64_url_decode(encoded)?;
    let raw: Value = serde_json::from_slice(&header_bytes).map_err(jwt_json_error)?;
    let alg = raw
        .get("alg")
        .and_then(Value::as_str)
        .ok_or_else(|| jwt_error(ErrorKind::MissingAlgorithm))?;
    let kid = match raw.get("kid") {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) if value.is_empty() => None,
        Some(Value::String(value)) => Some(value.to_string()),
        Some(_) => return Err(jwt_error(ErrorKind::InvalidToken)),
    };
    Ok(JwtHeader {
        alg: alg.to_string(),
        kid,
    })
}

fn base64_url_decode(data: &str) -> Result<Vec<u8>, Error> {
    URL_SAFE_NO_PAD
        .decode(data)
        .map_err(|_| jwt_error(ErrorKind::InvalidToken))
}
