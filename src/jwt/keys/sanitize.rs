use crate::error::Error;
use log::warn;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

/// Key set as served by the endpoint: `kid` to PEM-encoded certificate or public key.
pub type RawKeySet = HashMap<String, String>;

pub(super) fn sanitize_error_body(body: &[u8]) -> String {
    let mut sanitized = String::new();
    for &byte in body.iter().take(128) {
        match byte {
            b'\n' => sanitized.push_str("\\n"),
            b'\r' => sanitized.push_str("\\r"),
            b'\t' => sanitized.push_str("\\t"),
            _ if byte.is_ascii_graphic() || byte == b' ' => sanitized.push(byte as char),
            _ => sanitized.push('.'),
        }
    }
    if body.len() > 128 {
        sanitized.push_str("...");
    }
    sanitized
}

pub(super) fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let _ = redacted.set_username("");
    let _ = redacted.set_password(None);
    redacted.set_query(None);
    redacted.set_fragment(None);
    redacted.to_string()
}

/// Parses a key set body, dropping entries whose value is not a string.
pub fn key_set_from_slice(body: &[u8]) -> Result<RawKeySet, Error> {
    let value: Value = serde_json::from_slice(body)?;
    let Value::Object(entries) = value else {
        return Err(Error::Json(serde::de::Error::custom(
            "key set must be a json object",
        )));
    };
    let mut keys = RawKeySet::with_capacity(entries.len());
    for (kid, entry) in entries {
        match entry {
            Value::String(pem) => {
                keys.insert(kid, pem);
            }
            _ => warn!("public key entry is not a string; kid={kid}"),
        }
    }
    Ok(keys)
}
