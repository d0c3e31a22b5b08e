mod claims;
mod errors;
mod parts;

pub(super) use claims::{validate_claims, ClaimsPolicy};
pub(super) use errors::jwt_json_error;
pub(super) use parts::{decode_jwt_header, split_jwt};
