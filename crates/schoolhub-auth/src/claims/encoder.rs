//! Builds unsigned tokens around a claims payload.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use schoolhub_core::result::AppResult;

use super::payload::TokenClaims;

/// Header of every token produced by [`encode_unsigned`].
const UNSIGNED_HEADER: &str = r#"{"alg":"none","typ":"JWT"}"#;

/// Encodes `claims` into a three-segment token with an `alg: none` header.
///
/// The result carries no valid signature and is rejected by the backend.
/// It exists for fixtures and offline sessions, where only the claims
/// payload matters.
pub fn encode_unsigned(claims: &TokenClaims) -> AppResult<String> {
    let header = URL_SAFE_NO_PAD.encode(UNSIGNED_HEADER);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
    Ok(format!("{header}.{payload}.unsigned"))
}
