//! Reads the claims payload out of a bearer token without verifying it.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use schoolhub_core::error::{AppError, ErrorKind};
use schoolhub_core::result::AppResult;

use super::payload::TokenClaims;

/// Standard alphabet, padding optional. URL-safe input is mapped onto the
/// standard alphabet before decoding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes the middle segment of `token` into [`TokenClaims`].
///
/// The signature is not checked. A token that is not three dot-separated
/// segments, whose payload is not base64 JSON, or whose payload lacks a
/// `role` claim fails with a [`Decode`](ErrorKind::Decode) error.
pub fn decode_claims(token: &str) -> AppResult<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(AppError::decode(format!(
            "Malformed token: expected 3 segments, found {}",
            segments.len()
        )));
    }

    let payload = segments[1];
    if payload.is_empty() {
        return Err(AppError::decode("Malformed token: empty claims segment"));
    }

    let bytes = decode_segment(payload)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        AppError::with_source(ErrorKind::Decode, "Token claims are not valid UTF-8", e)
    })?;

    serde_json::from_str(&text).map_err(|e| {
        AppError::with_source(
            ErrorKind::Decode,
            format!("Token claims are not a valid payload: {e}"),
            e,
        )
    })
}

/// Base64-decodes one token segment, accepting either alphabet.
fn decode_segment(segment: &str) -> AppResult<Vec<u8>> {
    let standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    Ok(PAYLOAD_ENGINE.decode(standard)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::encode_unsigned;

    #[test]
    fn test_round_trip() {
        let claims = TokenClaims::new("teacher", Some("Ana"));
        let token = encode_unsigned(&claims).unwrap();
        let decoded = decode_claims(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_either_alphabet_with_or_without_padding() {
        assert_eq!(decode_segment("fn5-").unwrap(), vec![0x7e, 0x7e, 0x7e]);
        assert_eq!(decode_segment("fn5+").unwrap(), vec![0x7e, 0x7e, 0x7e]);
        assert_eq!(decode_segment("_w").unwrap(), vec![0xff]);
        assert_eq!(decode_segment("/w==").unwrap(), vec![0xff]);
    }

    #[test]
    fn test_padded_payload() {
        let claims = TokenClaims::new("parent", Some("Mia"));
        let payload =
            base64::engine::general_purpose::STANDARD.encode(serde_json::to_vec(&claims).unwrap());
        let token = format!("header.{payload}.signature");
        assert_eq!(decode_claims(&token).unwrap(), claims);
    }

    #[test]
    fn test_wrong_segment_count() {
        let err = decode_claims("only.two").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        let err = decode_claims("a.b.c.d").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn test_garbage_payload() {
        let err = decode_claims("header.%%%not-base64%%%.sig").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn test_missing_role_is_not_fabricated() {
        let payload =
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(br#"{"first_name":"Ana"}"#);
        let err = decode_claims(&format!("h.{payload}.s")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert!(err.message.contains("role"));
    }
}
