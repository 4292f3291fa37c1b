//! Bearer token claims: the payload structure and its codec.

pub mod decoder;
pub mod encoder;
pub mod payload;

pub use decoder::decode_claims;
pub use encoder::encode_unsigned;
pub use payload::TokenClaims;
