//! # Encoding Helpers

use thiserror::Error;

/// Hex decoding failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Input is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Decode hex, accepting an optional `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, EncodingError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(body).map_err(|e| EncodingError::InvalidHex(e.to_string()))
}

/// Lowercase hex without prefix.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
