//! Base64 codec for row keys, column names and cell values.
//!
//! The gateway transmits every key, column and value as standard-alphabet
//! base64. Cell contents handled here are UTF-8 text.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Failure to turn a base64 field back into text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid base64 '{input}': {reason}")]
    Base64 { input: String, reason: String },

    #[error("Decoded bytes are not valid UTF-8: {0}")]
    Utf8(String),
}

/// Encode a UTF-8 string as base64.
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a base64 field into a UTF-8 string.
pub fn decode(encoded: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| DecodeError::Base64 {
            input: encoded.to_string(),
            reason: e.to_string(),
        })?;

    String::from_utf8(bytes).map_err(|e| DecodeError::Utf8(e.to_string()))
}
