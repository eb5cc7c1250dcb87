//! Error types for the registry core.

use thiserror::Error;

/// Errors raised by core primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("base58 decoding error: {0}")]
    Base58(String),

    #[error("base64 decoding error: {0}")]
    Base64(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("encoding error: {0}")]
    EncodingError(#[from] serde_json::Error),
}
