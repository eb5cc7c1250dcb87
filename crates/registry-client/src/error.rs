//! Error types for the registry client.

use registry_core::CoreError;
use registry_http::ResourceError;
use thiserror::Error;

/// Failures of the external signing/hashing utility.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("signing failed: {0}")]
    Signing(String),

    #[error("hashing failed: {0}")]
    Hashing(String),
}

/// Errors that can occur during client operations.
///
/// Multi-step flows return the failing step's own error unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request failed (server message or unknown error).
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Signing or hashing failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Core primitive error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Push socket error.
    #[error("push socket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The server answered with an unexpected body shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
