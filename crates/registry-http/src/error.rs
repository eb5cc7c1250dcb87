//! Error types for the HTTP layer.

use serde_json::Value;
use thiserror::Error;

/// Message used when a failure carries no server-provided detail.
pub const UNKNOWN_ERROR: &str = "Unknown error from registry node";

/// A failed exchange as seen by the transport.
///
/// `body` holds the parsed response body when the server answered with a
/// non-success status; network failures and timeouts carry none.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct HttpFailure {
    pub status: Option<u16>,
    pub body: Option<Value>,
    pub reason: String,
}

impl HttpFailure {
    /// A failure with no response (connection error, timeout).
    pub fn network(reason: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            reason: reason.into(),
        }
    }

    /// A non-success response, with its body if it had one.
    pub fn response(status: u16, body: Option<Value>) -> Self {
        Self {
            status: Some(status),
            body,
            reason: format!("status {status}"),
        }
    }
}

/// Errors surfaced to callers of a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The server answered with a body carrying a `message` field.
    #[error("{message}")]
    Server {
        message: String,
        status: Option<u16>,
        /// The full error body, preserved verbatim.
        body: Value,
    },

    /// Network failure, timeout, or an error body without `message`.
    #[error("{}", UNKNOWN_ERROR)]
    Unknown,

    /// Request or response (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResourceError {
    /// The server-provided message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ResourceError::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The server-provided error body, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ResourceError::Server { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type for resource calls.
pub type Result<T> = std::result::Result<T, ResourceError>;
