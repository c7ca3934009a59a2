//! Error types for the backend client.

use thiserror::Error;

/// Errors from the secure key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters the store cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend rejected the token; it has been cleared.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Token or profile storage failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether this error came from the network rather than the backend's answer.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Http(_))
    }
}
