//! Error types for chat operations.

use safety_api::ApiError;
use thiserror::Error;

/// Errors that can occur while relaying a chat turn.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The history contains no user message to answer.
    #[error("no user message in chat history")]
    NoUserMessage,

    /// The Aksha backend failed.
    #[error("backend error: {0}")]
    Api(#[from] ApiError),

    /// A request to a remote assistant failed before it answered.
    #[error("network error: {0}")]
    Network(String),

    /// The remote assistant answered with an error or an empty reply.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The backend does not offer this operation.
    #[error("unsupported by {0}")]
    Unsupported(String),
}
