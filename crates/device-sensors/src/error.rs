//! Error types for device sensors.

use thiserror::Error;

/// Errors that can occur while reading a sensor or data file.
#[derive(Debug, Error)]
pub enum SensorError {
    /// File or socket I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Could not reach the sensor service.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The sensor sent something unexpected.
    #[error("Protocol error: {0}")]
    Protocol(String),
}
