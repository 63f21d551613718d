//! Error types for Skywatch

use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Error type returned by pipeline entry points.
///
/// Transport and payload problems never escape past a pipeline boundary as
/// panics; they surface here and are converted to an absent result or a
/// `success: false` response by the caller.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status} for {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unexpected payload shape: {0}")]
    Payload(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl IngestError {
    /// Create a payload-shape error with context
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
