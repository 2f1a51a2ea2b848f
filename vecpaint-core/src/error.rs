//! Error types for value parsing.

use thiserror::Error;

/// Result type for core value operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur while building or parsing core values.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A style field held a value of the wrong shape.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Style descriptor serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
