//! Renderer error types.

use thiserror::Error;
use vecpaint_core::CanvasError;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No suitable rendering backend available.
    #[error("No rendering backend available: {0}")]
    NoBackend(String),

    /// The display element or its 2D context could not be obtained.
    #[error("Surface error: {0}")]
    Surface(String),

    /// The drawing context rejected a call.
    #[error("Drawing context error: {0}")]
    Context(String),

    /// A gradient fill could not be built.
    #[error("Gradient fill failed: {0}")]
    Gradient(String),

    /// A drawing call arrived outside a `start`/`end` pass.
    #[error("No active path pass; call start() first")]
    NoActivePass,

    /// Renderer configuration could not be parsed.
    #[error("Invalid renderer configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A core value (color, style) was invalid.
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
