//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Export configuration value that would break the document shell.
    #[error("Invalid export configuration: {0}")]
    InvalidConfig(String),

    /// Writing the rendered document failed.
    #[error("Failed to write document: {0}")]
    Io(#[from] std::io::Error),
}
