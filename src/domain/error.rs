//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while building or rendering a hierarchy.
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("record at position {position} is not a valid record: {reason}")]
    TypeMismatch { position: usize, reason: String },

    /// Raised by external [`TemplateRenderer`](crate::infrastructure::TemplateRenderer) implementations.
    #[error("template {template} failed: {message}")]
    Template { template: String, message: String },
}

impl MenuError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type for domain operations.
pub type MenuResult<T> = Result<T, MenuError>;
