//! Record store errors

use thiserror::Error;

/// Errors raised by a [`RecordStore`](crate::infrastructure::traits::RecordStore).
///
/// The core never retries and never rewrites these, it hands them to the
/// caller unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record file {context}: {message}")]
    Format { context: String, message: String },

    /// For external [`RecordStore`](crate::infrastructure::traits::RecordStore) implementations wrapping their own backend errors.
    #[error("record store failed: {context}")]
    Backend {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("record store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn format(context: impl Into<String>, message: impl ToString) -> Self {
        Self::Format {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;
