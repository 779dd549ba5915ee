//! Application-level errors (wraps domain and store errors)

use thiserror::Error;

use crate::domain::{MenuError, RecordKey};
use crate::infrastructure::StoreError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] MenuError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("record not found: {0}")]
    RecordNotFound(RecordKey),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("hierarchy integrity violated: {0}")]
    Integrity(String),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
