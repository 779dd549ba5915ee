//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::MenuError;
use crate::exitcode;
use crate::infrastructure::StoreError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("{parent} cannot become the parent of {id}: it would create a cycle")]
    ParentRejected { id: String, parent: String },
}

impl From<MenuError> for CliError {
    fn from(e: MenuError) -> Self {
        CliError::App(e.into())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::App(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ParentRejected { .. } => exitcode::DATAERR,
            CliError::App(e) => match e {
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::Domain(MenuError::Configuration(_)) => exitcode::CONFIG,
                ApplicationError::Domain(_) => exitcode::DATAERR,
                ApplicationError::Store(StoreError::Io { .. }) => exitcode::IOERR,
                ApplicationError::Store(StoreError::Format { .. }) => exitcode::DATAERR,
                ApplicationError::Store(_) => exitcode::SOFTWARE,
                ApplicationError::RecordNotFound(_) => exitcode::NOINPUT,
                ApplicationError::InvalidRecord(_) | ApplicationError::Integrity(_) => {
                    exitcode::DATAERR
                }
            },
        }
    }
}
