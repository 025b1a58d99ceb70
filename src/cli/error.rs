//! CLI-level errors (wraps library errors)

use thiserror::Error;

use crate::errors::CoverError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Cover(#[from] CoverError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Cover(e) => match e {
                CoverError::MalformedInput { .. } => crate::exitcode::DATAERR,
                CoverError::Config { .. } => crate::exitcode::CONFIG,
                CoverError::Io { .. } => crate::exitcode::IOERR,
                CoverError::Internal(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
