use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("Malformed token '{token}' at position {position}: {source}")]
    MalformedInput {
        position: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal tree operation failed: {0}")]
    Internal(String),
}

impl CoverError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type CoverResult<T> = Result<T, CoverError>;
