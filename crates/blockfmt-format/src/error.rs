//! Error types for blockfmt-format

use std::path::PathBuf;

/// Result type for formatter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a formatter can report for a single block
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to run {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} failed with {code}: {stderr}", program.display())]
    CommandFailed {
        program: PathBuf,
        code: i32,
        stderr: String,
    },

    #[error("formatter output is not valid UTF-8: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Rejected(String),
}

impl Error {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}
