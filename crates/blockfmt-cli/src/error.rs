//! Error types for blockfmt-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error while reading, scanning or writing a document
    #[error(transparent)]
    Blocks(#[from] blockfmt_blocks::Error),

    /// Error from the external formatter
    #[error(transparent)]
    Format(#[from] blockfmt_format::Error),

    /// Error while resolving the files to process
    #[error(transparent)]
    Fs(#[from] blockfmt_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
