//! Error types for blockfmt-blocks

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort processing of a whole document.
///
/// Failures of a single block are never reported here; they are logged and
/// counted in [`Stats::error_blocks`](crate::Stats::error_blocks).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] blockfmt_fs::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{file} is not valid UTF-8")]
    Encoding { file: String },

    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}
