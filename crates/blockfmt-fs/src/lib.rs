//! Filesystem helpers for blockfmt
//!
//! Provides normalized paths, atomic write-back of rewritten documents,
//! and discovery of the files a run should visit.

pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use walk::collect_files;
