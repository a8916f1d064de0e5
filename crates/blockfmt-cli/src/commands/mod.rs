//! Command implementations for blockfmt-cli

pub mod blocks;
pub mod diff;
pub mod fmt;
pub mod version;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use blockfmt_blocks::{BlockTransform, Reader, Source, Stats, reader::STDIN_NAME};
use blockfmt_format::{Formatter, TerraformFormatter, VerbFormatter};
use blockfmt_fs::{NormalizedPath, collect_files};

use crate::error::{CliError, Result};

pub use blocks::run_blocks;
pub use diff::run_diff;
pub use fmt::run_fmt;
pub use version::run_version;

/// How the process should exit once a command is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub fn from_failed(failed: bool) -> Self {
        if failed { Status::Failure } else { Status::Success }
    }
}

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub fmtcompat: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub check: bool,
    pub terraform: PathBuf,
}

impl Settings {
    /// The formatter blocks are run through.
    pub fn formatter(&self) -> Box<dyn Formatter> {
        let terraform = TerraformFormatter::new(&self.terraform);
        if self.fmtcompat {
            Box::new(VerbFormatter::new(terraform))
        } else {
            Box::new(terraform)
        }
    }
}

/// One document a command visits.
#[derive(Debug, Clone)]
pub enum Target {
    Stdin,
    File(NormalizedPath),
}

impl Target {
    pub fn name(&self) -> &str {
        match self {
            Target::Stdin => STDIN_NAME,
            Target::File(path) => path.as_str(),
        }
    }

    /// Run `reader` over this document. Stdin rewrites go to `output`.
    pub fn process<T>(
        &self,
        reader: &Reader,
        output: &mut dyn Write,
        transform: &mut T,
    ) -> blockfmt_blocks::Result<Stats>
    where
        T: BlockTransform + ?Sized,
    {
        match self {
            Target::File(path) => reader.process(Source::File(path.clone()), transform),
            Target::Stdin => {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                reader.process(
                    Source::Stream {
                        input: &mut input as &mut dyn Read,
                        output,
                    },
                    transform,
                )
            }
        }
    }
}

/// Resolve a path argument into documents: stdin when absent, the file
/// itself, or every file below a directory matching `pattern`.
pub fn targets(path: Option<&Path>, pattern: Option<&str>) -> Result<Vec<Target>> {
    let Some(path) = path else {
        return Ok(vec![Target::Stdin]);
    };
    let files = collect_files(&NormalizedPath::new(path), pattern)?;
    Ok(files.into_iter().map(Target::File).collect())
}

/// Turn documents that could not be processed into one command error.
pub fn aggregate(failures: Vec<(String, CliError)>) -> Result<()> {
    match failures.as_slice() {
        [] => Ok(()),
        [(name, error)] => Err(CliError::user(format!("{name}: {error}"))),
        all => {
            let details: Vec<String> = all
                .iter()
                .map(|(name, error)| format!("  {name}: {error}"))
                .collect();
            Err(CliError::user(format!(
                "{} files could not be processed:\n{}",
                all.len(),
                details.join("\n")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_without_path_is_stdin() {
        let targets = targets(None, None).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name(), "stdin");
    }

    #[test]
    fn test_targets_walk_directory_with_pattern() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.md"), "").unwrap();
        std::fs::write(dir.path().join("b_test.go"), "").unwrap();

        let targets = targets(Some(dir.path()), Some("*.go")).unwrap();

        assert_eq!(targets.len(), 1);
        assert!(targets[0].name().ends_with("b_test.go"));
    }

    #[test]
    fn test_aggregate() {
        assert!(aggregate(Vec::new()).is_ok());

        let err = aggregate(vec![
            ("a.go".to_string(), CliError::user("bad")),
            ("b.go".to_string(), CliError::user("worse")),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "2 files could not be processed:\n  a.go: bad\n  b.go: worse"
        );
    }
}
