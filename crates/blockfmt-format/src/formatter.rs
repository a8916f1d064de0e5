//! External formatter integration

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};
use crate::verbs;

/// Something that turns block text into formatted block text.
pub trait Formatter {
    fn format(&self, text: &str) -> Result<String>;
}

impl<F> Formatter for F
where
    F: Fn(&str) -> Result<String>,
{
    fn format(&self, text: &str) -> Result<String> {
        self(text)
    }
}

/// Runs `terraform fmt -`, feeding the block on stdin.
#[derive(Debug, Clone)]
pub struct TerraformFormatter {
    program: PathBuf,
}

impl TerraformFormatter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// First line of `terraform version`.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("version")
            .output()
            .map_err(|source| self.spawn_error(source))?;

        if !output.status.success() {
            return Err(self.command_failed(output.status.code(), &output.stderr));
        }

        let stdout = String::from_utf8(output.stdout)?;
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn spawn_error(&self, source: std::io::Error) -> Error {
        Error::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    fn command_failed(&self, code: Option<i32>, stderr: &[u8]) -> Error {
        Error::CommandFailed {
            program: self.program.clone(),
            code: code.unwrap_or(-1),
            stderr: String::from_utf8_lossy(stderr).trim_end().to_string(),
        }
    }
}

impl Default for TerraformFormatter {
    fn default() -> Self {
        Self::new("terraform")
    }
}

impl Formatter for TerraformFormatter {
    fn format(&self, text: &str) -> Result<String> {
        debug!(program = %self.program.display(), "running formatter");

        let mut child = Command::new(&self.program)
            .args(["fmt", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| self.spawn_error(source))?;

        // Large blocks can fill the stdout pipe before stdin is drained, so
        // the input is written from its own thread.
        let stdin = child.stdin.take();
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            output.and_then(|output| written.map(|()| output))
        })
        .map_err(|source| self.spawn_error(source))?;

        debug!(code = ?output.status.code(), "formatter exited");
        if !output.status.success() {
            return Err(self.command_failed(output.status.code(), &output.stderr));
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Wraps a formatter with the fmt-verb escaping round trip.
#[derive(Debug, Clone, Default)]
pub struct VerbFormatter<F> {
    inner: F,
}

impl<F: Formatter> VerbFormatter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Formatter> Formatter for VerbFormatter<F> {
    fn format(&self, text: &str) -> Result<String> {
        let escaped = verbs::escape(text);
        let formatted = self.inner.format(&escaped)?;
        Ok(verbs::unescape(&formatted))
    }
}
