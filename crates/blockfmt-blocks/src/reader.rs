//! Document orchestration: read, locate, transform, write back

use std::io::{Read, Write};

use blockfmt_fs::{NormalizedPath, io};
use tracing::{debug, info};

use crate::block::{BlockTransform, Stats};
use crate::error::{Error, Result};
use crate::go::GoScanner;
use crate::mode::{Mode, classify};
use crate::scan::LineScanner;

/// Name used for unnamed streams in logs and output.
pub const STDIN_NAME: &str = "stdin";

/// Options controlling a [`Reader`] run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    /// Never write anything back; only statistics and callbacks happen.
    pub read_only: bool,
    /// Strip leading whitespace from lines closing a text block.
    pub fix_finish_lines: bool,
}

/// Where a document comes from and where its rewrite goes.
pub enum Source<'a> {
    /// A file on disk, rewritten in place when its content changes.
    File(NormalizedPath),
    /// An unnamed stream, classified by content and echoed to `output`.
    Stream {
        input: &'a mut dyn Read,
        output: &'a mut dyn Write,
    },
}

impl Source<'_> {
    /// Name of the document for logs and output.
    pub fn name(&self) -> &str {
        match self {
            Source::File(path) => path.as_str(),
            Source::Stream { .. } => STDIN_NAME,
        }
    }
}

/// Runs one document through the matching locator and a transform.
#[derive(Debug, Clone, Default)]
pub struct Reader {
    options: ReaderOptions,
}

impl Reader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Process `source`, feeding every block to `transform`.
    ///
    /// Files are rewritten atomically and only when their content changed.
    /// Streams are read in full before scanning; the rewrite is written to
    /// the stream's output unless the run is read-only.
    pub fn process<T>(&self, source: Source<'_>, transform: &mut T) -> Result<Stats>
    where
        T: BlockTransform + ?Sized,
    {
        match source {
            Source::File(path) => self.process_file(&path, transform),
            Source::Stream { input, output } => self.process_stream(input, output, transform),
        }
    }

    fn process_file<T>(&self, path: &NormalizedPath, transform: &mut T) -> Result<Stats>
    where
        T: BlockTransform + ?Sized,
    {
        debug!(file = %path, "opening source file");
        let text = io::read_text(path)?;
        let (out, stats) = self.run(Mode::for_path(path), path.as_str(), &text, transform)?;

        if !self.options.read_only && out != text {
            io::write_text(path, &out)?;
            info!(file = %path, blocks = stats.block_count, "rewrote file");
        }
        Ok(stats)
    }

    fn process_stream<T>(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        transform: &mut T,
    ) -> Result<Stats>
    where
        T: BlockTransform + ?Sized,
    {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        let mode = classify(&bytes);
        debug!(?mode, bytes = bytes.len(), "classified stdin");

        let text = String::from_utf8(bytes).map_err(|_| Error::Encoding {
            file: STDIN_NAME.to_string(),
        })?;
        let (out, stats) = self.run(mode, STDIN_NAME, &text, transform)?;

        if !self.options.read_only {
            output.write_all(out.as_bytes())?;
            output.flush()?;
        }
        Ok(stats)
    }

    /// Rewrite in-memory `text` with the locator for `mode`.
    ///
    /// `file` only names the document in errors and log output.
    pub fn run<T>(
        &self,
        mode: Mode,
        file: &str,
        text: &str,
        transform: &mut T,
    ) -> Result<(String, Stats)>
    where
        T: BlockTransform + ?Sized,
    {
        match mode.text_format() {
            None => GoScanner::new(file).scan(text, transform),
            Some(format) => Ok(LineScanner::new(file, format)
                .fix_finish_lines(self.options.fix_finish_lines)
                .scan(text, transform)),
        }
    }
}
