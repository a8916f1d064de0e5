//! Fmt command implementation
//!
//! Formats every block in place. Blocks the formatter rejects are left as
//! they were and make the command fail once all documents are done.

use std::io::Write;
use std::path::Path;

use blockfmt_blocks::{Block, Reader, ReaderOptions};
use blockfmt_format::Formatter;
use colored::Colorize;
use tracing::debug;

use super::{Settings, Status, aggregate, targets};
use crate::error::{CliError, Result};

/// Run the fmt command
pub fn run_fmt(
    settings: &Settings,
    path: Option<&Path>,
    pattern: Option<&str>,
    fix_finish_lines: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Status> {
    let formatter = settings.formatter();
    let reader = Reader::new(ReaderOptions {
        read_only: false,
        fix_finish_lines,
    });

    let mut failed = false;
    let mut failures = Vec::new();

    for target in targets(path, pattern)? {
        debug!(file = target.name(), "formatting");
        let mut formatted = 0;
        let mut transform = |block: &Block| -> blockfmt_format::Result<String> {
            let result = formatter.format(&block.text)?;
            if result != block.text {
                formatted += 1;
            }
            Ok(result)
        };

        let stats = match target.process(&reader, out, &mut transform) {
            Ok(stats) => stats,
            Err(e) => {
                failures.push((target.name().to_string(), CliError::from(e)));
                continue;
            }
        };
        failed |= stats.has_errors();

        if settings.verbose {
            let name = if formatted > 0 {
                target.name().bright_magenta()
            } else {
                target.name().magenta()
            };
            writeln!(
                err,
                "{}: {} lines & formatted {}/{} blocks!",
                name,
                stats.line_count.to_string().cyan(),
                formatted.to_string().yellow(),
                stats.block_count.to_string().yellow()
            )?;
        }
    }

    aggregate(failures)?;
    Ok(Status::from_failed(failed))
}
