//! Diff command implementation
//!
//! Reports the blocks whose formatted text differs from what is on disk,
//! without writing anything back.

use std::io::{self, Write};
use std::path::Path;

use blockfmt_blocks::{Block, Reader, ReaderOptions};
use blockfmt_format::Formatter;
use colored::Colorize;
use similar::{ChangeTag, TextDiff};

use super::{Settings, Status, aggregate, targets};
use crate::error::{CliError, Result};

/// Run the diff command
///
/// Prints `file:line` for each block that needs formatting, followed by a
/// line diff unless `quiet` is set. With `check`, any difference fails the
/// command.
pub fn run_diff(
    settings: &Settings,
    path: Option<&Path>,
    pattern: Option<&str>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Status> {
    let formatter = settings.formatter();
    let reader = Reader::new(ReaderOptions {
        read_only: true,
        ..Default::default()
    });

    let mut failed = false;
    let mut has_diff = false;
    let mut failures = Vec::new();

    for target in targets(path, pattern)? {
        let name = target.name().to_string();
        let mut with_diff = 0;
        let mut transform = |block: &Block| -> Result<String> {
            let formatted = formatter.format(&block.text)?;
            if formatted != block.text {
                with_diff += 1;
                writeln!(
                    out,
                    "{}{}{}",
                    name.bright_magenta(),
                    ":".dimmed(),
                    block.start_line.to_string().magenta()
                )?;
                if !settings.quiet {
                    write_diff(&mut *out, &block.text, &formatted)?;
                }
            }
            Ok(block.text.clone())
        };

        let stats = match target.process(&reader, &mut io::sink(), &mut transform) {
            Ok(stats) => stats,
            Err(e) => {
                failures.push((name, CliError::from(e)));
                continue;
            }
        };
        failed |= stats.has_errors();
        has_diff |= with_diff > 0;

        if settings.verbose {
            let label = if with_diff > 0 {
                name.bright_magenta()
            } else {
                name.magenta()
            };
            writeln!(
                err,
                "{}: {} lines & {}/{} blocks need formatting.",
                label,
                stats.line_count.to_string().cyan(),
                with_diff.to_string().yellow(),
                stats.block_count.to_string().yellow()
            )?;
        }
    }

    aggregate(failures)?;
    Ok(Status::from_failed(failed || (settings.check && has_diff)))
}

/// Write a line diff of `old` against `new`, one prefixed line per change.
fn write_diff(out: &mut dyn Write, old: &str, new: &str) -> io::Result<()> {
    let diff = TextDiff::from_lines(old, new);
    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches(['\n', '\r']);
        match change.tag() {
            ChangeTag::Delete => writeln!(out, "{}", format!("-{line}").red())?,
            ChangeTag::Insert => writeln!(out, "{}", format!("+{line}").green())?,
            ChangeTag::Equal => writeln!(out, " {line}")?,
        }
    }
    Ok(())
}
