//! Blocks command implementation

use std::convert::Infallible;
use std::io::{self, Write};
use std::path::Path;

use blockfmt_blocks::{Block, Reader, ReaderOptions};
use blockfmt_fs::NormalizedPath;
use colored::Colorize;
use serde::Serialize;

use super::{Settings, Status, Target};
use crate::error::Result;

/// How the blocks are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Annotated,
    Json,
    ZeroTerminated,
}

impl Output {
    pub fn new(json: bool, zero_terminated: bool) -> Self {
        if json {
            Output::Json
        } else if zero_terminated {
            Output::ZeroTerminated
        } else {
            Output::Annotated
        }
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    file_name: &'a str,
    block_count: usize,
    blocks: &'a [Block],
}

/// Run the blocks command
///
/// Lists the blocks of a single file, or of stdin when `file` is absent.
pub fn run_blocks(
    settings: &Settings,
    file: Option<&Path>,
    output: Output,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Status> {
    let target = match file {
        Some(path) => Target::File(NormalizedPath::new(path)),
        None => Target::Stdin,
    };
    let reader = Reader::new(ReaderOptions {
        read_only: true,
        ..Default::default()
    });

    let mut blocks = Vec::new();
    let stats = target.process(
        &reader,
        &mut io::sink(),
        &mut |block: &Block| -> std::result::Result<String, Infallible> {
            blocks.push(block.clone());
            Ok(block.text.clone())
        },
    )?;

    match output {
        Output::Annotated => {
            for block in &blocks {
                write!(
                    out,
                    "\n{}\n{}",
                    format!("####### B{} @ #{}", block.index, block.end_line).bright_magenta(),
                    block.text
                )?;
            }
        }
        Output::Json => {
            let listing = Listing {
                file_name: target.name(),
                block_count: stats.block_count,
                blocks: &blocks,
            };
            serde_json::to_writer_pretty(&mut *out, &listing)?;
            writeln!(out)?;
        }
        Output::ZeroTerminated => {
            for block in &blocks {
                write!(out, "{}\0", block.text)?;
            }
        }
    }
    out.flush()?;

    if settings.verbose {
        writeln!(
            err,
            "\nFinished processing {} lines {} blocks!",
            stats.line_count.to_string().cyan(),
            stats.block_count.to_string().yellow()
        )?;
    }
    Ok(Status::from_failed(stats.has_errors()))
}
