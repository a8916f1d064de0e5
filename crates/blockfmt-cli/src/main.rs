//! blockfmt CLI
//!
//! Formats Terraform blocks embedded in Go string literals, Markdown and
//! reStructuredText documents.

mod cli;
mod commands;
mod error;

use std::io::{self, IsTerminal};

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use commands::{Settings, Status};
use error::Result;

fn main() {
    match run() {
        Ok(Status::Success) => {}
        Ok(Status::Failure) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Status> {
    let cli = Cli::parse();

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    init_tracing(cli.verbose);

    let settings = Settings {
        fmtcompat: cli.fmtcompat,
        verbose: cli.verbose,
        quiet: cli.quiet,
        check: cli.check,
        terraform: cli.terraform,
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match cli.command {
        Commands::Fmt {
            path,
            pattern,
            fix_finish_lines,
        } => commands::run_fmt(
            &settings,
            path.as_deref(),
            pattern.as_deref(),
            fix_finish_lines,
            &mut out,
            &mut err,
        ),
        Commands::Diff { path, pattern } => commands::run_diff(
            &settings,
            path.as_deref(),
            pattern.as_deref(),
            &mut out,
            &mut err,
        ),
        Commands::Blocks {
            file,
            json,
            zero_terminated,
        } => commands::run_blocks(
            &settings,
            file.as_deref(),
            commands::blocks::Output::new(json, zero_terminated),
            &mut out,
            &mut err,
        ),
        Commands::Version => commands::run_version(&settings, &mut out),
    }
}

/// Logs go to stderr; `--verbose` raises the level to debug, otherwise
/// `BLOCKFMT_LOG` decides, defaulting to warnings.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("BLOCKFMT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{}: tracing subscriber already installed", "warning".yellow());
    }
}
