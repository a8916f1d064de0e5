//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// blockfmt - format Terraform blocks embedded in Go source and documentation
#[derive(Parser, Debug)]
#[command(name = "blockfmt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Escape Go fmt verbs (%s, %[2]d, ...) so Sprintf templates can be formatted
    #[arg(short, long, global = true, env = "BLOCKFMT_FMTCOMPAT")]
    pub fmtcompat: bool,

    /// Show files as they are processed, with statistics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show the location of blocks that need formatting
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Exit with an error from diff when formatting is required
    #[arg(short, long, global = true)]
    pub check: bool,

    /// Terraform binary used to format blocks
    #[arg(
        long,
        global = true,
        env = "BLOCKFMT_TERRAFORM",
        default_value = "terraform"
    )]
    pub terraform: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Format blocks in a file, a directory (recursively) or stdin
    ///
    /// Examples:
    ///   blockfmt fmt internal/service -p '*_test.go' -f
    ///   blockfmt fmt website/docs/r/s3_bucket.html.markdown
    ///   cat README.md | blockfmt fmt
    Fmt {
        /// File or directory; stdin when omitted
        path: Option<PathBuf>,

        /// Glob matched against each file name in a directory (e.g. *.markdown)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Remove leading whitespace from lines that close a block
        #[arg(long)]
        fix_finish_lines: bool,
    },

    /// Show how blocks would change without writing anything
    Diff {
        /// File or directory; stdin when omitted
        path: Option<PathBuf>,

        /// Glob matched against each file name in a directory (e.g. *.markdown)
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// List the blocks found in a file or stdin
    Blocks {
        /// File to scan; stdin when omitted
        file: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long, conflicts_with = "zero_terminated")]
        json: bool,

        /// Separate block texts with NUL instead of annotated headers
        #[arg(short, long)]
        zero_terminated: bool,
    },

    /// Print the blockfmt and terraform versions
    Version,
}
