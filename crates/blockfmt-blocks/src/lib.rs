//! Embedded block discovery and round-trip rewriting.
//!
//! A host document (Go source, Markdown, reStructuredText) is scanned for
//! embedded Terraform blocks. Each block is handed to a [`BlockTransform`]
//! and the result is spliced back in place; everything outside the blocks is
//! preserved byte for byte.
//!
//! Two locators do the scanning:
//!
//! - [`go`]: parses Go source and visits string literals that look like
//!   Terraform configuration.
//! - [`scan`]: a line-oriented state machine driven by a [`TextFormat`]
//!   (fenced Markdown code, `.. code:: terraform` directives).
//!
//! [`Reader`] picks the locator for a [`Source`], runs it and writes the
//! rewritten document back.
//!
//! ```
//! use std::convert::Infallible;
//! use blockfmt_blocks::{Block, Mode, Reader, ReaderOptions};
//!
//! let doc = "# Example\n\n```hcl\nresource \"a\" \"b\" {}\n```\n";
//! let mut seen = Vec::new();
//! let reader = Reader::new(ReaderOptions::default());
//! let (out, stats) = reader
//!     .run(Mode::Markdown, "README.md", doc, &mut |block: &Block| -> Result<String, Infallible> {
//!         seen.push(block.start_line);
//!         Ok(block.text.clone())
//!     })
//!     .unwrap();
//!
//! assert_eq!(out, doc);
//! assert_eq!(stats.block_count, 1);
//! assert_eq!(seen, vec![3]);
//! ```

pub mod block;
pub mod error;
pub mod go;
pub mod indent;
pub mod mode;
pub mod quote;
pub mod reader;
pub mod scan;
pub mod text_format;

pub use block::{Block, BlockTransform, Stats};
pub use error::{Error, Result};
pub use mode::{Mode, classify};
pub use reader::{Reader, ReaderOptions, Source};
pub use text_format::{Markdown, RestructuredText, TextFormat};
