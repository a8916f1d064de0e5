//! Formatter integration for blockfmt
//!
//! Two pieces live here:
//!
//! - [`verbs`]: the reversible escaping that disguises Go fmt verbs
//!   (`%s`, `%[2]q`, ...) as tokens HCL accepts, so test fixtures written as
//!   `fmt.Sprintf` templates can be handed to a strict formatter.
//! - [`Formatter`] and its implementations: [`TerraformFormatter`] shells out
//!   to `terraform fmt -`, [`VerbFormatter`] wraps any formatter with the
//!   escaping round trip.

pub mod error;
pub mod formatter;
pub mod verbs;

pub use error::{Error, Result};
pub use formatter::{Formatter, TerraformFormatter, VerbFormatter};
