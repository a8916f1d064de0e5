//! Version command implementation

use std::io::Write;

use blockfmt_format::TerraformFormatter;
use tracing::warn;

use super::{Settings, Status};
use crate::error::Result;

/// Print the blockfmt version and, when it can be run, the terraform version.
pub fn run_version(settings: &Settings, out: &mut dyn Write) -> Result<Status> {
    writeln!(out, "blockfmt v{}", env!("CARGO_PKG_VERSION"))?;

    match TerraformFormatter::new(&settings.terraform).version() {
        Ok(version) => writeln!(out, "  + {version}")?,
        Err(e) => warn!(
            program = %settings.terraform.display(),
            "could not determine terraform version: {}", e
        ),
    }
    Ok(Status::Success)
}
