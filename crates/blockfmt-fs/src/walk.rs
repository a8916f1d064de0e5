//! File discovery for directory runs

use glob::Pattern;
use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// Collect the files a run should process.
///
/// A file path is returned as-is. A directory is walked recursively in
/// file-name order; when `pattern` is given only files whose base name
/// matches the glob (e.g. `*.markdown`) are kept.
pub fn collect_files(root: &NormalizedPath, pattern: Option<&str>) -> Result<Vec<NormalizedPath>> {
    let native = root.to_native();
    let metadata = std::fs::metadata(&native).map_err(|e| Error::io(&native, e))?;

    if !metadata.is_dir() {
        return Ok(vec![root.clone()]);
    }

    let pattern = pattern
        .filter(|p| !p.is_empty())
        .map(|p| {
            Pattern::new(p).map_err(|source| Error::Pattern {
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&native).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            path: native.clone(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let matched = match &pattern {
            Some(pattern) => pattern.matches(&entry.file_name().to_string_lossy()),
            None => true,
        };
        if matched {
            files.push(NormalizedPath::new(entry.path()));
        }
    }

    tracing::debug!(root = %root, count = files.len(), "collected files");
    Ok(files)
}
