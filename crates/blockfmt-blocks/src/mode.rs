//! Choosing a locator for a document

use std::sync::LazyLock;

use blockfmt_fs::NormalizedPath;
use regex::bytes::Regex;

use crate::text_format::{Markdown, RestructuredText, TextFormat};

static PACKAGE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^package [A-Za-z0-9_]+\r?\n").expect("Invalid package clause regex")
});

/// How a document is scanned for blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Go source, scanned through its syntax tree.
    Go,
    /// Markdown, scanned line by line.
    Markdown,
    /// reStructuredText, scanned line by line with indentation preserved.
    RestructuredText,
}

impl Mode {
    /// Mode for a file, by extension. Anything unrecognized is Markdown.
    pub fn for_path(path: &NormalizedPath) -> Self {
        if path.has_extension("go") {
            Mode::Go
        } else if path.has_extension("rst") {
            Mode::RestructuredText
        } else {
            Mode::Markdown
        }
    }

    /// Boundary rules for the line-scan modes; `None` for [`Mode::Go`].
    pub fn text_format(self) -> Option<&'static dyn TextFormat> {
        match self {
            Mode::Go => None,
            Mode::Markdown => Some(&Markdown),
            Mode::RestructuredText => Some(&RestructuredText),
        }
    }
}

/// Sniff the mode of an unnamed stream: Go when it has a package clause,
/// Markdown otherwise.
pub fn classify(content: &[u8]) -> Mode {
    if PACKAGE_CLAUSE.is_match(content) {
        Mode::Go
    } else {
        Mode::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("internal/service/s3/bucket_test.go", Mode::Go)]
    #[case("docs/index.rst", Mode::RestructuredText)]
    #[case("README.md", Mode::Markdown)]
    #[case("website/docs/r/bucket.html.markdown", Mode::Markdown)]
    #[case("notes.txt", Mode::Markdown)]
    #[case("Makefile", Mode::Markdown)]
    fn test_mode_for_path(#[case] path: &str, #[case] expected: Mode) {
        assert_eq!(Mode::for_path(&NormalizedPath::new(path)), expected);
    }

    #[rstest]
    #[case(b"package main\n\nfunc main() {}\n".as_slice(), Mode::Go)]
    #[case(b"// Copyright\n\npackage s3_test\r\n".as_slice(), Mode::Go)]
    #[case(b"# Title\n\n```hcl\n```\n".as_slice(), Mode::Markdown)]
    #[case(b"the package foo\n".as_slice(), Mode::Markdown)]
    #[case(b"package main".as_slice(), Mode::Markdown)]
    #[case(b"".as_slice(), Mode::Markdown)]
    fn test_classify(#[case] content: &[u8], #[case] expected: Mode) {
        assert_eq!(classify(content), expected);
    }

    #[test]
    fn test_text_format_for_mode() {
        assert!(Mode::Go.text_format().is_none());
        assert!(!Mode::Markdown.text_format().unwrap().preserve_indentation());
        assert!(Mode::RestructuredText.text_format().unwrap().preserve_indentation());
    }
}
