//! Block boundary rules for line-oriented documents

/// Decides where embedded blocks start and finish in a text document.
///
/// Lines are passed with their terminator attached.
pub trait TextFormat {
    fn is_start_line(&self, line: &str) -> bool;

    fn is_finish_line(&self, line: &str) -> bool;

    /// Whether block content is dedented before the transform and
    /// re-indented afterwards.
    fn preserve_indentation(&self) -> bool {
        false
    }
}

/// Fenced code blocks tagged `hcl`, `terraform` or `tf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markdown;

impl TextFormat for Markdown {
    fn is_start_line(&self, line: &str) -> bool {
        ["```hcl", "```terraform", "```tf"]
            .iter()
            .any(|fence| line.starts_with(fence))
    }

    fn is_finish_line(&self, line: &str) -> bool {
        line.starts_with("```")
    }
}

/// `.. code:: terraform` directives; the indented body ends at the first
/// line that starts in column zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestructuredText;

impl TextFormat for RestructuredText {
    fn is_start_line(&self, line: &str) -> bool {
        line.starts_with(".. code:: terraform")
    }

    fn is_finish_line(&self, line: &str) -> bool {
        !line.starts_with(char::is_whitespace)
    }

    fn preserve_indentation(&self) -> bool {
        true
    }
}
