//! Line-scan locator for Markdown and reStructuredText documents

use tracing::{debug, error};

use crate::block::{Block, BlockTransform, Stats};
use crate::indent;
use crate::text_format::TextFormat;

/// Block currently being collected.
struct OpenBlock {
    start_line: usize,
    body: String,
}

/// Scans a text document line by line, rewriting each block it finds.
pub struct LineScanner<'a> {
    file: &'a str,
    format: &'a dyn TextFormat,
    fix_finish_lines: bool,
}

impl<'a> LineScanner<'a> {
    /// `file` only names the document in log output.
    pub fn new(file: &'a str, format: &'a dyn TextFormat) -> Self {
        Self {
            file,
            format,
            fix_finish_lines: false,
        }
    }

    /// Strip leading whitespace from the lines that close a block.
    pub fn fix_finish_lines(mut self, fix: bool) -> Self {
        self.fix_finish_lines = fix;
        self
    }

    /// Rewrite `text`, returning the new document and its statistics.
    ///
    /// Line terminators are carried through untouched. Blocks that fail to
    /// transform, that are interrupted by another opening line, or that run
    /// to the end of the document are written back verbatim and counted in
    /// [`Stats::error_blocks`].
    pub fn scan<T>(&self, text: &str, transform: &mut T) -> (String, Stats)
    where
        T: BlockTransform + ?Sized,
    {
        let mut out = String::with_capacity(text.len());
        let mut stats = Stats::default();
        let mut open: Option<OpenBlock> = None;

        for (i, line) in text.split_inclusive('\n').enumerate() {
            let number = i + 1;
            stats.line_count = number;

            let Some(block) = open.as_mut() else {
                out.push_str(line);
                if self.format.is_start_line(line) {
                    stats.block_count += 1;
                    open = Some(OpenBlock {
                        start_line: number,
                        body: String::new(),
                    });
                }
                continue;
            };

            if self.format.is_start_line(line) {
                self.unterminated(stats.block_count, block.start_line);
                stats.error_blocks += 1;
                out.push_str(&block.body);
                out.push_str(line);

                stats.block_count += 1;
                block.start_line = number;
                block.body.clear();
            } else if self.format.is_finish_line(line) {
                let block = Block {
                    index: stats.block_count,
                    start_line: block.start_line,
                    end_line: number,
                    text: std::mem::take(&mut block.body),
                };
                open = None;

                stats.block_line_count += block.line_count();
                match self.apply(transform, &block) {
                    Ok(result) => out.push_str(&result),
                    Err(message) => {
                        error!(
                            block = block.index,
                            file = self.file,
                            line = block.start_line,
                            "block {} @ {}:{} failed to process with: {}",
                            block.index,
                            self.file,
                            block.start_line,
                            message
                        );
                        stats.error_blocks += 1;
                        out.push_str(&block.text);
                    }
                }

                if self.fix_finish_lines {
                    out.push_str(line.trim_start_matches([' ', '\t']));
                } else {
                    out.push_str(line);
                }
            } else {
                block.body.push_str(line);
            }
        }

        // An opening line with nothing after it is left as is.
        if let Some(block) = open.filter(|block| !block.body.is_empty()) {
            self.unterminated(stats.block_count, block.start_line);
            stats.error_blocks += 1;
            out.push_str(&block.body);
        }

        debug!(
            file = self.file,
            lines = stats.line_count,
            blocks = stats.block_count,
            "scanned document"
        );
        (out, stats)
    }

    /// Run the transform, dedenting around it when the format asks for it.
    fn apply<T>(&self, transform: &mut T, block: &Block) -> Result<String, String>
    where
        T: BlockTransform + ?Sized,
    {
        if !self.format.preserve_indentation() {
            return transform.transform(block).map_err(|e| e.to_string());
        }

        let prefix = indent::indentation(&block.text);
        let dedented = Block {
            text: indent::dedent(&block.text, prefix),
            ..block.clone()
        };
        transform
            .transform(&dedented)
            .map(|result| indent::indent(&result, prefix))
            .map_err(|e| e.to_string())
    }

    fn unterminated(&self, index: usize, start_line: usize) {
        error!(
            block = index,
            file = self.file,
            line = start_line,
            "block {} @ {}:{} failed to find end of block",
            index,
            self.file,
            start_line
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_format::{Markdown, RestructuredText};
    use pretty_assertions::assert_eq;

    fn upper(block: &Block) -> Result<String, String> {
        Ok(block.text.to_uppercase())
    }

    #[test]
    fn test_block_lines_and_index() {
        let text = "intro\n```hcl\na = 1\nb = 2\n```\n\n```tf\nc = 3\n```\n";
        let mut seen = Vec::new();
        let mut record = |block: &Block| -> Result<String, String> {
            seen.push((block.index, block.start_line, block.end_line, block.text.clone()));
            Ok(block.text.clone())
        };

        let (out, stats) = LineScanner::new("doc.md", &Markdown).scan(text, &mut record);

        assert_eq!(out, text);
        assert_eq!(
            seen,
            vec![
                (1, 2, 5, "a = 1\nb = 2\n".to_string()),
                (2, 7, 9, "c = 3\n".to_string()),
            ]
        );
        assert_eq!(
            stats,
            Stats {
                line_count: 9,
                block_count: 2,
                block_line_count: 3,
                error_blocks: 0,
            }
        );
    }

    #[test]
    fn test_missing_final_newline_is_preserved() {
        let text = "```hcl\na = 1\n```";
        let (out, stats) = LineScanner::new("doc.md", &Markdown).scan(text, &mut upper);
        assert_eq!(out, "```hcl\nA = 1\n```");
        assert_eq!(stats.line_count, 3);
    }

    #[test]
    fn test_crlf_terminators_are_preserved() {
        let text = "```hcl\r\na = 1\r\n```\r\nafter\r\n";
        let (out, _) = LineScanner::new("doc.md", &Markdown).scan(text, &mut upper);
        assert_eq!(out, "```hcl\r\nA = 1\r\n```\r\nafter\r\n");
    }

    #[test]
    fn test_trailing_start_line_without_body_is_not_an_error() {
        let text = "# T\n\n```hcl\n";
        let (out, stats) = LineScanner::new("doc.md", &Markdown).scan(text, &mut upper);

        assert_eq!(out, text);
        assert_eq!(stats.block_count, 1);
        assert_eq!(stats.error_blocks, 0);
    }

    #[test]
    fn test_unterminated_block_with_body_is_an_error() {
        let text = "```hcl\na = 1\n";
        let (out, stats) = LineScanner::new("doc.md", &Markdown).scan(text, &mut upper);

        assert_eq!(out, text);
        assert_eq!(stats.error_blocks, 1);
    }

    /// Fences that may be indented, as in nested list items.
    struct IndentedFence;

    impl TextFormat for IndentedFence {
        fn is_start_line(&self, line: &str) -> bool {
            line.trim_start().starts_with("```hcl")
        }

        fn is_finish_line(&self, line: &str) -> bool {
            line.trim_start().starts_with("```")
        }
    }

    #[test]
    fn test_fix_finish_lines() {
        let text = "```hcl\na = 1\n   ```\n";

        let (kept, _) = LineScanner::new("doc.md", &IndentedFence).scan(text, &mut upper);
        let (fixed, _) = LineScanner::new("doc.md", &IndentedFence)
            .fix_finish_lines(true)
            .scan(text, &mut upper);

        assert_eq!(kept, "```hcl\nA = 1\n   ```\n");
        assert_eq!(fixed, "```hcl\nA = 1\n```\n");
    }

    #[test]
    fn test_failed_block_is_written_verbatim() {
        let text = "```hcl\na = 1\n```\n```hcl\nbad\n```\n";
        let mut reject = |block: &Block| -> Result<String, String> {
            if block.text.contains("bad") {
                Err("invalid".to_string())
            } else {
                Ok(block.text.to_uppercase())
            }
        };

        let (out, stats) = LineScanner::new("doc.md", &Markdown).scan(text, &mut reject);

        assert_eq!(out, "```hcl\nA = 1\n```\n```hcl\nbad\n```\n");
        assert_eq!(stats.error_blocks, 1);
        assert_eq!(stats.block_count, 2);
    }

    #[test]
    fn test_rst_transform_sees_dedented_text() {
        let text = ".. code:: terraform\n\n    resource \"a\" \"b\" {\n      x = 1\n    }\n\nAfter\n";
        let mut seen = String::new();
        let mut record = |block: &Block| -> Result<String, String> {
            seen = block.text.clone();
            Ok(block.text.replace("x = 1", "x   = 1"))
        };

        let (out, stats) =
            LineScanner::new("doc.rst", &RestructuredText).scan(text, &mut record);

        assert_eq!(seen, "\nresource \"a\" \"b\" {\n  x = 1\n}\n\n");
        assert_eq!(
            out,
            ".. code:: terraform\n\n    resource \"a\" \"b\" {\n      x   = 1\n    }\n\nAfter\n"
        );
        assert_eq!(stats.block_count, 1);
    }
}
