//! Syntax-tree locator for Go source
//!
//! Terraform blocks in Go live in string literals, usually acceptance test
//! fixtures passed to `fmt.Sprintf`. The source is parsed with tree-sitter
//! and every string literal whose content looks like a Terraform
//! declaration spanning several lines becomes a [`Block`].
//!
//! Rewrites are collected as byte-range edits during the walk and applied
//! afterwards, last to first, so bytes outside the rewritten literals are
//! never touched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error};
use tree_sitter::{Node, Parser};

use crate::block::{Block, BlockTransform, Stats};
use crate::error::{Error, Result};
use crate::quote::{self, QuoteStyle};

/// A `resource`/`data` declaration with type and name, or a
/// `variable`/`output` declaration with a name. Names may contain or consist
/// of fmt verbs.
static TERRAFORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(((resource|data)\s+"[-a-z0-9_]+")|(variable|output))\s+("[-a-zA-Z0-9_%\[\]]+"|%(\[\d+\])?q)\s+\{"#,
    )
    .expect("Invalid terraform declaration regex")
});

static LEADING_PADDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\n").expect("Invalid leading padding regex"));

static TRAILING_PADDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*$").expect("Invalid trailing padding regex"));

/// Whether `text` contains something that looks like a Terraform declaration.
pub fn looks_like_terraform(text: &str) -> bool {
    TERRAFORM.is_match(text)
}

struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// Rewrites Terraform blocks embedded in Go string literals.
pub struct GoScanner<'a> {
    file: &'a str,
}

impl<'a> GoScanner<'a> {
    /// `file` only names the document in errors and log output.
    pub fn new(file: &'a str) -> Self {
        Self { file }
    }

    /// Rewrite `source`, returning the new document and its statistics.
    ///
    /// Source that does not parse cleanly is rejected as a whole.
    pub fn scan<T>(&self, source: &str, transform: &mut T) -> Result<(String, Stats)>
    where
        T: BlockTransform + ?Sized,
    {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
        let tree = parser.parse(source, None).ok_or_else(|| Error::Parse {
            file: self.file.to_string(),
            message: "parser produced no syntax tree".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error(root).map_or(1, |node| node.start_position().row + 1);
            return Err(Error::Parse {
                file: self.file.to_string(),
                message: format!("syntax error at line {line}"),
            });
        }

        let mut walk = Walk {
            file: self.file,
            source,
            transform,
            stats: Stats::default(),
            edits: Vec::new(),
        };
        walk.visit(root);

        let Walk {
            mut stats, edits, ..
        } = walk;
        stats.line_count = source.lines().count();

        let mut out = source.to_string();
        for edit in edits.iter().rev() {
            out.replace_range(edit.range.clone(), &edit.replacement);
        }

        debug!(
            file = self.file,
            lines = stats.line_count,
            blocks = stats.block_count,
            edits = edits.len(),
            "scanned go source"
        );
        Ok((out, stats))
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

struct Walk<'s, 't, T: ?Sized> {
    file: &'s str,
    source: &'s str,
    transform: &'t mut T,
    stats: Stats,
    edits: Vec<Edit>,
}

impl<T> Walk<'_, '_, T>
where
    T: BlockTransform + ?Sized,
{
    fn visit(&mut self, node: Node<'_>) {
        if matches!(
            node.kind(),
            "interpreted_string_literal" | "raw_string_literal"
        ) {
            self.visit_literal(node);
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }

    fn visit_literal(&mut self, node: Node<'_>) {
        let range = node.byte_range();
        let literal = &self.source[range.clone()];
        let start_line = node.start_position().row + 1;

        let Some((style, value)) = quote::unquote(literal) else {
            debug!(file = self.file, line = start_line, "skipping undecodable string literal");
            return;
        };
        if !looks_like_terraform(&value) {
            return;
        }
        let trimmed = value.trim_matches([' ', '\t']);
        if !trimmed.strip_prefix('\n').unwrap_or(trimmed).contains('\n') {
            return;
        }

        self.stats.block_count += 1;
        let leading = LEADING_PADDING.find(&value).map_or("", |m| m.as_str());
        let trailing = TRAILING_PADDING
            .find(&value[leading.len()..])
            .map_or("", |m| m.as_str());
        let body = &value[leading.len()..value.len() - trailing.len()];

        let block = Block {
            index: self.stats.block_count,
            start_line,
            end_line: node.end_position().row + 1,
            text: format!("{body}\n"),
        };
        self.stats.block_line_count += block.line_count();

        let result = match self.transform.transform(&block) {
            Ok(result) => result,
            Err(e) => return self.fail(&block, &e),
        };
        if result == block.text {
            return;
        }

        let formatted = result.strip_suffix('\n').unwrap_or(&result);
        let value = format!("{leading}{formatted}{trailing}");
        let Some(replacement) = quote::quote(style, &value) else {
            return self.fail(
                &block,
                &"result contains a backtick and cannot be written as a raw string",
            );
        };
        if replacement != literal {
            self.edits.push(Edit { range, replacement });
        }
    }

    fn fail(&mut self, block: &Block, cause: &dyn std::fmt::Display) {
        self.stats.error_blocks += 1;
        error!(
            block = block.index,
            file = self.file,
            line = block.start_line,
            "block {} @ {}:{} failed to process with: {}",
            block.index,
            self.file,
            block.start_line,
            cause
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("resource \"aws_s3_bucket\" \"test\" {", true)]
    #[case("data \"aws_ami\" \"latest\" {", true)]
    #[case("variable \"region\" {", true)]
    #[case("output \"arn\" {", true)]
    #[case("resource \"aws_s3_bucket\" \"test-%[1]s\" {", true)]
    #[case("resource \"aws_s3_bucket\" %q {", true)]
    #[case("data \"aws_ami\" %[2]q {", true)]
    #[case("resource \"aws_s3_bucket\" {", false)]
    #[case("provider \"aws\" {", false)]
    #[case("locals {", false)]
    #[case("<xml resource=\"a\">", false)]
    fn test_looks_like_terraform(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(looks_like_terraform(text), expected);
    }

    fn identity(block: &Block) -> std::result::Result<String, String> {
        Ok(block.text.clone())
    }

    #[test]
    fn test_single_line_literal_is_not_a_block() {
        let source = "package x\n\nconst c = `resource \"a\" \"b\" {}`\n";
        let (out, stats) = GoScanner::new("x.go").scan(source, &mut identity).unwrap();
        assert_eq!(out, source);
        assert_eq!(stats.block_count, 0);
    }

    #[test]
    fn test_code_outside_blocks_is_not_reformatted() {
        let source = "package x\n\nfunc  config( )string{\n    return `\nresource \"a\" \"b\" {\n  x   = 1\n}\n`\n}\n";
        let mut squash = |block: &Block| -> std::result::Result<String, String> {
            Ok(block.text.replace("x   = 1", "x = 1"))
        };

        let (out, stats) = GoScanner::new("x.go").scan(source, &mut squash).unwrap();

        assert_eq!(stats.block_count, 1);
        assert_eq!(out, source.replace("x   = 1", "x = 1"));
    }

    #[test]
    fn test_parse_error_is_fatal() {
        let source = "package x\n\nfunc broken( {\n";
        let err = GoScanner::new("broken.go")
            .scan(source, &mut identity)
            .unwrap_err();
        assert!(matches!(err, Error::Parse { ref file, .. } if file == "broken.go"));
    }
}
