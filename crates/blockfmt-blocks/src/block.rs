//! Block model, run statistics and the transform callback

use std::fmt::Display;

use serde::Serialize;

/// One embedded block found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// 1-based position of the block in discovery order.
    pub index: usize,
    /// Line of the opening marker (or opening quote of a Go literal).
    pub start_line: usize,
    /// Line of the closing marker (or closing quote of a Go literal).
    pub end_line: usize,
    /// Logical block content, already unquoted and dedented.
    pub text: String,
}

impl Block {
    /// Number of lines in the block's text.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// Counters collected while processing one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub line_count: usize,
    pub block_count: usize,
    pub block_line_count: usize,
    pub error_blocks: usize,
}

impl Stats {
    pub fn has_errors(&self) -> bool {
        self.error_blocks > 0
    }
}

/// Turns a block's text into the text written back in its place.
///
/// An `Err` leaves the block's original bytes untouched; the error is logged
/// and counted but does not stop the run.
pub trait BlockTransform {
    type Error: Display;

    fn transform(&mut self, block: &Block) -> Result<String, Self::Error>;
}

impl<F, E> BlockTransform for F
where
    F: FnMut(&Block) -> Result<String, E>,
    E: Display,
{
    type Error = E;

    fn transform(&mut self, block: &Block) -> Result<String, E> {
        self(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_line_count() {
        let block = Block {
            index: 1,
            start_line: 3,
            end_line: 7,
            text: "a = 1\nb = 2\nc = 3\n".to_string(),
        };
        assert_eq!(block.line_count(), 3);
    }

    #[test]
    fn test_closure_transform() {
        let mut calls = 0;
        let mut transform = |block: &Block| -> Result<String, String> {
            calls += 1;
            Ok(block.text.to_uppercase())
        };
        let block = Block {
            index: 1,
            start_line: 1,
            end_line: 3,
            text: "a = 1\n".to_string(),
        };
        assert_eq!(transform.transform(&block).unwrap(), "A = 1\n");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_stats_serialize_field_names() {
        let stats = Stats {
            line_count: 10,
            block_count: 2,
            block_line_count: 4,
            error_blocks: 1,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["line_count"], 10);
        assert_eq!(json["error_blocks"], 1);
        assert!(stats.has_errors());
    }
}
