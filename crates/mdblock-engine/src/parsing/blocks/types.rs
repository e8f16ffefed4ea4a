use serde::{Deserialize, Serialize};

use crate::parsing::rope::Span;

/// Structural type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    Paragraph,
    Heading,
    ListItem,
    CodeBlock,
    Blockquote,
    Table,
    MathBlock,
    Callout,
    HorizontalRule,
    Unknown,
}

impl BlockType {
    /// Blocks whose inner lines are raw text that must never be re-quoted or
    /// entered by another block.
    pub fn is_raw_zone(self) -> bool {
        matches!(
            self,
            BlockType::CodeBlock | BlockType::Table | BlockType::MathBlock
        )
    }

    pub fn is_quote_like(self) -> bool {
        matches!(self, BlockType::Blockquote | BlockType::Callout)
    }
}

/// A resolved block: its type, inclusive 0-indexed line range and byte span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// 0-indexed first line.
    pub start_line: usize,
    /// 0-indexed last line, inclusive.
    pub end_line: usize,
    pub from: usize,
    pub to: usize,
    pub indent_level: usize,
    /// The block's source text, lines joined with `\n`.
    pub content: String,
}

impl Block {
    pub fn span(&self) -> Span {
        Span::new(self.from, self.to)
    }

    /// 1-indexed first line.
    pub fn first_line_number(&self) -> usize {
        self.start_line + 1
    }

    /// 1-indexed last line.
    pub fn last_line_number(&self) -> usize {
        self.end_line + 1
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Whether a 1-indexed line lies inside the block.
    pub fn contains_line_number(&self, line_number: usize) -> bool {
        (self.first_line_number()..=self.last_line_number()).contains(&line_number)
    }
}
