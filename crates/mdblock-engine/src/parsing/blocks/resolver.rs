//! # Block structure resolution
//!
//! Given a document and a line, computes the full extent of the block rooted
//! there. Resolution order:
//!
//! 1. Fenced regions (code and math) claim every line between their fences.
//! 2. The line's own classification decides the rest: list items take their
//!    subtree, quoted lines resolve to a list item inside the quote, a
//!    container (blockquote or callout) when they head one, or a single-line
//!    paragraph otherwise. Tables merge contiguous rows. Headings, rules and
//!    paragraphs are single lines.
//!
//! Blank and out-of-range lines resolve to nothing. Malformed markdown never
//! errors; the worst case is a range that is too small.

use log::trace;

use crate::document::Document;

use super::classify::{classify, indent_width, leading_whitespace};
use super::containers::{container_range, is_container_header};
use super::fences::{FencedRegion, fenced_region_at, fenced_regions};
use super::lists::{own_end, subtree_end};
use super::sections::section_range;
use super::tables::table_range;
use super::types::{Block, BlockType};

/// Builds a [`Block`] from a 1-indexed inclusive line range.
fn to_block(doc: &Document, block_type: BlockType, start: usize, end: usize) -> Option<Block> {
    let first = doc.line(start)?;
    let last = doc.line(end)?;
    let indent = indent_width(leading_whitespace(&first.text), doc.tab_size());
    Some(Block {
        block_type,
        start_line: start - 1,
        end_line: end - 1,
        from: first.from(),
        to: last.to(),
        indent_level: indent / doc.tab_size(),
        content: doc.slice(first.span.cover(last.span)),
    })
}

fn detect_with_fence(
    doc: &Document,
    line_number: usize,
    fence: Option<FencedRegion>,
) -> Option<Block> {
    if let Some(region) = fence {
        let block_type = if region.kind.is_math() {
            BlockType::MathBlock
        } else {
            BlockType::CodeBlock
        };
        trace!("line {line_number} inside {block_type:?} {}-{}", region.start, region.end);
        return to_block(doc, block_type, region.start, region.end);
    }

    let text = doc.line_text(line_number)?;
    let parsed = doc.parsed_line(line_number)?;

    if parsed.quote_depth > 0 {
        if parsed.is_list_item {
            let end = subtree_end(doc, line_number, &parsed);
            return to_block(doc, BlockType::ListItem, line_number, end);
        }
        if is_container_header(doc, line_number, &parsed) {
            let (block_type, end) = container_range(doc, line_number, &parsed);
            trace!("line {line_number} heads {block_type:?} ending at {end}");
            return to_block(doc, block_type, line_number, end);
        }
        return to_block(doc, BlockType::Paragraph, line_number, line_number);
    }

    match classify(text) {
        BlockType::Unknown => None,
        BlockType::ListItem => {
            let end = subtree_end(doc, line_number, &parsed);
            to_block(doc, BlockType::ListItem, line_number, end)
        }
        BlockType::Table => {
            let (start, end) = table_range(doc, line_number);
            to_block(doc, BlockType::Table, start, end)
        }
        other => to_block(doc, other, line_number, line_number),
    }
}

/// Resolves the block containing the 1-indexed `line_number`.
pub fn detect_block(doc: &Document, line_number: usize) -> Option<Block> {
    if line_number == 0 || line_number > doc.line_count() {
        return None;
    }
    detect_with_fence(doc, line_number, fenced_region_at(doc, line_number))
}

/// Every block of the document, scanning forward. Lines that resolve to no
/// block (blank lines) are skipped one at a time.
pub fn all_blocks(doc: &Document) -> Vec<Block> {
    let regions = fenced_regions(doc);
    let mut blocks = Vec::new();
    let mut line = 1;
    while line <= doc.line_count() {
        let fence = regions.iter().find(|r| r.contains(line)).copied();
        match detect_with_fence(doc, line, fence) {
            Some(block) => {
                line = (block.last_line_number() + 1).max(line + 1);
                blocks.push(block);
            }
            None => line += 1,
        }
    }
    blocks
}

/// The list item at `line_number` without its nested children, for placing
/// a handle on the item's own text.
pub fn list_item_own_range(doc: &Document, line_number: usize) -> Option<Block> {
    if fenced_region_at(doc, line_number).is_some() {
        return None;
    }
    let parsed = doc.parsed_line(line_number)?;
    if !parsed.is_list_item {
        return None;
    }
    let end = own_end(doc, line_number, &parsed);
    to_block(doc, BlockType::ListItem, line_number, end)
}

/// The blockquote or callout whose range covers `line_number`, found by
/// walking up the quoted lines to their header.
pub fn quote_container_at(doc: &Document, line_number: usize) -> Option<Block> {
    if doc.parsed_line(line_number)?.quote_depth == 0 {
        return None;
    }
    (1..=line_number)
        .rev()
        .take_while(|&i| doc.parsed_line(i).is_some_and(|p| p.quote_depth > 0))
        .filter_map(|i| detect_block(doc, i))
        .find(|b| b.block_type.is_quote_like() && b.contains_line_number(line_number))
}

/// A heading block extended over its whole section.
pub fn heading_section_range(doc: &Document, line_number: usize) -> Option<Block> {
    let (start, end) = section_range(doc, line_number)?;
    to_block(doc, BlockType::Heading, start, end)
}

/// The block a drag started on `line_number` should carry. A folded heading
/// carries its whole section.
pub fn draggable_block_at(
    doc: &Document,
    line_number: usize,
    heading_folded: bool,
) -> Option<Block> {
    let block = detect_block(doc, line_number)?;
    if heading_folded && block.block_type == BlockType::Heading {
        return heading_section_range(doc, line_number).or(Some(block));
    }
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn range(doc: &str, line: usize) -> Option<(BlockType, usize, usize)> {
        let doc = Document::new(doc);
        detect_block(&doc, line).map(|b| (b.block_type, b.start_line, b.end_line))
    }

    #[test]
    fn nested_list_scenario() {
        let text = "- a\n  - b\n- c";
        assert_eq!(range(text, 1), Some((BlockType::ListItem, 0, 1)));
        assert_eq!(range(text, 3), Some((BlockType::ListItem, 2, 2)));
    }

    #[rstest]
    #[case::blank("a\n\nb", 2, None)]
    #[case::zero("a", 0, None)]
    #[case::past_end("a", 2, None)]
    #[case::heading("# H\ntext", 1, Some((BlockType::Heading, 0, 0)))]
    #[case::rule("---", 1, Some((BlockType::HorizontalRule, 0, 0)))]
    #[case::paragraph_is_one_line("a\nb", 2, Some((BlockType::Paragraph, 1, 1)))]
    #[case::code_body("```\n# x\n```", 2, Some((BlockType::CodeBlock, 0, 2)))]
    #[case::code_close("```\nx\n```", 3, Some((BlockType::CodeBlock, 0, 2)))]
    #[case::math("$$\nx\n$$", 2, Some((BlockType::MathBlock, 0, 2)))]
    #[case::inline_math("$$ x $$\ny", 1, Some((BlockType::MathBlock, 0, 0)))]
    #[case::table_middle("| a |\n| b |\n| c |", 2, Some((BlockType::Table, 0, 2)))]
    #[case::quote("> a\n> b", 1, Some((BlockType::Blockquote, 0, 1)))]
    #[case::quote_continuation("> a\n> b", 2, Some((BlockType::Paragraph, 1, 1)))]
    #[case::callout("> [!note]\n> b", 1, Some((BlockType::Callout, 0, 1)))]
    #[case::quoted_list("> - a\n>   - b\n> - c", 1, Some((BlockType::ListItem, 0, 1)))]
    fn detects(
        #[case] text: &str,
        #[case] line: usize,
        #[case] expected: Option<(BlockType, usize, usize)>,
    ) {
        assert_eq!(range(text, line), expected);
    }

    #[test]
    fn block_carries_offsets_content_and_indent() {
        let doc = Document::new("intro\n    - a\n      - b\n");
        let block = detect_block(&doc, 2).unwrap();
        assert_eq!(block.from, 6);
        assert_eq!(block.to, doc.len() - 1);
        assert_eq!(block.content, "    - a\n      - b");
        assert_eq!(block.indent_level, 1);
    }

    #[test]
    fn all_blocks_skips_blank_lines() {
        let doc = Document::new("# T\n\n- a\n  - b\n\n> q\n> r\n\n| x |\n| y |\n");
        let kinds: Vec<_> = all_blocks(&doc)
            .into_iter()
            .map(|b| (b.block_type, b.start_line, b.end_line))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (BlockType::Heading, 0, 0),
                (BlockType::ListItem, 2, 3),
                (BlockType::Blockquote, 5, 6),
                (BlockType::Table, 8, 9),
            ]
        );
    }

    #[test]
    fn own_range_excludes_children() {
        let doc = Document::new("- a\n  - b\n- c");
        let own = list_item_own_range(&doc, 1).unwrap();
        assert_eq!((own.start_line, own.end_line), (0, 0));
        assert!(list_item_own_range(&doc, 0).is_none());
    }

    #[test]
    fn quote_container_covers_body_lines() {
        let doc = Document::new("text\n> [!note] t\n> a\n> b\n\n> other");
        let block = quote_container_at(&doc, 4).unwrap();
        assert_eq!(block.block_type, BlockType::Callout);
        assert_eq!((block.start_line, block.end_line), (1, 3));
        assert!(quote_container_at(&doc, 1).is_none());
        assert_eq!(quote_container_at(&doc, 6).unwrap().start_line, 5);
    }

    #[test]
    fn folded_heading_carries_section() {
        let doc = Document::new("# A\nbody\n# B");
        let folded = draggable_block_at(&doc, 1, true).unwrap();
        assert_eq!((folded.start_line, folded.end_line), (0, 1));
        let open = draggable_block_at(&doc, 1, false).unwrap();
        assert_eq!((open.start_line, open.end_line), (0, 0));
    }
}
