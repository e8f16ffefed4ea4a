//! Blockquote and callout containers.
//!
//! A quoted line opens a container when the line before it is blank, absent,
//! or quoted less deeply, or when it carries a callout title (`> [!note]`).
//! The container runs while following lines stay at least as deep; a callout
//! title at the container's own depth starts the next container.

use crate::document::Document;

use super::classify::ParsedLine;
use super::kinds::BlockQuote;
use super::types::BlockType;

pub(crate) fn is_container_header(doc: &Document, line: usize, parsed: &ParsedLine<'_>) -> bool {
    if parsed.quote_depth == 0 {
        return false;
    }
    if BlockQuote::is_callout_title(parsed.rest) {
        return true;
    }
    if line <= 1 || doc.is_blank_line(line - 1) {
        return true;
    }
    doc.parsed_line(line - 1)
        .is_none_or(|prev| prev.quote_depth < parsed.quote_depth)
}

/// Type and last line (1-indexed) of the container headed at `line`.
pub(crate) fn container_range(
    doc: &Document,
    line: usize,
    header: &ParsedLine<'_>,
) -> (BlockType, usize) {
    let depth = header.quote_depth;
    let block_type = if BlockQuote::is_callout_title(header.rest) {
        BlockType::Callout
    } else {
        BlockType::Blockquote
    };

    let mut end = line;
    for i in line + 1..=doc.line_count() {
        let Some(p) = doc.parsed_line(i) else { break };
        if p.quote_depth < depth {
            break;
        }
        if p.quote_depth == depth && BlockQuote::is_callout_title(p.rest) {
            break;
        }
        end = i;
    }
    (block_type, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn header_range(text: &str, line: usize) -> Option<(BlockType, usize)> {
        let doc = Document::new(text);
        let p = doc.parsed_line(line).unwrap();
        is_container_header(&doc, line, &p).then(|| container_range(&doc, line, &p))
    }

    #[rstest]
    #[case::simple("> a\n> b\nc", 1, Some((BlockType::Blockquote, 2)))]
    #[case::nested_lines_included("> a\n> > b\n> c", 1, Some((BlockType::Blockquote, 3)))]
    #[case::nested_header("> a\n> > b\n> c", 2, Some((BlockType::Blockquote, 2)))]
    #[case::continuation_is_not_header("> a\n> b", 2, None)]
    #[case::blank_line_ends_container("> a\n\n> b", 1, Some((BlockType::Blockquote, 1)))]
    #[case::after_blank_is_header("> a\n\n> b", 3, Some((BlockType::Blockquote, 3)))]
    #[case::after_blank_starts_new_quote("> a\n\n> b\n> c", 3, Some((BlockType::Blockquote, 4)))]
    #[case::callout("> [!note] Title\n> body\n>\n> more", 1, Some((BlockType::Callout, 4)))]
    #[case::callout_after_quote("> a\n> [!tip] T\n> b", 2, Some((BlockType::Callout, 3)))]
    #[case::callout_ends_callout("> [!note] A\n> x\n> [!tip] B", 1, Some((BlockType::Callout, 2)))]
    fn container_headers(
        #[case] text: &str,
        #[case] line: usize,
        #[case] expected: Option<(BlockType, usize)>,
    ) {
        assert_eq!(header_range(text, line), expected);
    }
}
