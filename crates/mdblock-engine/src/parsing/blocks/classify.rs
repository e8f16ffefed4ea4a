//! # Line classification
//!
//! Pure, context-free facts about a single line: its block type tag, its
//! blockquote prefix and its list marker. Everything that needs neighbouring
//! lines lives in the resolver.

use super::kinds::{BlockQuote, CodeFence, FenceKind, Heading, ListMarker, MarkerType, Table, ThematicBreak};
use super::types::BlockType;

/// Tab size used when a caller passes zero.
pub const DEFAULT_TAB_SIZE: usize = 4;

pub(crate) fn effective_tab_size(tab_size: usize) -> usize {
    if tab_size == 0 { DEFAULT_TAB_SIZE } else { tab_size }
}

/// Tags a line with its block type, judged on its left-trimmed text.
///
/// Precedence: heading, list marker, code fence, math fence, blockquote,
/// table row, horizontal rule, blank, paragraph. Never fails.
pub fn classify(line: &str) -> BlockType {
    let t = line.trim_start();
    if t.is_empty() {
        return BlockType::Unknown;
    }
    if Heading::level(t).is_some() {
        return BlockType::Heading;
    }
    if ListMarker::parse(t).is_some() {
        return BlockType::ListItem;
    }
    match CodeFence::sig(t) {
        Some(FenceKind::Math) => return BlockType::MathBlock,
        Some(_) => return BlockType::CodeBlock,
        None => {}
    }
    if t.starts_with(BlockQuote::PREFIX) {
        return BlockType::Blockquote;
    }
    if Table::is_row(t) {
        return BlockType::Table;
    }
    if ThematicBreak::matches(t) {
        return BlockType::HorizontalRule;
    }
    BlockType::Paragraph
}

/// Width of a run of indentation; each tab counts `tab_size` columns.
pub fn indent_width(indent: &str, tab_size: usize) -> usize {
    let tab = effective_tab_size(tab_size);
    indent
        .chars()
        .map(|c| if c == '\t' { tab } else { 1 })
        .sum()
}

/// The leading whitespace of `s`.
pub fn leading_whitespace(s: &str) -> &str {
    &s[..s.len() - s.trim_start().len()]
}

/// A line split into quote prefix, indentation, list marker and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// The full `>` prefix including its spacing, e.g. `"> > "`.
    pub quote_prefix: &'a str,
    pub quote_depth: usize,
    /// Everything after the quote prefix.
    pub rest: &'a str,
    pub is_list_item: bool,
    /// Leading whitespace of `rest`.
    pub indent_raw: &'a str,
    pub indent_width: usize,
    /// The list marker with trailing whitespace, empty when not a list item.
    pub marker: &'a str,
    /// Meaningful only when `is_list_item`; non-list lines report `Unordered`.
    pub marker_type: MarkerType,
    /// Text after the marker (or after the indentation for non-list lines).
    pub content: &'a str,
}

impl ParsedLine<'_> {
    pub fn is_blank(&self) -> bool {
        self.rest.trim().is_empty()
    }

    pub fn is_ordered_item(&self) -> bool {
        self.is_list_item && self.marker_type == MarkerType::Ordered
    }
}

/// Splits a line into its quote prefix and the remainder.
pub fn split_quote_prefix(line: &str) -> (&str, usize, &str) {
    let (depth, idx) = BlockQuote::strip_prefixes(line);
    (&line[..idx], depth, &line[idx..])
}

/// Parses indentation and list marker of an unquoted line.
pub fn parse_list_line(rest: &str, tab_size: usize) -> ParsedLine<'_> {
    let indent_raw = leading_whitespace(rest);
    let after_indent = &rest[indent_raw.len()..];
    let marker = ListMarker::parse(after_indent);
    let (marker_text, marker_type) = match &marker {
        Some(m) => (m.text, m.marker_type),
        None => ("", MarkerType::Unordered),
    };
    ParsedLine {
        quote_prefix: "",
        quote_depth: 0,
        rest,
        is_list_item: marker.is_some(),
        indent_raw,
        indent_width: indent_width(indent_raw, tab_size),
        marker: marker_text,
        marker_type,
        content: &after_indent[marker_text.len()..],
    }
}

/// Quote prefix first, then list parsing on the remainder.
pub fn parse_line_with_quote(line: &str, tab_size: usize) -> ParsedLine<'_> {
    let (quote_prefix, quote_depth, rest) = split_quote_prefix(line);
    ParsedLine {
        quote_prefix,
        quote_depth,
        ..parse_list_line(rest, tab_size)
    }
}
