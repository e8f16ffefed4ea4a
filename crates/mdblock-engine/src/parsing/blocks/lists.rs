//! List item ranges.
//!
//! A list item's subtree is the item plus every line that belongs under it:
//! deeper items, paragraph continuations, and blank lines that are followed
//! by deeper content. Quoted list items are measured inside their quote
//! context; a line with a different quote depth ends the item.

use crate::document::Document;

use super::classify::{ParsedLine, classify};
use super::types::BlockType;

/// Which lines count as belonging to a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extent {
    /// The item and all of its descendants.
    Subtree,
    /// The item's own text only; nested items end the range.
    Own,
}

/// The next non-blank line after `line` in the same quote context. `None`
/// when the document ends or the quote context changes first.
fn next_content_line(doc: &Document, line: usize, quote_depth: usize) -> Option<ParsedLine<'_>> {
    for i in line + 1..=doc.line_count() {
        let p = doc.parsed_line(i)?;
        if p.quote_depth != quote_depth {
            return None;
        }
        if !p.is_blank() {
            return Some(p);
        }
    }
    None
}

fn item_end(doc: &Document, line: usize, root: &ParsedLine<'_>, extent: Extent) -> usize {
    let depth = root.quote_depth;
    let current = root.indent_width;
    let mut end = line;
    let mut saw_blank = false;

    for i in line + 1..=doc.line_count() {
        let Some(p) = doc.parsed_line(i) else { break };
        if p.quote_depth != depth {
            break;
        }

        if p.is_blank() {
            let continues = next_content_line(doc, i, depth).is_some_and(|next| {
                next.indent_width > current && (extent == Extent::Subtree || !next.is_list_item)
            });
            if !continues {
                break;
            }
            end = i;
            saw_blank = true;
            continue;
        }

        if p.is_list_item && (extent == Extent::Own || p.indent_width <= current) {
            break;
        }
        if !p.is_list_item && classify(p.rest) != BlockType::Paragraph {
            break;
        }
        if p.is_list_item || !saw_blank || p.indent_width > current {
            end = i;
            continue;
        }
        break;
    }

    while end > line && doc.is_blank_line(end) {
        end -= 1;
    }
    end
}

/// Last line (1-indexed) of the list item subtree rooted at `line`.
pub(crate) fn subtree_end(doc: &Document, line: usize, root: &ParsedLine<'_>) -> usize {
    item_end(doc, line, root, Extent::Subtree)
}

/// Last line (1-indexed) of the list item's own text, excluding children.
pub(crate) fn own_end(doc: &Document, line: usize, root: &ParsedLine<'_>) -> usize {
    item_end(doc, line, root, Extent::Own)
}
