//! # Text mutation
//!
//! Rewrites a moved block's text for its landing site: blockquote depth
//! first, then list indentation and markers, then blank-line padding.
//! Everything here is a pure function of the document snapshot and the
//! block's text.

use crate::document::Document;
use crate::parsing::blocks::kinds::BlockQuote;
use crate::parsing::blocks::{BlockType, parse_line_with_quote, split_quote_prefix};

use super::lists::{
    ListIntent, build_indent_string, build_target_marker, compute_list_indent_plan,
    source_list_base,
};
use super::policy::{adjacent_lines, boundary_spacing};

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Quote depth of the first non-blank line of `text`.
pub fn content_quote_depth(text: &str) -> usize {
    text.split('\n')
        .find(|l| !is_blank(l))
        .map_or(0, |l| split_quote_prefix(l).1)
}

/// Quote depth a block landing before line `target` joins: that of the line
/// directly above, zero when it is blank or missing.
pub fn quote_depth_context(doc: &Document, target: usize) -> usize {
    target
        .checked_sub(1)
        .and_then(|n| doc.line_text(n))
        .filter(|t| !is_blank(t))
        .map_or(0, |t| split_quote_prefix(t).1)
}

/// Adds or strips quote levels on every line (blank ones included) so the
/// text moves from `base` depth to `target`. `base` defaults to the depth of
/// the first non-blank line.
pub fn adjust_blockquote_depth(text: &str, target: usize, base: Option<usize>) -> String {
    let base = base.unwrap_or_else(|| content_quote_depth(text));
    if target == base {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| {
            if target > base {
                format!("{}{line}", BlockQuote::LEVEL.repeat(target - base))
            } else {
                BlockQuote::strip_levels(line, base - target).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Re-indents a list block for the list context at `target` and rewrites
/// the markers of its top-level items to the context's marker type.
///
/// Text without list items is returned as is. So is a block that already
/// sits at the context's width with the context's marker type.
pub fn adjust_list_to_target_context(
    doc: &Document,
    text: &str,
    target: usize,
    intent: &ListIntent,
) -> String {
    let tab_size = doc.tab_size();
    let Some(base) = source_list_base(text, tab_size) else {
        return text.to_string();
    };
    let plan = compute_list_indent_plan(doc, &base, target, intent);
    let context_type = plan.context.as_ref().map(|c| c.marker_type);
    let delta = plan.indent_delta;
    if delta == 0 && context_type.is_none_or(|t| t == base.marker_type) {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| {
            if is_blank(line) {
                return line.to_string();
            }
            let parsed = parse_line_with_quote(line, tab_size);
            let after_indent = &parsed.rest[parsed.indent_raw.len()..];
            let indent = if delta == 0 {
                parsed.indent_raw.to_string()
            } else {
                build_indent_string(
                    &plan.indent_sample,
                    (parsed.indent_width as isize).saturating_add(delta),
                    tab_size,
                )
            };

            if !parsed.is_list_item {
                if delta == 0 || parsed.indent_width < base.indent_width {
                    return line.to_string();
                }
                return format!("{}{indent}{after_indent}", parsed.quote_prefix);
            }

            let marker = match context_type {
                Some(t) if parsed.indent_width == base.indent_width => {
                    if delta == 0 && parsed.marker_type == t {
                        parsed.marker.to_string()
                    } else {
                        build_target_marker(t, &parsed)
                    }
                }
                _ => parsed.marker.to_string(),
            };
            format!("{}{indent}{marker}{}", parsed.quote_prefix, parsed.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The exact text to insert for a block of `source_type` landing before
/// line `target`, terminated by one newline (two when a trailing blank line
/// is needed).
///
/// Code, table and math blocks keep their quoting. A blockquote moving to a
/// shallower context keeps one level of its own.
pub fn build_insert_text(
    doc: &Document,
    source_type: BlockType,
    content: &str,
    target: usize,
    intent: &ListIntent,
) -> String {
    let (prev, next) = adjacent_lines(doc, target);
    let spacing = boundary_spacing(source_type, content, prev, next);

    let mut text = if source_type.is_raw_zone() {
        content.to_string()
    } else {
        let target_depth = if spacing.reset_quote_depth {
            0
        } else {
            quote_depth_context(doc, target)
        };
        let source_depth = content_quote_depth(content);
        let effective = if source_type == BlockType::Blockquote && target_depth < source_depth {
            source_depth - 1
        } else {
            source_depth
        };
        adjust_blockquote_depth(content, target_depth, Some(effective))
    };
    text = adjust_list_to_target_context(doc, &text, target, intent);

    let trailing_blank = spacing.trailing_blank
        || (spacing.reset_quote_depth && next.is_none_or(|n| !is_blank(n)));
    if spacing.leading_blank {
        text.insert(0, '\n');
    }
    text.push('\n');
    if trailing_blank {
        text.push('\n');
    }
    text
}
