//! List context: the reference item a moved block is re-indented against,
//! indentation helpers, and the navigation a host needs to offer nest and
//! unnest targets without any geometry.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::parsing::blocks::classify::{effective_tab_size, parse_line_with_quote};
use crate::parsing::blocks::kinds::ListMarker;
use crate::parsing::blocks::{MarkerType, ParsedLine};

/// The list item a moved block is measured against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListContext {
    /// 1-indexed line the context item sits on.
    pub line_number: usize,
    pub indent_width: usize,
    pub indent_raw: String,
    pub marker_type: MarkerType,
}

/// Caller overrides for where a list block should land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListIntent {
    /// Measure against this line instead of the target line.
    pub context_line: Option<usize>,
    /// Nest (positive) or unnest (negative) by this many indent units.
    pub indent_step: Option<isize>,
    /// Land at exactly this indent width.
    pub target_indent_width: Option<usize>,
}

impl ListIntent {
    /// Whether the intent asks for a change of indentation.
    pub fn resizes(&self) -> bool {
        self.indent_step.is_some() || self.target_indent_width.is_some()
    }
}

/// The list item on `line`, or failing that on the line before it.
pub fn list_context_at(doc: &Document, line: usize) -> Option<ListContext> {
    [Some(line), line.checked_sub(1)]
        .into_iter()
        .flatten()
        .filter(|&n| n >= 1)
        .find_map(|n| {
            let p = doc.parsed_line(n)?;
            p.is_list_item.then(|| ListContext {
                line_number: n,
                indent_width: p.indent_width,
                indent_raw: p.indent_raw.to_string(),
                marker_type: p.marker_type,
            })
        })
}

/// Width of one nesting step implied by an indentation sample.
pub fn indent_unit_width(sample: &str, tab_size: usize) -> usize {
    let tab = effective_tab_size(tab_size);
    if sample.contains('\t') || sample.len() >= tab {
        tab
    } else if sample.is_empty() {
        tab
    } else {
        sample.len()
    }
}

/// Indentation of `width` columns in the style of `sample`: tabs when the
/// sample uses tabs, spaces otherwise. Negative widths produce nothing.
pub fn build_indent_string(sample: &str, width: isize, tab_size: usize) -> String {
    let Ok(width) = usize::try_from(width) else {
        return String::new();
    };
    if width == 0 {
        return String::new();
    }
    if sample.contains('\t') {
        let tab = effective_tab_size(tab_size);
        let tabs = (width as f64 / tab as f64).round() as usize;
        return "\t".repeat(tabs);
    }
    " ".repeat(width)
}

/// Marker for an item moving into a list of `target` type. Ordered items
/// restart at 1 for renumbering; task items keep their checkbox only when
/// they already were tasks.
pub fn build_target_marker(target: MarkerType, source: &ParsedLine<'_>) -> String {
    match target {
        MarkerType::Ordered => ListMarker::ordered(1),
        MarkerType::Task => {
            let checked = ListMarker::parse(source.marker).is_some_and(|m| m.is_checked());
            if checked {
                ListMarker::CHECKED_TASK.to_string()
            } else {
                ListMarker::UNCHECKED_TASK.to_string()
            }
        }
        MarkerType::Unordered => ListMarker::BULLET.to_string(),
    }
}

/// Indentation of the first list item in a moved text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceListBase {
    pub indent_width: usize,
    pub indent_raw: String,
    pub marker_type: MarkerType,
}

pub fn source_list_base(text: &str, tab_size: usize) -> Option<SourceListBase> {
    text.split('\n')
        .map(|line| parse_line_with_quote(line, tab_size))
        .find(|p| p.is_list_item)
        .map(|p| SourceListBase {
            indent_width: p.indent_width,
            indent_raw: p.indent_raw.to_string(),
            marker_type: p.marker_type,
        })
}

/// Where a list block will land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListIndentPlan {
    /// Change in indent width applied to the block.
    pub indent_delta: isize,
    pub target_indent_width: usize,
    pub context: Option<ListContext>,
    /// Raw indentation whose style rebuilt indents follow.
    pub indent_sample: String,
}

impl ListIndentPlan {
    pub fn context_line_number(&self) -> Option<usize> {
        self.context.as_ref().map(|c| c.line_number)
    }
}

/// Deepest indentation a plan will produce for a block's first item.
pub const MAX_INDENT_WIDTH: isize = 1024;

/// Indent change for a list block whose first item sits at `base`, dropped
/// before `target_line` with the given intent.
///
/// The context item (override line, else the target line, else the line
/// before it) sets the landing width; an indent step nudges it by whole
/// indent units and an explicit width replaces it.
pub fn compute_list_indent_plan(
    doc: &Document,
    base: &SourceListBase,
    target_line: usize,
    intent: &ListIntent,
) -> ListIndentPlan {
    let context = list_context_at(doc, intent.context_line.unwrap_or(target_line));
    let indent_sample = context
        .as_ref()
        .map_or_else(|| base.indent_raw.clone(), |c| c.indent_raw.clone());
    let unit_sample = if indent_sample.is_empty() {
        base.indent_raw.as_str()
    } else {
        indent_sample.as_str()
    };
    let unit = indent_unit_width(unit_sample, doc.tab_size()) as isize;
    let base_width = base.indent_width as isize;
    let context_width = context.as_ref().map_or(0, |c| c.indent_width as isize);

    let target_width = match intent.target_indent_width {
        Some(width) => isize::try_from(width).unwrap_or(isize::MAX),
        None => {
            let step = intent.indent_step.unwrap_or(0).saturating_mul(unit);
            context_width.saturating_add(step)
        }
    };
    let target_width = target_width.clamp(0, MAX_INDENT_WIDTH);
    let indent_delta = target_width - base_width;
    ListIndentPlan {
        indent_delta,
        target_indent_width: target_width as usize,
        context,
        indent_sample,
    }
}

fn list_line(doc: &Document, line: usize) -> Option<ParsedLine<'_>> {
    doc.parsed_line(line).filter(|p| p.is_list_item)
}

/// Indent width of the list item on `line`.
pub fn list_indent_width_at_line(doc: &Document, line: usize) -> Option<usize> {
    list_line(doc, line).map(|p| p.indent_width)
}

/// The nearest list item above `line` that is indented less than it.
pub fn parent_list_line(doc: &Document, line: usize) -> Option<usize> {
    let current = list_line(doc, line)?.indent_width;
    (1..line)
        .rev()
        .filter_map(|i| list_line(doc, i).map(|p| (i, p.indent_width)))
        .find(|&(_, width)| width < current)
        .map(|(i, _)| i)
}

/// The list item at or above `line` followed by each successively shallower
/// ancestor, innermost first. A non-list line ends the walk once an item has
/// been found.
pub fn list_ancestor_lines(doc: &Document, line: usize) -> Vec<usize> {
    let mut result = Vec::new();
    let mut current: Option<usize> = None;
    for i in (1..=line.min(doc.line_count())).rev() {
        if doc.is_blank_line(i) {
            continue;
        }
        let Some(p) = list_line(doc, i) else {
            if current.is_some() {
                break;
            }
            continue;
        };
        if current.is_none_or(|width| p.indent_width < width) {
            current = Some(p.indent_width);
            result.push(i);
        }
    }
    result
}

/// Indent width a child of the item on `line` would take: that of its first
/// existing child, else one tab stop deeper.
pub fn list_child_indent_width(doc: &Document, line: usize) -> Option<usize> {
    let parent = list_line(doc, line)?.indent_width;
    for i in line + 1..=doc.line_count() {
        if doc.is_blank_line(i) {
            continue;
        }
        match list_line(doc, i) {
            Some(p) if p.indent_width > parent => return Some(p.indent_width),
            _ => break,
        }
    }
    Some(parent + doc.tab_size())
}

/// Smallest indent increase between consecutive list items (at least 2),
/// or the tab size when the document never nests a list.
pub fn indent_unit_width_for_doc(doc: &Document) -> usize {
    let mut best: Option<usize> = None;
    let mut prev: Option<usize> = None;
    for i in 1..=doc.line_count() {
        let Some(p) = list_line(doc, i) else { continue };
        if let Some(prev) = prev {
            if p.indent_width > prev {
                let delta = p.indent_width - prev;
                best = Some(best.map_or(delta, |b| b.min(delta)));
            }
        }
        prev = Some(p.indent_width);
    }
    best.map_or(doc.tab_size(), |b| b.max(2))
}

/// How a list drop relates to the item it is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListDropMode {
    /// Nest under the item.
    Child,
    /// Become a sibling of the item.
    Same,
}

/// One way of landing a list block near a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDropTarget {
    pub line_number: usize,
    pub indent_width: usize,
    pub mode: ListDropMode,
}

impl ListDropTarget {
    pub fn intent(&self) -> ListIntent {
        ListIntent {
            context_line: Some(self.line_number),
            indent_step: None,
            target_indent_width: Some(self.indent_width),
        }
    }
}

/// Every list landing available at `line`, innermost first: for each
/// ancestor, nesting under it and then standing beside it. Hosts pick one by
/// pointer position.
pub fn list_drop_targets(doc: &Document, line: usize) -> Vec<ListDropTarget> {
    let mut out = Vec::new();
    for ancestor in list_ancestor_lines(doc, line) {
        if let Some(width) = list_child_indent_width(doc, ancestor) {
            out.push(ListDropTarget {
                line_number: ancestor,
                indent_width: width,
                mode: ListDropMode::Child,
            });
        }
        if let Some(width) = list_indent_width_at_line(doc, ancestor) {
            out.push(ListDropTarget {
                line_number: ancestor,
                indent_width: width,
                mode: ListDropMode::Same,
            });
        }
    }
    out
}
