//! # Insertion policy
//!
//! Decides whether a block may land at an insertion point and what padding
//! the landing needs. The decision table itself ([`resolve_insertion_rule`])
//! is pure; the rest of this module derives its inputs, the target container
//! and the relative position, from a document.
//!
//! ## The table
//!
//! | position | target container | outcome |
//! |---|---|---|
//! | inside | list / quote / callout | allowed only for a source of the same family |
//! | after | quote / callout, source not quote-like | leading blank line, quote depth reset |
//! | anything else | | allowed, no padding |

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::parsing::blocks::kinds::{BlockQuote, ListMarker, Table};
use crate::parsing::blocks::{Block, BlockType, detect_block, split_quote_prefix};

/// Where an insertion point sits relative to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertionPosition {
    Inside,
    Before,
    After,
    Boundary,
    Outside,
}

/// Block types that can contain other blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    List,
    Blockquote,
    Callout,
}

impl ContainerKind {
    pub fn of(block_type: BlockType) -> Option<Self> {
        match block_type {
            BlockType::ListItem => Some(ContainerKind::List),
            BlockType::Blockquote => Some(ContainerKind::Blockquote),
            BlockType::Callout => Some(ContainerKind::Callout),
            _ => None,
        }
    }

    pub fn is_quote_like(self) -> bool {
        matches!(self, ContainerKind::Blockquote | ContainerKind::Callout)
    }

    pub fn block_type(self) -> BlockType {
        match self {
            ContainerKind::List => BlockType::ListItem,
            ContainerKind::Blockquote => BlockType::Blockquote,
            ContainerKind::Callout => BlockType::Callout,
        }
    }
}

/// Family of the block being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFamily {
    List,
    Blockquote,
    Callout,
    Other,
}

impl SourceFamily {
    pub fn of(block_type: BlockType) -> Self {
        match ContainerKind::of(block_type) {
            Some(ContainerKind::List) => SourceFamily::List,
            Some(ContainerKind::Blockquote) => SourceFamily::Blockquote,
            Some(ContainerKind::Callout) => SourceFamily::Callout,
            None => SourceFamily::Other,
        }
    }

    fn matches(self, container: ContainerKind) -> bool {
        matches!(
            (self, container),
            (SourceFamily::List, ContainerKind::List)
                | (SourceFamily::Blockquote, ContainerKind::Blockquote)
                | (SourceFamily::Callout, ContainerKind::Callout)
        )
    }

    fn is_quote_like(self) -> bool {
        matches!(self, SourceFamily::Blockquote | SourceFamily::Callout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionRuleInput {
    pub source_type: BlockType,
    pub target_container: Option<ContainerKind>,
    pub position: InsertionPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionRuleDecision {
    pub allow_drop: bool,
    pub leading_blank: bool,
    pub trailing_blank: bool,
    pub reset_quote_depth: bool,
}

impl InsertionRuleDecision {
    pub const ALLOW: Self = Self {
        allow_drop: true,
        leading_blank: false,
        trailing_blank: false,
        reset_quote_depth: false,
    };
}

pub fn resolve_insertion_rule(input: InsertionRuleInput) -> InsertionRuleDecision {
    let family = SourceFamily::of(input.source_type);
    let mut decision = InsertionRuleDecision::ALLOW;

    let Some(target) = input.target_container else {
        return decision;
    };
    if input.position == InsertionPosition::Inside {
        decision.allow_drop = family.matches(target);
    }
    if target.is_quote_like() && input.position == InsertionPosition::After && !family.is_quote_like()
    {
        decision.leading_blank = true;
        decision.reset_quote_depth = true;
    }
    decision
}

/// A container block found around a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub kind: ContainerKind,
    pub block: Block,
}

/// How far around a line to look for a list item whose subtree covers it.
const LIST_SEARCH_RADIUS: usize = 8;

fn previous_non_blank(doc: &Document, from: usize) -> Option<usize> {
    (1..=from.min(doc.line_count()))
        .rev()
        .find(|&i| !doc.is_blank_line(i))
}

fn next_non_blank(doc: &Document, from: usize) -> Option<usize> {
    (from.max(1)..=doc.line_count()).find(|&i| !doc.is_blank_line(i))
}

/// The largest list item subtree within reach that covers `line`.
pub fn enclosing_list_block(doc: &Document, line: usize) -> Option<Block> {
    if line == 0 || line > doc.line_count() {
        return None;
    }
    let lo = line.saturating_sub(LIST_SEARCH_RADIUS).max(1);
    let hi = (line + LIST_SEARCH_RADIUS).min(doc.line_count());
    (lo..=hi)
        .filter_map(|ln| detect_block(doc, ln))
        .filter(|b| b.block_type == BlockType::ListItem && b.contains_line_number(line))
        .fold(None, |best: Option<Block>, b| match best {
            Some(best) if best.line_count() >= b.line_count() => Some(best),
            _ => Some(b),
        })
}

fn synthetic_line_block(doc: &Document, line: usize, block_type: BlockType) -> Option<Block> {
    let l = doc.line(line)?;
    Some(Block {
        block_type,
        start_line: line - 1,
        end_line: line - 1,
        from: l.from(),
        to: l.to(),
        indent_level: 0,
        content: l.text.clone(),
    })
}

/// The container a line belongs to: the block at the line when it is a
/// container, else the list item subtree covering it, else a one-line quote
/// or callout stand-in for a quoted line.
pub fn container_info_at_line(doc: &Document, line: usize) -> Option<ContainerInfo> {
    if line == 0 || line > doc.line_count() {
        return None;
    }
    if let Some(block) = detect_block(doc, line) {
        if let Some(kind) = ContainerKind::of(block.block_type) {
            return Some(ContainerInfo { kind, block });
        }
    }
    if let Some(block) = enclosing_list_block(doc, line) {
        return Some(ContainerInfo {
            kind: ContainerKind::List,
            block,
        });
    }

    let (_, depth, _) = split_quote_prefix(doc.line_text(line)?);
    if depth == 0 {
        return None;
    }
    let in_callout = (1..=line)
        .rev()
        .map(|i| doc.line_text(i).unwrap_or(""))
        .take_while(|text| split_quote_prefix(text).1 > 0)
        .any(BlockQuote::is_callout_line);
    let kind = if in_callout {
        ContainerKind::Callout
    } else {
        ContainerKind::Blockquote
    };
    synthetic_line_block(doc, line, kind.block_type()).map(|block| ContainerInfo { kind, block })
}

/// The container strictly enclosing the insertion point before line
/// `target` (1-indexed; `line_count + 1` appends).
///
/// Candidates are the lines around the insertion point and the nearest
/// non-blank neighbours. When none of them encloses the point, an insertion
/// on a non-blank line between two containers of the same kind counts as
/// inside the first one.
pub fn container_context_at_insertion(doc: &Document, target: usize) -> Option<ContainerInfo> {
    let prev = target.checked_sub(1).and_then(|t| previous_non_blank(doc, t));
    let next = next_non_blank(doc, target);
    let candidates = [
        target.checked_sub(1),
        Some(target),
        Some(target + 1),
        prev,
        next,
    ];

    let mut seen = Vec::with_capacity(candidates.len());
    for line in candidates.into_iter().flatten() {
        if line == 0 || line > doc.line_count() || seen.contains(&line) {
            continue;
        }
        seen.push(line);
        let Some(info) = container_info_at_line(doc, line) else {
            continue;
        };
        let top = info.block.first_line_number();
        let bottom = info.block.last_line_number() + 1;
        if target > top && target < bottom {
            return Some(info);
        }
    }

    let target_blank = doc.line_text(target).is_none_or(|t| t.trim().is_empty());
    if target_blank {
        return None;
    }
    let prev_info = prev.and_then(|l| container_info_at_line(doc, l))?;
    let next_info = next.and_then(|l| container_info_at_line(doc, l))?;
    (prev_info.kind == next_info.kind).then_some(prev_info)
}

/// Container kind suggested by a single adjacent line's text.
pub fn container_kind_of_line(line: Option<&str>) -> Option<ContainerKind> {
    let text = line?;
    let (_, depth, _) = split_quote_prefix(text);
    if depth > 0 {
        return Some(if BlockQuote::is_callout_line(text) {
            ContainerKind::Callout
        } else {
            ContainerKind::Blockquote
        });
    }
    ListMarker::parse(text.trim_start()).map(|_| ContainerKind::List)
}

/// Position of an insertion point from the lines directly above and below.
pub fn infer_insertion_context(
    prev: Option<&str>,
    next: Option<&str>,
) -> (Option<ContainerKind>, InsertionPosition) {
    match (container_kind_of_line(prev), container_kind_of_line(next)) {
        (Some(p), Some(n)) if p == n => (Some(p), InsertionPosition::Inside),
        (Some(p), None) => (Some(p), InsertionPosition::After),
        (None, Some(n)) => (Some(n), InsertionPosition::Before),
        (Some(_), Some(_)) => (None, InsertionPosition::Boundary),
        (None, None) => (None, InsertionPosition::Outside),
    }
}

/// Text of the lines on either side of the insertion point before `target`.
pub fn adjacent_lines(doc: &Document, target: usize) -> (Option<&str>, Option<&str>) {
    let prev = target.checked_sub(1).and_then(|t| doc.line_text(t));
    (prev, doc.line_text(target))
}

/// Container and position of a drop, plus the table's decision for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRuleContext {
    pub target_container: Option<ContainerKind>,
    pub position: InsertionPosition,
    pub decision: InsertionRuleDecision,
}

/// Resolves the policy for dropping `source` before line `target`: an
/// enclosing container makes the drop `inside`, otherwise the adjacent
/// lines decide.
pub fn resolve_drop_rule_at_insertion(doc: &Document, source: &Block, target: usize) -> DropRuleContext {
    let (target_container, position) = match container_context_at_insertion(doc, target) {
        Some(info) => (Some(info.kind), InsertionPosition::Inside),
        None => {
            let (prev, next) = adjacent_lines(doc, target);
            infer_insertion_context(prev, next)
        }
    };
    let decision = resolve_insertion_rule(InsertionRuleInput {
        source_type: source.block_type,
        target_container,
        position,
    });
    DropRuleContext {
        target_container,
        position,
        decision,
    }
}

/// Whether a block of `block_type` needs a blank line between itself and an
/// adjacent table row. Quote flows stay compact.
pub fn should_separate_block(block_type: BlockType, adjacent: Option<&str>) -> bool {
    let Some(text) = adjacent else { return false };
    if text.trim().is_empty() || block_type.is_quote_like() {
        return false;
    }
    Table::is_row(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundarySpacing {
    pub leading_blank: bool,
    pub trailing_blank: bool,
    pub reset_quote_depth: bool,
}

/// Padding for inserting `content` between `prev` and `next`.
///
/// A paragraph whose first non-blank line is quoted is treated as the quote
/// or callout it reads as.
pub fn boundary_spacing(
    source_type: BlockType,
    content: &str,
    prev: Option<&str>,
    next: Option<&str>,
) -> BoundarySpacing {
    let first = content.lines().find(|l| !l.trim().is_empty());
    let effective = match (source_type, container_kind_of_line(first)) {
        (BlockType::Paragraph, Some(ContainerKind::Callout)) => BlockType::Callout,
        (BlockType::Paragraph, Some(ContainerKind::Blockquote)) => BlockType::Blockquote,
        _ => source_type,
    };
    let (target_container, position) = infer_insertion_context(prev, next);
    let decision = resolve_insertion_rule(InsertionRuleInput {
        source_type: effective,
        target_container,
        position,
    });
    BoundarySpacing {
        leading_blank: decision.leading_blank || should_separate_block(source_type, prev),
        trailing_blank: decision.trailing_blank || should_separate_block(source_type, next),
        reset_quote_depth: decision.reset_quote_depth,
    }
}
