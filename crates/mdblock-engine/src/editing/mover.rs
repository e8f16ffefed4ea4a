//! # Block moves
//!
//! Turns a validated drop into edits against the current snapshot: one
//! insertion plus one deletion, or a single replacement when a list block
//! only changes its indentation in place. Renumbering of ordered lists is
//! handed back to the caller as a [`DeferredRenumber`] to run once the move
//! has been applied.

use std::cmp::Reverse;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::document::{Document, EditOp};
use crate::parsing::blocks::{Block, detect_block, quote_container_at};
use crate::parsing::rope::Span;

use super::lists::ListIntent;
use super::mutation::build_insert_text;
use super::policy::resolve_drop_rule_at_insertion;
use super::renumber::DeferredRenumber;
use super::validate::{Placement, RejectReason, validate_in_place_drop};

/// Where a block should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// A byte offset; the line containing it is the target, nudged out of
    /// any block the source may not enter.
    Position(usize),
    /// Insert before this 1-indexed line, nudged like a position.
    Line(usize),
    /// Insert before this 1-indexed line, taken as is. For hosts that have
    /// already settled the line themselves, such as list nesting inside a
    /// quote.
    Exact(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    Rejected {
        reason: RejectReason,
    },
    Applied {
        target_line: usize,
        edits: Vec<EditOp>,
        renumber: DeferredRenumber,
    },
}

impl MoveOutcome {
    pub fn edits(&self) -> &[EditOp] {
        match self {
            MoveOutcome::Rejected { .. } => &[],
            MoveOutcome::Applied { edits, .. } => edits,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("source lines {start}-{end} are outside the document ({line_count} lines)")]
    SourceOutOfRange {
        start: usize,
        end: usize,
        line_count: usize,
    },
}

/// Clamps an insertion line to `[1, line_count + 1]`.
pub fn clamp_target_line(line_count: usize, line: usize) -> usize {
    line.clamp(1, line_count + 1)
}

/// Moves a target line that falls inside a block the source may not enter
/// to whichever edge of that block is nearer. Code, math and tables are
/// never entered; quotes and callouts only by quote-like sources.
pub fn snap_target_line(doc: &Document, source: &Block, line: usize) -> usize {
    let zone = detect_block(doc, line)
        .filter(|b| b.block_type.is_raw_zone())
        .or_else(|| {
            if source.block_type.is_quote_like() {
                None
            } else {
                quote_container_at(doc, line)
            }
        });
    let Some(zone) = zone else { return line };
    if line <= zone.first_line_number() {
        return line;
    }
    let snapped = if line - 1 <= (zone.start_line + zone.end_line) / 2 {
        zone.first_line_number()
    } else {
        zone.last_line_number() + 1
    };
    debug!(
        "target line {line} inside {:?} snapped to {snapped}",
        zone.block_type
    );
    snapped
}

/// The clamped insertion line a target resolves to for `source`.
pub fn resolve_target_line(doc: &Document, source: &Block, target: MoveTarget) -> usize {
    let line = match target {
        MoveTarget::Position(pos) => snap_target_line(doc, source, doc.line_at(pos).number),
        MoveTarget::Line(line) => snap_target_line(doc, source, line),
        MoveTarget::Exact(line) => line,
    };
    clamp_target_line(doc.line_count(), line)
}

/// Plans moving `source` to `target`.
///
/// Rejected drops produce no edits. Applied moves return edits positioned
/// against `doc`, sorted by descending offset with a deletion ahead of an
/// insertion at the same offset.
pub fn move_block(
    doc: &Document,
    source: &Block,
    target: MoveTarget,
    intent: &ListIntent,
) -> Result<MoveOutcome, MoveError> {
    let line_count = doc.line_count();
    let (Some(first), Some(last)) = (
        doc.line(source.first_line_number()),
        doc.line(source.last_line_number()),
    ) else {
        return Err(MoveError::SourceOutOfRange {
            start: source.first_line_number(),
            end: source.last_line_number(),
            line_count,
        });
    };

    let target_line = resolve_target_line(doc, source, target);

    let rule = resolve_drop_rule_at_insertion(doc, source, target_line);
    let placement = Placement {
        target_container: rule.target_container,
        position: rule.position,
    };
    let validation = validate_in_place_drop(doc, source, target_line, Some(placement), intent);
    if let Some(reason) = validation.reject_reason {
        debug!(
            "move of line {} to {target_line} rejected: {reason}",
            source.first_line_number()
        );
        return Ok(MoveOutcome::Rejected { reason });
    }

    let content = doc.slice(Span::new(first.from(), last.to()));
    let mut insert = build_insert_text(doc, source.block_type, &content, target_line, intent);
    let leading_blanks = insert.len() - insert.trim_start_matches('\n').len();

    let len = doc.len();
    let insert_pos = match doc.line(target_line) {
        Some(line) => line.from(),
        None => len,
    };
    let mut delete_from = first.from();
    let delete_to = (last.to() + 1).min(len);

    let inside_source = insert_pos > delete_from && insert_pos < delete_to;
    let in_place = validation.allow_in_place_indent_change
        && (insert_pos == delete_from || inside_source);

    if in_place {
        if last.to() == len && insert.ends_with('\n') {
            insert.pop();
        }
        let edits = vec![EditOp::replace(delete_from, delete_to, insert)];
        let start = source.first_line_number();
        return Ok(applied(target_line, edits, DeferredRenumber::new(start, start)));
    }

    if target_line > line_count && !doc.ends_with_newline() && len > 0 {
        if insert.ends_with('\n') {
            insert.pop();
        }
        insert.insert(0, '\n');
    }
    if last.to() == len && delete_from > 0 {
        delete_from -= 1;
    }

    let renumber = post_move_anchors(source, target_line, leading_blanks, &insert);
    let mut edits = vec![
        EditOp::insert(insert_pos, insert),
        EditOp::delete(delete_from, delete_to),
    ];
    edits.sort_by_key(|e| (Reverse(e.from), !e.insert.is_empty()));
    Ok(applied(target_line, edits, renumber))
}

/// Renumber anchors in the coordinates of the moved document: the line that
/// now sits where the block was, and the block's first line at its landing
/// place.
fn post_move_anchors(
    source: &Block,
    target_line: usize,
    leading_blanks: usize,
    insert: &str,
) -> DeferredRenumber {
    let start = source.first_line_number();
    let landed = target_line + leading_blanks;
    if target_line > start {
        DeferredRenumber::new(start, landed.saturating_sub(source.line_count()))
    } else {
        let inserted_lines = insert.matches('\n').count();
        DeferredRenumber::new(start + inserted_lines, landed)
    }
}

fn applied(target_line: usize, edits: Vec<EditOp>, renumber: DeferredRenumber) -> MoveOutcome {
    MoveOutcome::Applied {
        target_line,
        edits,
        renumber,
    }
}
