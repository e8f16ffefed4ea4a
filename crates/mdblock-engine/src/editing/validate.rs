//! # Drop validation
//!
//! Decides whether a block may land before a given line. Two families of
//! checks apply, in order:
//!
//! 1. The insertion policy for the container around the target.
//! 2. Targets inside the block's own range (or directly after it) are only
//!    legal for list blocks whose indentation actually changes, and never
//!    when the block would end up nested under itself.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::parsing::blocks::Block;

use super::lists::{ListIntent, SourceListBase, compute_list_indent_plan};
use super::policy::{
    ContainerKind, InsertionPosition, InsertionRuleInput, resolve_drop_rule_at_insertion,
    resolve_insertion_rule,
};

/// Why a drop was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The target container does not accept this kind of block.
    ContainerPolicy,
    /// The target lies within the block itself and changes nothing.
    SelfRangeBlocked,
    /// The block would be nested under one of its own items.
    SelfEmbedding,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::ContainerPolicy => "container_policy",
            RejectReason::SelfRangeBlocked => "self_range_blocked",
            RejectReason::SelfEmbedding => "self_embedding",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DropValidationResult {
    pub in_self_range: bool,
    pub allow_in_place_indent_change: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<RejectReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_context_line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_indent_width: Option<usize>,
}

impl DropValidationResult {
    pub fn is_allowed(&self) -> bool {
        self.reject_reason.is_none()
    }

    fn rejected(in_self_range: bool, reason: RejectReason) -> Self {
        Self {
            in_self_range,
            reject_reason: Some(reason),
            ..Self::default()
        }
    }
}

/// Container and relative position of a drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub target_container: Option<ContainerKind>,
    pub position: InsertionPosition,
}

/// Validates dropping `source` before line `target` (1-indexed).
///
/// With a `placement` the insertion policy is consulted first. The
/// remaining checks only concern targets in `[start, end + 1]`.
pub fn validate_in_place_drop(
    doc: &Document,
    source: &Block,
    target: usize,
    placement: Option<Placement>,
    intent: &ListIntent,
) -> DropValidationResult {
    if let Some(p) = placement {
        let rule = resolve_insertion_rule(InsertionRuleInput {
            source_type: source.block_type,
            target_container: p.target_container,
            position: p.position,
        });
        if !rule.allow_drop {
            debug!(
                "{:?} refused {:?} {:?} before line {target}",
                source.block_type, p.position, p.target_container
            );
            return DropValidationResult::rejected(false, RejectReason::ContainerPolicy);
        }
    }

    let source_line = source.first_line_number();
    let source_end = source.last_line_number();
    if target < source_line || target > source_end + 1 {
        return DropValidationResult::default();
    }
    if !intent.resizes() {
        return DropValidationResult::rejected(true, RejectReason::SelfRangeBlocked);
    }
    let Some(parsed) = doc.parsed_line(source_line).filter(|p| p.is_list_item) else {
        return DropValidationResult::rejected(true, RejectReason::SelfRangeBlocked);
    };

    let base = SourceListBase {
        indent_width: parsed.indent_width,
        indent_raw: parsed.indent_raw.to_string(),
        marker_type: parsed.marker_type,
    };
    let plan = compute_list_indent_plan(doc, &base, target, intent);
    let width = plan.target_indent_width;
    let context_line = plan.context_line_number();
    let mut result = DropValidationResult {
        in_self_range: true,
        list_context_line_number: context_line,
        target_indent_width: Some(width),
        ..DropValidationResult::default()
    };

    let after_self = target == source_end + 1;
    let same_line = target == source_line;
    let context_inside = context_line.is_some_and(|l| (source_line..=source_end).contains(&l));
    if after_self && context_inside && width > base.indent_width {
        debug!("line {source_line} would nest under itself at width {width}");
        result.reject_reason = Some(RejectReason::SelfEmbedding);
        return result;
    }

    let allowed = (after_self && width != base.indent_width)
        || (same_line && width != base.indent_width && context_line != Some(source_line))
        || (!after_self && width < base.indent_width);
    if allowed {
        result.allow_in_place_indent_change = true;
    } else {
        result.reject_reason = Some(RejectReason::SelfRangeBlocked);
    }
    result
}

/// Validates a drop, resolving the target's container and position from
/// the document first.
pub fn validate_drop(
    doc: &Document,
    source: &Block,
    target: usize,
    intent: &ListIntent,
) -> DropValidationResult {
    let rule = resolve_drop_rule_at_insertion(doc, source, target);
    let placement = Placement {
        target_container: rule.target_container,
        position: rule.position,
    };
    validate_in_place_drop(doc, source, target, Some(placement), intent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::blocks::detect_block;
    use pretty_assertions::assert_eq;

    fn width(w: usize) -> ListIntent {
        ListIntent {
            target_indent_width: Some(w),
            ..ListIntent::default()
        }
    }

    #[test]
    fn targets_outside_the_block_pass() {
        let doc = Document::new("a\n\nb\n\nc");
        let source = detect_block(&doc, 1).unwrap();
        let result = validate_in_place_drop(&doc, &source, 4, None, &ListIntent::default());
        assert_eq!(result, DropValidationResult::default());
        assert!(result.is_allowed());
    }

    #[test]
    fn own_range_without_intent_is_blocked() {
        let doc = Document::new("- a\n  - b\n- c");
        let source = detect_block(&doc, 1).unwrap();
        for target in 1..=3 {
            let result = validate_in_place_drop(&doc, &source, target, None, &ListIntent::default());
            assert_eq!(result.reject_reason, Some(RejectReason::SelfRangeBlocked));
            assert!(result.in_self_range);
        }
    }

    #[test]
    fn non_list_source_cannot_resize_in_place() {
        let doc = Document::new("text\nmore");
        let source = detect_block(&doc, 1).unwrap();
        let result = validate_in_place_drop(&doc, &source, 2, None, &width(2));
        assert_eq!(result.reject_reason, Some(RejectReason::SelfRangeBlocked));
    }

    #[test]
    fn nesting_under_own_child_is_self_embedding() {
        let doc = Document::new("- root\n  - child\nafter");
        let source = detect_block(&doc, 1).unwrap();
        let intent = ListIntent {
            context_line: Some(2),
            indent_step: None,
            target_indent_width: Some(2),
        };
        let result = validate_in_place_drop(&doc, &source, 3, None, &intent);
        assert_eq!(result.reject_reason, Some(RejectReason::SelfEmbedding));
        assert_eq!(result.list_context_line_number, Some(2));
        assert_eq!(result.target_indent_width, Some(2));
    }

    #[test]
    fn indenting_after_self_under_previous_sibling() {
        let doc = Document::new("- a\n- b\n- c");
        let source = detect_block(&doc, 2).unwrap();
        let intent = ListIntent {
            context_line: Some(1),
            indent_step: Some(1),
            target_indent_width: None,
        };
        let result = validate_in_place_drop(&doc, &source, 3, None, &intent);
        assert!(result.is_allowed());
        assert!(result.allow_in_place_indent_change);
        assert_eq!(result.target_indent_width, Some(4));
    }

    #[test]
    fn outdent_inside_own_range() {
        let doc = Document::new("- a\n  - b\n- c");
        let source = detect_block(&doc, 2).unwrap();
        let result = validate_in_place_drop(&doc, &source, 2, None, &width(0));
        assert!(result.allow_in_place_indent_change);
    }

    #[test]
    fn same_width_inside_own_range_is_blocked() {
        let doc = Document::new("- a\n  - b\n- c");
        let source = detect_block(&doc, 2).unwrap();
        let result = validate_in_place_drop(&doc, &source, 2, None, &width(2));
        assert_eq!(result.reject_reason, Some(RejectReason::SelfRangeBlocked));
    }

    #[test]
    fn container_policy_comes_first() {
        let doc = Document::new("- a\n- b");
        let source = Block {
            block_type: crate::parsing::blocks::BlockType::Paragraph,
            ..detect_block(&doc, 1).unwrap()
        };
        let placement = Placement {
            target_container: Some(ContainerKind::List),
            position: InsertionPosition::Inside,
        };
        let result =
            validate_in_place_drop(&doc, &source, 1, Some(placement), &ListIntent::default());
        assert_eq!(result.reject_reason, Some(RejectReason::ContainerPolicy));
        assert!(!result.in_self_range);
    }

    #[test]
    fn validate_drop_resolves_container() {
        let doc = Document::new("intro\n\n- a\n- b\n- c");
        let paragraph = detect_block(&doc, 1).unwrap();
        let result = validate_drop(&doc, &paragraph, 4, &ListIntent::default());
        assert_eq!(result.reject_reason, Some(RejectReason::ContainerPolicy));

        let item = detect_block(&doc, 5).unwrap();
        assert!(validate_drop(&doc, &item, 4, &ListIntent::default()).is_allowed());
    }
}
