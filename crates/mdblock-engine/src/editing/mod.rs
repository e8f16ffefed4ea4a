/*!
 * # Editing Core
 *
 * Moves whole blocks around a [`Document`](crate::document::Document)
 * without breaking their structure.
 *
 * ## Pipeline
 *
 * Every move runs the same synchronous steps against one immutable
 * snapshot:
 *
 * 1. **Policy** (`policy`): find the container around the target line and
 *    look the drop up in the insertion table.
 * 2. **Validation** (`validate`): refuse drops the table forbids and drops
 *    into the block's own range that change nothing or nest it under itself.
 * 3. **Mutation** (`mutation`): rewrite the block's text for its new home
 *    (quote depth, list indentation and markers, blank-line padding).
 * 4. **Move** (`mover`): emit the edits, plus a deferred renumbering of the
 *    ordered lists the block left and joined (`renumber`).
 *
 * `lists` holds the list context and indentation helpers shared by the
 * steps above; `session` wraps them in a drag lifecycle for interactive
 * hosts.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use mdblock_engine::document::Document;
 * use mdblock_engine::editing::{ListIntent, MoveOutcome, MoveTarget, move_block};
 * use mdblock_engine::parsing::detect_block;
 *
 * let doc = Document::new("1. a\n2. b\n3. c");
 * let source = detect_block(&doc, 2).unwrap();
 * let outcome = move_block(&doc, &source, MoveTarget::Line(4), &ListIntent::default()).unwrap();
 * if let MoveOutcome::Applied { edits, renumber, .. } = outcome {
 *     let moved = doc.apply_edits(&edits).unwrap();
 *     let renumbered = moved.apply_edits(&renumber.run(&moved)).unwrap();
 *     assert_eq!(renumbered.text(), "1. a\n2. c\n3. b");
 * }
 * ```
 */

pub mod lists;
pub mod mover;
pub mod mutation;
pub mod policy;
pub mod renumber;
pub mod session;
pub mod validate;

pub use lists::{
    ListContext, ListDropMode, ListDropTarget, ListIndentPlan, ListIntent,
    compute_list_indent_plan, indent_unit_width_for_doc, list_ancestor_lines,
    list_child_indent_width, list_context_at, list_drop_targets, list_indent_width_at_line,
    parent_list_line,
};
pub use mover::{
    MoveError, MoveOutcome, MoveTarget, clamp_target_line, move_block, resolve_target_line,
    snap_target_line,
};
pub use mutation::{adjust_blockquote_depth, adjust_list_to_target_context, build_insert_text};
pub use policy::{
    ContainerKind, InsertionPosition, InsertionRuleDecision, InsertionRuleInput,
    resolve_drop_rule_at_insertion, resolve_insertion_rule,
};
pub use renumber::{DeferredRenumber, renumber_ordered_list_around};
pub use session::{DragLifecycleEvent, DragLifecycleState, DragSession, SessionError};
pub use validate::{
    DropValidationResult, Placement, RejectReason, validate_drop, validate_in_place_drop,
};
