use anyhow::{Context, Result, bail};
use mdblock_engine::editing::{move_block, resolve_target_line};
use mdblock_engine::parsing::rope::preview;
use mdblock_engine::{
    Block, Document, DropValidationResult, MoveOutcome, MoveTarget, all_blocks, detect_block,
    validate_drop,
};
use serde::Serialize;

use crate::cli::DropArgs;

const PREVIEW_WIDTH: usize = 60;

#[derive(Serialize)]
struct MoveReport<'a> {
    #[serde(flatten)]
    outcome: &'a MoveOutcome,
    text: Option<String>,
}

/// One line per block, or a JSON array.
pub fn blocks(doc: &Document, json: bool) -> Result<String> {
    let blocks = all_blocks(doc);
    if json {
        return Ok(serde_json::to_string_pretty(&blocks)?);
    }
    let lines: Vec<String> = blocks
        .iter()
        .map(|b| {
            format!(
                "{:>4}-{:<4} {:<14} {}",
                b.first_line_number(),
                b.last_line_number(),
                format!("{:?}", b.block_type),
                preview(&b.content, PREVIEW_WIDTH)
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

fn source_block(doc: &Document, line: usize) -> Result<Block> {
    match detect_block(doc, line) {
        Some(block) => Ok(block),
        None => bail!(
            "no block at line {line} (document has {} lines)",
            doc.line_count()
        ),
    }
}

/// Validates the drop at the line `move` would actually use.
pub fn validate(doc: &Document, args: &DropArgs) -> Result<DropValidationResult> {
    let source = source_block(doc, args.source)?;
    let target = resolve_target_line(doc, &source, MoveTarget::Line(args.target));
    Ok(validate_drop(doc, &source, target, &args.intent()))
}

/// Performs the move and, when asked, the ordered-list renumbering that
/// follows it. `None` when the move was rejected.
pub fn perform_move(
    doc: &Document,
    args: &DropArgs,
    renumber: bool,
) -> Result<(MoveOutcome, Option<Document>)> {
    let source = source_block(doc, args.source)?;
    let outcome = move_block(doc, &source, MoveTarget::Line(args.target), &args.intent())?;
    let MoveOutcome::Applied {
        edits,
        renumber: deferred,
        ..
    } = &outcome
    else {
        return Ok((outcome, None));
    };

    let mut moved = doc
        .apply_edits(edits)
        .context("Failed to apply move edits")?;
    if renumber {
        let fix = deferred.run(&moved);
        log::debug!("renumbering {} ordered list markers", fix.len());
        moved = moved
            .apply_edits(&fix)
            .context("Failed to apply renumbering edits")?;
    }
    Ok((outcome, Some(moved)))
}

pub fn move_report(outcome: &MoveOutcome, moved: Option<&Document>) -> Result<String> {
    let report = MoveReport {
        outcome,
        text: moved.map(Document::text),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdblock_engine::RejectReason;
    use pretty_assertions::assert_eq;

    fn args(source: usize, target: usize) -> DropArgs {
        DropArgs {
            source,
            target,
            context_line: None,
            indent_step: None,
            target_indent: None,
        }
    }

    #[test]
    fn blocks_lists_ranges() {
        let doc = Document::new("# T\n\n- a\n  - b\n");
        let out = blocks(&doc, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Heading"));
        assert!(lines[1].trim_start().starts_with("3-4"));
        assert!(lines[1].ends_with("- a..."));
    }

    #[test]
    fn blocks_json_uses_type_field() {
        let doc = Document::new("text");
        let out = blocks(&doc, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["type"], "Paragraph");
        assert_eq!(value[0]["start_line"], 0);
    }

    #[test]
    fn move_with_renumbering() {
        let doc = Document::new("1. a\n2. b\n3. c");
        let (_, moved) = perform_move(&doc, &args(2, 4), true).unwrap();
        assert_eq!(moved.unwrap().text(), "1. a\n2. c\n3. b");

        let (_, raw) = perform_move(&doc, &args(2, 4), false).unwrap();
        assert_eq!(raw.unwrap().text(), "1. a\n3. c\n2. b");
    }

    #[test]
    fn rejected_move_reports_reason() {
        let doc = Document::new("intro\n\n- a\n- b");
        let (outcome, moved) = perform_move(&doc, &args(1, 4), true).unwrap();
        assert!(moved.is_none());
        let report: serde_json::Value =
            serde_json::from_str(&move_report(&outcome, None).unwrap()).unwrap();
        assert_eq!(report["outcome"], "rejected");
        assert_eq!(report["reason"], "container_policy");
    }

    #[test]
    fn validate_clamps_target_like_move() {
        let doc = Document::new("a\n\nb");
        let result = validate(&doc, &args(1, 0)).unwrap();
        assert_eq!(result.reject_reason, Some(RejectReason::SelfRangeBlocked));
        let (outcome, _) = perform_move(&doc, &args(1, 0), true).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Rejected {
                reason: RejectReason::SelfRangeBlocked
            }
        );
    }

    #[test]
    fn move_never_lands_inside_a_code_fence() {
        let doc = Document::new("para\n\n```\ncode1\ncode2\n```");
        let (_, moved) = perform_move(&doc, &args(1, 5), true).unwrap();
        let moved = moved.unwrap();
        assert_eq!(
            detect_block(&moved, 2).map(|b| b.content),
            Some("```\ncode1\ncode2\n```".to_string())
        );
    }

    #[test]
    fn missing_source_block_is_an_error() {
        let doc = Document::new("a\n\nb");
        assert!(validate(&doc, &args(2, 1)).is_err());
    }
}
