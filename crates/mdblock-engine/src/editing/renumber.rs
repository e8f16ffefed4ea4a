//! Ordered list renumbering after a move.

use serde::{Deserialize, Serialize};

use crate::document::{Document, EditOp};
use crate::parsing::blocks::kinds::ListMarker;

/// Indent width and quote depth of an ordered item, the pair that decides
/// whether two items belong to the same run.
fn ordered_key(doc: &Document, line: usize) -> Option<(usize, usize)> {
    doc.parsed_line(line)
        .filter(|p| p.is_ordered_item())
        .map(|p| (p.indent_width, p.quote_depth))
}

type RunKey = (usize, usize);

/// How a line relates to a run keyed by `key`: `Some(true)` for a sibling
/// item, `Some(false)` for a deeper line nested under one, `None` for a
/// line that ends the run.
fn run_member(doc: &Document, line: usize, key: RunKey) -> Option<bool> {
    let parsed = doc.parsed_line(line)?;
    if parsed.is_ordered_item() && (parsed.indent_width, parsed.quote_depth) == key {
        return Some(true);
    }
    let nested = !parsed.is_blank() && parsed.quote_depth == key.1 && parsed.indent_width > key.0;
    nested.then_some(false)
}

/// The run of same-level ordered items around `line`, anchored on the first
/// ordered item among `line`, `line - 1` and `line + 1`. Children and
/// continuation lines between siblings do not break the run.
fn ordered_run(doc: &Document, line: usize) -> Option<(usize, usize, RunKey)> {
    let count = doc.line_count();
    let line = line.clamp(1, count);
    let (anchor, key) = [Some(line), line.checked_sub(1), Some(line + 1)]
        .into_iter()
        .flatten()
        .filter(|&n| (1..=count).contains(&n))
        .find_map(|n| ordered_key(doc, n).map(|key| (n, key)))?;

    let (mut start, mut cursor) = (anchor, anchor);
    while cursor > 1 {
        match run_member(doc, cursor - 1, key) {
            Some(true) => start = cursor - 1,
            Some(false) => {}
            None => break,
        }
        cursor -= 1;
    }
    let (mut end, mut cursor) = (anchor, anchor);
    while cursor < count {
        match run_member(doc, cursor + 1, key) {
            Some(true) => end = cursor + 1,
            Some(false) => {}
            None => break,
        }
        cursor += 1;
    }
    Some((start, end, key))
}

fn renumber_run(doc: &Document, (start, end, key): (usize, usize, RunKey), edits: &mut Vec<EditOp>) {
    let items = (start..=end).filter(|&n| ordered_key(doc, n) == Some(key));
    for (n, line_number) in items.enumerate() {
        let (Some(line), Some(parsed)) = (doc.line(line_number), doc.parsed_line(line_number))
        else {
            continue;
        };
        let marker = ListMarker::ordered(n + 1);
        if parsed.marker == marker {
            continue;
        }
        let from = line.from() + parsed.quote_prefix.len() + parsed.indent_raw.len();
        edits.push(EditOp::replace(from, from + parsed.marker.len(), marker));
    }
}

/// Edits that number the ordered run around `line` from 1. Markers already
/// correct produce no edit; a line with no ordered item nearby produces none
/// at all.
pub fn renumber_ordered_list_around(doc: &Document, line: usize) -> Vec<EditOp> {
    let mut edits = Vec::new();
    if let Some(run) = ordered_run(doc, line) {
        renumber_run(doc, run, &mut edits);
    }
    edits
}

/// Renumbering still owed after a move: the lines the block left and
/// landed on. Run it against the document the move produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredRenumber {
    pub anchors: [usize; 2],
}

impl DeferredRenumber {
    pub fn new(source_line: usize, target_line: usize) -> Self {
        Self {
            anchors: [source_line, target_line],
        }
    }

    pub fn run(&self, doc: &Document) -> Vec<EditOp> {
        let mut runs: Vec<(usize, usize, RunKey)> = self
            .anchors
            .iter()
            .filter_map(|&line| ordered_run(doc, line))
            .collect();
        runs.sort_unstable();
        runs.dedup();

        let mut edits = Vec::new();
        for run in runs {
            renumber_run(doc, run, &mut edits);
        }
        edits.sort_by_key(|e| e.from);
        edits.dedup_by_key(|e| e.from);
        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn renumbered(text: &str, line: usize) -> String {
        let doc = Document::new(text);
        let edits = renumber_ordered_list_around(&doc, line);
        doc.apply_edits(&edits).unwrap().text()
    }

    #[test]
    fn renumbers_from_one() {
        assert_eq!(renumbered("1. a\n3. c\n2. b", 2), "1. a\n2. c\n3. b");
    }

    #[test]
    fn correct_list_needs_no_edits() {
        let doc = Document::new("1. a\n2. b");
        assert!(renumber_ordered_list_around(&doc, 1).is_empty());
    }

    #[test]
    fn anchor_falls_back_to_neighbours() {
        assert_eq!(renumbered("text\n5. a\n9. b", 1), "text\n1. a\n2. b");
        assert_eq!(renumbered("4. a\n7. b\ntext", 3), "1. a\n2. b\ntext");
    }

    #[test]
    fn nested_and_quoted_runs_stay_separate() {
        assert_eq!(
            renumbered("2. a\n   3. x\n   7. y\n4. b", 2),
            "2. a\n   1. x\n   2. y\n4. b"
        );
        assert_eq!(renumbered("> 3. a\n> 5. b\n6. c", 1), "> 1. a\n> 2. b\n6. c");
    }

    #[test]
    fn children_between_siblings_keep_the_run() {
        assert_eq!(
            renumbered("1. a\n   - x\n\n     more\n5. b\n   2. y\n9. c", 7),
            "1. a\n   - x\n\n     more\n1. b\n   2. y\n2. c"
        );
        assert_eq!(
            renumbered("1. a\n   - x\n   - y\n5. b\n   2. y\n9. c", 6),
            "1. a\n   - x\n   - y\n2. b\n   2. y\n3. c"
        );
        assert_eq!(renumbered("4. a\n   text\nafter\n7. b", 1), "1. a\n   text\nafter\n7. b");
    }

    #[test]
    fn parenthesis_markers_are_normalised() {
        assert_eq!(renumbered("1) a\n2) b", 1), "1. a\n2. b");
    }

    #[test]
    fn no_ordered_item_nearby() {
        let doc = Document::new("- a\n\ntext");
        assert!(renumber_ordered_list_around(&doc, 2).is_empty());
    }

    #[test]
    fn deferred_merges_overlapping_runs() {
        let doc = Document::new("1. a\n3. c\n2. b");
        let edits = DeferredRenumber::new(2, 3).run(&doc);
        assert_eq!(edits.len(), 2);
        assert_eq!(doc.apply_edits(&edits).unwrap().text(), "1. a\n2. c\n3. b");
    }

    #[test]
    fn deferred_anchor_past_end_is_clamped() {
        let doc = Document::new("1. a\n3. b");
        let edits = DeferredRenumber::new(9, 9).run(&doc);
        assert_eq!(doc.apply_edits(&edits).unwrap().text(), "1. a\n2. b");
    }
}
