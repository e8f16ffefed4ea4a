use crate::document::Document;
use crate::parsing::blocks::{Block, detect_block};

/// Panics when a block list breaks the structural invariants: spans in
/// bounds, content equal to the source slice, ordered non-overlapping
/// ranges, and each block re-resolving to itself from its first line.
pub fn check(doc: &Document, blocks: &[Block]) {
    let n = doc.len();
    for b in blocks {
        assert!(
            b.from <= b.to && b.to <= n,
            "block span out of bounds: {}..{} (document len: {})",
            b.from,
            b.to,
            n
        );
        assert!(
            b.start_line <= b.end_line,
            "inverted line range: {}..={}",
            b.start_line,
            b.end_line
        );
        assert_eq!(
            doc.slice(b.span()),
            b.content,
            "content differs from source for lines {}..={}",
            b.start_line,
            b.end_line
        );
        let again = detect_block(doc, b.first_line_number());
        assert_eq!(
            again.as_ref(),
            Some(b),
            "block at line {} does not re-resolve to itself",
            b.first_line_number()
        );
    }
    for pair in blocks.windows(2) {
        assert!(
            pair[0].end_line < pair[1].start_line,
            "blocks overlap: {}..={} and {}..={}",
            pair[0].start_line,
            pair[0].end_line,
            pair[1].start_line,
            pair[1].end_line
        );
    }
}
