//! Fenced raw zones: code fences and display math.
//!
//! Fences pair top-down. An opener matches the next fence line of the same
//! kind; `$$ ... $$` on one line closes itself. An opener with no closer is
//! treated as a single-line region so that an unbalanced fence never swallows
//! the rest of the document.

use crate::document::Document;

use super::kinds::{CodeFence, FenceKind};

/// A paired fence region, 1-indexed inclusive lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedRegion {
    pub kind: FenceKind,
    pub start: usize,
    pub end: usize,
}

impl FencedRegion {
    pub fn contains(&self, line: usize) -> bool {
        (self.start..=self.end).contains(&line)
    }
}

/// Pairs fences from the top of the document, stopping once a region starts
/// after `until`.
fn scan(doc: &Document, until: usize) -> Vec<FencedRegion> {
    let n = doc.line_count();
    let mut out = Vec::new();
    let mut i = 1;
    while i <= n && i <= until {
        let text = doc.line_text(i).unwrap_or("");
        let Some(kind) = CodeFence::sig(text) else {
            i += 1;
            continue;
        };
        let end = if CodeFence::is_self_closed(kind, text) {
            i
        } else {
            (i + 1..=n)
                .find(|&j| CodeFence::closes(kind, CodeFence::sig(doc.line_text(j).unwrap_or(""))))
                .unwrap_or(i)
        };
        out.push(FencedRegion {
            kind,
            start: i,
            end,
        });
        i = end + 1;
    }
    out
}

/// Every fenced region of the document in order.
pub fn fenced_regions(doc: &Document) -> Vec<FencedRegion> {
    scan(doc, doc.line_count())
}

/// The fenced region containing `line`, if any.
pub fn fenced_region_at(doc: &Document, line: usize) -> Option<FencedRegion> {
    scan(doc, line).into_iter().find(|r| r.contains(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn region(kind: FenceKind, start: usize, end: usize) -> FencedRegion {
        FencedRegion { kind, start, end }
    }

    #[test]
    fn pairs_code_and_math_fences() {
        let doc = Document::new("```\ncode\n```\ntext\n$$\nx\n$$");
        assert_eq!(
            fenced_regions(&doc),
            vec![
                region(FenceKind::Backticks, 1, 3),
                region(FenceKind::Math, 5, 7)
            ]
        );
    }

    #[test]
    fn math_inside_code_is_content() {
        let doc = Document::new("```\n$$\n```\n$$");
        assert_eq!(
            fenced_regions(&doc),
            vec![
                region(FenceKind::Backticks, 1, 3),
                region(FenceKind::Math, 4, 4)
            ]
        );
    }

    #[test]
    fn tilde_does_not_close_backticks() {
        let doc = Document::new("```\n~~~\n```");
        assert_eq!(fenced_regions(&doc), vec![region(FenceKind::Backticks, 1, 3)]);
    }

    #[test]
    fn unclosed_opener_is_single_line() {
        let doc = Document::new("text\n```\nmore");
        assert_eq!(fenced_region_at(&doc, 2), Some(region(FenceKind::Backticks, 2, 2)));
        assert_eq!(fenced_region_at(&doc, 3), None);
    }

    #[test]
    fn closing_fence_belongs_to_its_opener() {
        let doc = Document::new("$$\na\n$$\nb\n$$\nc\n$$");
        assert_eq!(fenced_region_at(&doc, 3), Some(region(FenceKind::Math, 1, 3)));
        assert_eq!(fenced_region_at(&doc, 4), None);
        assert_eq!(fenced_region_at(&doc, 6), Some(region(FenceKind::Math, 5, 7)));
    }
}
