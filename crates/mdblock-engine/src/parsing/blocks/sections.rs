use crate::document::Document;

use super::fences::fenced_regions;
use super::kinds::Heading;

/// A heading together with the body under it: everything up to the next
/// heading of the same or a higher level. Headings inside fenced regions do
/// not count and trailing blank lines are left out. 1-indexed inclusive.
pub(crate) fn section_range(doc: &Document, line: usize) -> Option<(usize, usize)> {
    let level = Heading::level(doc.line_text(line)?)?;
    let regions = fenced_regions(doc);
    let in_fence = |i: usize| regions.iter().any(|r| r.contains(i));
    if in_fence(line) {
        return None;
    }

    let mut end = doc.line_count();
    for i in line + 1..=doc.line_count() {
        let closes = !in_fence(i)
            && doc
                .line_text(i)
                .and_then(Heading::level)
                .is_some_and(|l| l <= level);
        if closes {
            end = i - 1;
            break;
        }
    }
    while end > line && doc.is_blank_line(end) {
        end -= 1;
    }
    Some((line, end))
}
