use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    rope.slice_to_cow(sp.start..sp.end).into_owned()
}

/// First line of `text`, truncated to `max` characters with a "..." suffix.
///
/// Used for one-line block summaries.
pub fn preview(text: &str, max: usize) -> String {
    let first = text.lines().next().unwrap_or("");
    let multi_line = text.contains('\n');
    if first.chars().count() > max {
        let mut s: String = first.chars().take(max).collect();
        s.push_str("...");
        s
    } else if multi_line {
        format!("{first}...")
    } else {
        first.to_string()
    }
}
