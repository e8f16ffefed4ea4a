use xi_rope::Rope;

use super::span::Span;

/// A single line of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-indexed line number.
    pub number: usize,
    /// Byte span of the line, excluding its terminator.
    pub span: Span,
    /// The line text without its terminator.
    pub text: String,
}

impl LineRef {
    pub fn from(&self) -> usize {
        self.span.start
    }

    pub fn to(&self) -> usize {
        self.span.end
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Splits the rope into lines with their byte spans.
///
/// A buffer with `k` line terminators yields `k + 1` lines: a trailing
/// newline produces a final empty line and an empty buffer yields one empty
/// line. `\r\n` terminators are excluded from both text and span.
pub fn lines_with_spans(rope: &Rope) -> Vec<LineRef> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    for raw in rope.lines_raw(..) {
        let start = offset;
        offset += raw.len();
        let text = raw.trim_end_matches('\n').trim_end_matches('\r');
        out.push(LineRef {
            number: out.len() + 1,
            span: Span::new(start, start + text.len()),
            text: text.to_string(),
        });
    }

    let ends_open = out.is_empty() || (rope.len() > 0 && rope.byte_at(rope.len() - 1) == b'\n');
    if ends_open {
        out.push(LineRef {
            number: out.len() + 1,
            span: Span::new(offset, offset),
            text: String::new(),
        });
    }
    out
}
