use serde::{Deserialize, Serialize};
use thiserror::Error;
use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::parsing::blocks::classify::{DEFAULT_TAB_SIZE, ParsedLine, parse_line_with_quote};
use crate::parsing::rope::{LineRef, Span, lines_with_spans, slice_to_string};

/// One replacement against a document, positioned in the pre-edit text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOp {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub insert: String,
}

impl EditOp {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            from: at,
            to: at,
            insert: text.into(),
        }
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            insert: String::new(),
        }
    }

    pub fn replace(from: usize, to: usize, text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: text.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit {from}..{to} is outside the document (length {len})")]
    OutOfBounds { from: usize, to: usize, len: usize },

    #[error("edit {from}..{to} does not fall on character boundaries")]
    NotCharBoundary { from: usize, to: usize },

    #[error("edits {first:?} and {second:?} overlap")]
    Overlapping {
        first: std::ops::Range<usize>,
        second: std::ops::Range<usize>,
    },
}

/// Immutable, line-addressable snapshot of a markdown document.
///
/// The xi-rope buffer is the source of truth; line spans are computed once on
/// construction. Line numbers are 1-indexed throughout the public API. Edits
/// never mutate a snapshot: [`Document::apply_edits`] returns a new one.
#[derive(Debug, Clone)]
pub struct Document {
    buffer: Rope,
    lines: Vec<LineRef>,
    tab_size: usize,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self::from_rope(Rope::from(text), DEFAULT_TAB_SIZE)
    }

    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    fn from_rope(buffer: Rope, tab_size: usize) -> Self {
        let lines = lines_with_spans(&buffer);
        Self {
            buffer,
            lines,
            tab_size,
        }
    }

    /// Sets the column width of a tab. Zero falls back to the default of 4.
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = if tab_size == 0 {
            DEFAULT_TAB_SIZE
        } else {
            tab_size
        };
        self
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.text().into_bytes()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The 1-indexed line `n`, or `None` when out of range.
    pub fn line(&self, n: usize) -> Option<&LineRef> {
        n.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    pub fn line_text(&self, n: usize) -> Option<&str> {
        self.line(n).map(|l| l.text.as_str())
    }

    /// Line `n` split into quote prefix, indentation and list marker.
    pub fn parsed_line(&self, n: usize) -> Option<ParsedLine<'_>> {
        self.line_text(n)
            .map(|text| parse_line_with_quote(text, self.tab_size))
    }

    pub fn is_blank_line(&self, n: usize) -> bool {
        self.line(n).is_some_and(LineRef::is_blank)
    }

    /// The line containing byte offset `pos`, clamped to the document.
    pub fn line_at(&self, pos: usize) -> &LineRef {
        let idx = self
            .lines
            .partition_point(|l| l.span.start <= pos)
            .saturating_sub(1);
        &self.lines[idx]
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineRef> {
        self.lines.iter()
    }

    pub fn slice(&self, span: Span) -> String {
        slice_to_string(&self.buffer, span)
    }

    pub fn ends_with_newline(&self) -> bool {
        self.lines.len() > 1 && self.lines.last().is_some_and(|l| l.span.is_empty())
    }

    /// Applies a batch of edits positioned against this snapshot.
    ///
    /// Edits are compiled into one xi-rope delta, so the order of the batch
    /// does not matter except between an insertion and a deletion starting
    /// at the same offset: the insertion always survives.
    pub fn apply_edits(&self, edits: &[EditOp]) -> Result<Document, EditError> {
        let len = self.buffer.len();
        let mut sorted: Vec<&EditOp> = edits.iter().collect();
        sorted.sort_by_key(|e| (e.from, e.to));

        let text = self.buffer.slice_to_cow(0..len);
        let mut builder = Builder::new(len);
        let mut prev: Option<&EditOp> = None;
        for edit in sorted {
            if edit.from > edit.to || edit.to > len {
                return Err(EditError::OutOfBounds {
                    from: edit.from,
                    to: edit.to,
                    len,
                });
            }
            if !text.is_char_boundary(edit.from) || !text.is_char_boundary(edit.to) {
                return Err(EditError::NotCharBoundary {
                    from: edit.from,
                    to: edit.to,
                });
            }
            if let Some(p) = prev {
                if edit.from < p.to {
                    return Err(EditError::Overlapping {
                        first: p.from..p.to,
                        second: edit.from..edit.to,
                    });
                }
            }
            if edit.insert.is_empty() {
                if edit.from < edit.to {
                    builder.delete(edit.from..edit.to);
                }
            } else {
                builder.replace(edit.from..edit.to, Rope::from(edit.insert.as_str()));
            }
            prev = Some(edit);
        }

        let delta = builder.build();
        Ok(Self::from_rope(delta.apply(&self.buffer), self.tab_size))
    }
}
