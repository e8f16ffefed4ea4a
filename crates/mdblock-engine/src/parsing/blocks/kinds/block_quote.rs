/// Blockquote syntax: `>` prefixes and callout headers.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Canonical prefix emitted when adding one level of quoting.
    pub const LEVEL: &'static str = "> ";

    /// Opening of a callout title such as `[!note]`.
    pub const CALLOUT_OPEN: &'static str = "[!";

    /// Strips blockquote prefixes from a line, returning (depth, byte_offset).
    ///
    /// Accepts `> text`, `>> nested`, `> > spaced nested` and indented prefixes
    /// such as `  >\t> x`. At most one space after each `>` belongs to the prefix.
    ///
    /// # Returns
    /// - `depth`: Number of `>` prefixes found (0 if not a blockquote)
    /// - `byte_offset`: Index into `s` where content begins after prefixes
    pub fn strip_prefixes(s: &str) -> (usize, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut depth = 0usize;

        loop {
            let mut j = i;
            while j < b.len() && b[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < b.len() && b[j] == (Self::PREFIX as u8) {
                depth += 1;
                i = j + 1;
                if i < b.len() && b[i] == b' ' {
                    i += 1;
                }
            } else {
                break;
            }
        }
        (depth, i)
    }

    /// Removes up to `levels` leading prefixes from one line.
    pub fn strip_levels(line: &str, levels: usize) -> &str {
        let mut rest = line;
        for _ in 0..levels {
            let trimmed = rest.trim_start();
            match trimmed.strip_prefix(Self::PREFIX) {
                Some(after) => rest = after.strip_prefix(' ').unwrap_or(after),
                None => break,
            }
        }
        rest
    }

    /// Whether the text after the quote prefix opens a callout.
    pub fn is_callout_title(rest: &str) -> bool {
        rest.trim_start().starts_with(Self::CALLOUT_OPEN)
    }

    /// Whether a full line is a quoted callout title (`> [!note] ...`).
    pub fn is_callout_line(line: &str) -> bool {
        let (depth, idx) = Self::strip_prefixes(line);
        depth > 0 && Self::is_callout_title(&line[idx..])
    }
}
