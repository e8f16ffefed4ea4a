/// Which delimiter opened a fenced region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
    Math,
}

impl FenceKind {
    pub fn is_math(self) -> bool {
        matches!(self, FenceKind::Math)
    }
}

/// Fenced code (```` ``` ```` / `~~~`) and display math (`$$`) delimiters.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";
    pub const MATH: &'static str = "$$";

    /// Fence kind of a line, judged on its left-trimmed text.
    pub fn sig(line: &str) -> Option<FenceKind> {
        let t = line.trim_start();
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else if t.starts_with(Self::MATH) {
            Some(FenceKind::Math)
        } else {
            None
        }
    }

    /// `$$ x $$` on one line opens and closes its own region.
    pub fn is_self_closed(kind: FenceKind, line: &str) -> bool {
        kind.is_math()
            && line
                .trim_start()
                .strip_prefix(Self::MATH)
                .is_some_and(|rest| rest.contains(Self::MATH))
    }

    pub fn closes(kind: FenceKind, sig: Option<FenceKind>) -> bool {
        sig == Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(CodeFence::sig("```rust"), Some(FenceKind::Backticks));
    }

    #[test]
    fn detect_indented_tilde_fence() {
        assert_eq!(CodeFence::sig("  ~~~"), Some(FenceKind::Tildes));
    }

    #[test]
    fn detect_math_fence() {
        assert_eq!(CodeFence::sig("$$"), Some(FenceKind::Math));
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::sig("hello"), None);
        assert_eq!(CodeFence::sig("`inline`"), None);
    }

    #[test]
    fn single_line_math_is_self_closed() {
        assert!(CodeFence::is_self_closed(FenceKind::Math, "$$ x^2 $$"));
        assert!(!CodeFence::is_self_closed(FenceKind::Math, "$$"));
        assert!(!CodeFence::is_self_closed(FenceKind::Backticks, "```$$"));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        assert!(CodeFence::closes(FenceKind::Tildes, Some(FenceKind::Tildes)));
        assert!(!CodeFence::closes(
            FenceKind::Backticks,
            Some(FenceKind::Tildes)
        ));
        assert!(!CodeFence::closes(FenceKind::Math, None));
    }
}
