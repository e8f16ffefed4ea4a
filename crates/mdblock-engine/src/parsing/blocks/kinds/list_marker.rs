use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The three list marker shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    Ordered,
    Unordered,
    Task,
}

/// A list marker found at the start of a line (after indentation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker<'a> {
    pub marker_type: MarkerType,
    /// The marker including its trailing whitespace, e.g. `"- [x] "` or `"12. "`.
    pub text: &'a str,
}

static TASK: OnceLock<Regex> = OnceLock::new();
static UNORDERED: OnceLock<Regex> = OnceLock::new();
static ORDERED: OnceLock<Regex> = OnceLock::new();

fn task() -> &'static Regex {
    TASK.get_or_init(|| Regex::new(r"^[-*+]\s\[[ xX]\]\s+").expect("valid task regex"))
}

fn unordered() -> &'static Regex {
    UNORDERED.get_or_init(|| Regex::new(r"^[-*+]\s+").expect("valid bullet regex"))
}

fn ordered() -> &'static Regex {
    ORDERED.get_or_init(|| Regex::new(r"^\d+[.)]\s+").expect("valid ordered regex"))
}

impl<'a> ListMarker<'a> {
    pub const CHECKED_TASK: &'static str = "- [x] ";
    pub const UNCHECKED_TASK: &'static str = "- [ ] ";
    pub const BULLET: &'static str = "- ";

    /// Parses the marker at the very start of `s`. Task markers win over
    /// plain bullets.
    pub fn parse(s: &'a str) -> Option<Self> {
        let candidates = [
            (task(), MarkerType::Task),
            (unordered(), MarkerType::Unordered),
            (ordered(), MarkerType::Ordered),
        ];
        candidates.into_iter().find_map(|(re, marker_type)| {
            re.find(s).map(|m| ListMarker {
                marker_type,
                text: m.as_str(),
            })
        })
    }

    /// Whether a task marker carries a checked box.
    pub fn is_checked(&self) -> bool {
        self.marker_type == MarkerType::Task
            && (self.text.contains("[x]") || self.text.contains("[X]"))
    }

    /// Canonical ordered marker for position `n`.
    pub fn ordered(n: usize) -> String {
        format!("{n}. ")
    }
}
