/// Horizontal rules: exactly `---`, `***` or `___`.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const FORMS: [&'static str; 3] = ["---", "***", "___"];

    pub fn matches(line: &str) -> bool {
        Self::FORMS.contains(&line.trim_start())
    }
}
