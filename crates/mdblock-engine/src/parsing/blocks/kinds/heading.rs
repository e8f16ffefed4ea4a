/// ATX headings (`#` through `######` followed by whitespace).
pub struct Heading;

impl Heading {
    pub const MARK: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Heading level of a line, judged on its left-trimmed text.
    pub fn level(line: &str) -> Option<usize> {
        let t = line.trim_start();
        let hashes = t.chars().take_while(|&c| c == Self::MARK).count();
        if hashes == 0 || hashes > Self::MAX_LEVEL {
            return None;
        }
        t[hashes..]
            .starts_with(char::is_whitespace)
            .then_some(hashes)
    }
}
