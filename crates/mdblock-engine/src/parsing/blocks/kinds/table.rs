/// Pipe-table rows.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';

    pub fn is_row(line: &str) -> bool {
        line.trim_start().starts_with(Self::PIPE)
    }
}
