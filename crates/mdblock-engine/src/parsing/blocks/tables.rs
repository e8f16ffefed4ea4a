use crate::document::Document;

use super::kinds::Table;

fn is_row(doc: &Document, line: usize) -> bool {
    doc.line_text(line).is_some_and(Table::is_row)
}

/// Contiguous run of table rows around `line`, 1-indexed inclusive.
pub(crate) fn table_range(doc: &Document, line: usize) -> (usize, usize) {
    let mut start = line;
    while start > 1 && is_row(doc, start - 1) {
        start -= 1;
    }
    let mut end = line;
    while is_row(doc, end + 1) {
        end += 1;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_rows_both_ways() {
        let doc = Document::new("intro\n| a |\n|---|\n| b |\nafter");
        assert_eq!(table_range(&doc, 3), (2, 4));
        assert_eq!(table_range(&doc, 2), (2, 4));
    }

    #[test]
    fn blank_line_splits_tables() {
        let doc = Document::new("| a |\n\n| b |");
        assert_eq!(table_range(&doc, 1), (1, 1));
        assert_eq!(table_range(&doc, 3), (3, 3));
    }
}
