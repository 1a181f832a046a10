//! Compact table formatting shared by the board sections

use prettytable::{format, Cell, Row, Table};

/// Format a table with a header row in prettytable's clean format, indented by two spaces.
///
/// Returns an empty string when there are no rows.
pub fn format_compact_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(Row::new(headers.iter().map(|header| Cell::new(header)).collect()));

    for row in rows {
        table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
    }

    let mut result = String::new();
    for line in table.to_string().lines() {
        result.push_str("  ");
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}
