//! Freeform one-identifier-per-line input

/// Split text into identifiers: one per line, trimmed, blank lines dropped.
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
