//! Delimited-text table reader
//!
//! Reads CSV-style input: the first record is the header row, fields are split
//! on a single delimiter character, and fields wrapped in double quotes may
//! contain the delimiter, line breaks and doubled (`""`) quotes.

use log::{debug, warn};

use super::error::{IngestError, IngestResult};

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

const QUOTE: char = '"';

/// Split delimited text into records of raw field values.
///
/// Blank lines between records are skipped. A byte-order mark at the start of
/// the input is ignored.
pub fn parse_records(content: &str, delimiter: char) -> IngestResult<Vec<Vec<String>>> {
    validate_delimiter(delimiter)?;

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            QUOTE if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                line += 1;
                end_record(&mut records, &mut record, &mut field);
            }
            _ if c == delimiter => record.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(IngestError::UnterminatedQuote { line: quote_line });
    }
    end_record(&mut records, &mut record, &mut field);

    debug!("Parsed {} delimited records", records.len());
    Ok(records)
}

fn end_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    if record.is_empty() && field.is_empty() {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}

fn validate_delimiter(delimiter: char) -> IngestResult<()> {
    if matches!(delimiter, QUOTE | '\n' | '\r') {
        return Err(IngestError::InvalidDelimiter(delimiter));
    }
    Ok(())
}

/// Resolve a column by header name first, then by 1-based position
pub fn resolve_column(headers: &[String], column: &str) -> IngestResult<usize> {
    let wanted = column.trim();
    if let Some(index) = headers.iter().position(|h| h.trim() == wanted) {
        return Ok(index);
    }

    match wanted.parse::<usize>() {
        Ok(position) if (1..=headers.len()).contains(&position) => Ok(position - 1),
        _ => Err(IngestError::UnknownColumn {
            column: column.to_string(),
            available: headers.iter().map(|h| h.trim().to_string()).collect(),
        }),
    }
}

/// Read one column of a delimited table as identifiers.
///
/// A single-column table uses that column. With several columns `column`
/// selects one; without a selection the first column is used. Values are
/// trimmed and empty cells are dropped.
pub fn read_column(content: &str, delimiter: char, column: Option<&str>) -> IngestResult<Vec<String>> {
    let mut records = parse_records(content, delimiter)?.into_iter();
    let headers = records.next().ok_or(IngestError::EmptyTable)?;

    let index = match column {
        Some(column) => resolve_column(&headers, column)?,
        None => {
            if headers.len() > 1 {
                warn!(
                    "Table has {} columns and none was selected, using '{}'",
                    headers.len(),
                    headers[0].trim()
                );
            }
            0
        }
    };
    debug!("Reading identifiers from column {} ('{}')", index + 1, headers[index].trim());

    let identifiers = records
        .filter_map(|record| record.get(index).map(|value| value.trim().to_string()))
        .filter(|value| !value.is_empty())
        .collect();

    Ok(identifiers)
}
