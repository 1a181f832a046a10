//! Ingestion Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for identifier loading
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while turning an input source into an identifier sequence
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A quoted field was still open at end of input
    #[error("Unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    /// The table has no header row
    #[error("Table source is empty")]
    EmptyTable,

    /// The requested column is neither a header name nor a valid position
    #[error("Unknown column '{column}'. Available columns: {}", available.join(", "))]
    UnknownColumn { column: String, available: Vec<String> },

    /// The delimiter cannot be used to split fields
    #[error("Invalid delimiter {0:?}: must be a single character other than a quote or line break")]
    InvalidDelimiter(char),

    /// The source parsed cleanly but yielded nothing to call
    #[error("No identifiers found in {0}")]
    NoIdentifiers(String),
}

impl IngestError {
    /// Create an I/O error for a source path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
