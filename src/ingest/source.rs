//! Identifier source selection and loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::error::{IngestError, IngestResult};
use super::lines::parse_lines;
use super::table::read_column;

/// Where a session's identifier sequence comes from.
///
/// Loading is repeatable: a session restart reads the source again.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifierSource {
    /// Delimited table file; one column supplies the identifiers
    Table {
        path: PathBuf,
        column: Option<String>,
        delimiter: char,
    },
    /// Text file with one identifier per line
    Lines { path: PathBuf },
    /// Identifiers given directly, e.g. on the command line
    Inline(Vec<String>),
}

impl IdentifierSource {
    /// Load the identifier sequence in calling order.
    ///
    /// Fails when the source cannot be read or parsed, or yields no identifiers.
    pub fn load(&self) -> IngestResult<Vec<String>> {
        let identifiers = match self {
            Self::Table { path, column, delimiter } => {
                let content = read_source(path)?;
                read_column(&content, *delimiter, column.as_deref())?
            }
            Self::Lines { path } => parse_lines(&read_source(path)?),
            Self::Inline(values) => values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect(),
        };

        if identifiers.is_empty() {
            return Err(IngestError::NoIdentifiers(self.to_string()));
        }

        info!("Loaded {} identifiers from {}", identifiers.len(), self);
        Ok(identifiers)
    }
}

impl fmt::Display for IdentifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { path, column: Some(column), .. } => {
                write!(f, "{} (column '{}')", path.display(), column)
            }
            Self::Table { path, .. } | Self::Lines { path } => write!(f, "{}", path.display()),
            Self::Inline(_) => write!(f, "command line"),
        }
    }
}

fn read_source(path: &Path) -> IngestResult<String> {
    fs::read_to_string(path).map_err(|e| IngestError::io(path, e))
}
