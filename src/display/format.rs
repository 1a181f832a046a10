//! Board output formats and the compact one-line trait

use crate::queue::QueueSnapshot;

/// How the board is written after each operator action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardFormat {
    /// Full sectioned board for a terminal
    #[default]
    Text,
    /// One summary line per action
    Compact,
    /// One JSON snapshot per line, for scripts driving the console
    Json,
}

impl std::str::FromStr for BoardFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(BoardFormat::Text),
            "compact" => Ok(BoardFormat::Compact),
            "json" => Ok(BoardFormat::Json),
            _ => Err(format!("Invalid output format: {}. Valid options: text, compact, json", s)),
        }
    }
}

/// Trait for types that can be formatted compactly
pub trait CompactFormat {
    /// Convert the type to a single-line summary without a trailing newline
    fn to_compact_format(&self) -> String;
}

impl<T> CompactFormat for QueueSnapshot<T> {
    fn to_compact_format(&self) -> String {
        format!(
            "Staged: {} | Active: {} | Skipped: {} | Completed: {} | Unstaged: {}",
            self.staging.len(),
            usize::from(self.active.is_some()),
            self.skipped.len(),
            self.completed.len(),
            self.remaining
        )
    }
}
