//! Owned view of the observable queue state

use serde::Serialize;

/// Everything a renderer needs after an operation, detached from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot<T = String> {
    /// Staging window, front first
    pub staging: Vec<T>,
    pub active: Option<T>,
    /// Skipped identifiers; recall positions index into this
    pub skipped: Vec<T>,
    pub completed: Vec<T>,
    pub cursor: usize,
    /// Length of the source sequence
    pub total: usize,
    /// Identifiers not yet staged
    pub remaining: usize,
}
