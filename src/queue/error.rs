//! Queue Error Types
//!
//! Defines error types specific to queue construction. The engine operations
//! themselves never fail.

use thiserror::Error;

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors that can occur while building a queue
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// A tuning parameter is outside its allowed range
    #[error("Invalid {name}: {value} (allowed range {min}..={max})")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

impl QueueError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, value: usize, min: usize, max: usize) -> Self {
        Self::InvalidParameter { name, value, min, max }
    }
}
