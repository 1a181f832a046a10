//! Call Queue Core
//!
//! This module holds the queue state machine that drives the operator console.
//! Everything else in the crate (ingestion, rendering, the session loop) only
//! feeds it identifiers, invokes its operations and reads its state back.
//!
//! # Architecture
//!
//! - **QueueEngine**: staging window, active call, completed and skipped lists
//! - **QueueParams**: validated staging capacity, refill threshold and refill batch
//! - **QueueSnapshot**: owned, serializable copy of the observable state
//!
//! # Usage
//!
//! ```rust
//! use callq::queue::{QueueEngine, QueueParams};
//!
//! let params = QueueParams::new(3, 1, 2).unwrap();
//! let mut engine = QueueEngine::new(["A1", "A2", "A3", "A4"].map(String::from), params);
//!
//! // A session starts with the first identifier already called
//! assert_eq!(engine.reset().map(String::as_str), Some("A1"));
//!
//! engine.skip_and_next();
//! assert_eq!(engine.active().map(String::as_str), Some("A2"));
//!
//! // Bring A1 back to the front of the staging window
//! engine.recall_skip(0);
//! assert_eq!(engine.staging().front().map(String::as_str), Some("A1"));
//! ```

pub mod engine;
pub mod error;
pub mod params;
pub mod snapshot;

// Re-export main types for convenience
pub use engine::QueueEngine;
pub use error::{QueueError, QueueResult};
pub use params::QueueParams;
pub use snapshot::QueueSnapshot;
