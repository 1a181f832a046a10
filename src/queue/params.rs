//! Tuning parameters for the staging window

use serde::Serialize;

use super::error::{QueueError, QueueResult};

/// Default maximum size of the staging window
pub const DEFAULT_STAGING_CAPACITY: usize = 10;
/// Default occupancy at or below which a refill is triggered
pub const DEFAULT_REFILL_THRESHOLD: usize = 5;
/// Default number of identifiers pulled per refill
pub const DEFAULT_REFILL_BATCH: usize = 5;
/// Upper bound accepted for the staging capacity
pub const MAX_STAGING_CAPACITY: usize = 100;

/// Staging window tuning: capacity (N), refill threshold (Y) and refill batch (Z).
///
/// Always valid once constructed: `1 <= N <= 100`, `1 <= Y <= N`, `1 <= Z <= N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueParams {
    staging_capacity: usize,
    refill_threshold: usize,
    refill_batch: usize,
}

impl QueueParams {
    /// Create validated parameters
    pub fn new(staging_capacity: usize, refill_threshold: usize, refill_batch: usize) -> QueueResult<Self> {
        check_range("staging capacity", staging_capacity, 1, MAX_STAGING_CAPACITY)?;
        check_range("refill threshold", refill_threshold, 1, staging_capacity)?;
        check_range("refill batch", refill_batch, 1, staging_capacity)?;

        Ok(Self {
            staging_capacity,
            refill_threshold,
            refill_batch,
        })
    }

    /// Maximum size of the staging window (N)
    pub fn staging_capacity(&self) -> usize {
        self.staging_capacity
    }

    /// Refill when the staging window holds this many identifiers or fewer (Y)
    pub fn refill_threshold(&self) -> usize {
        self.refill_threshold
    }

    /// Maximum identifiers pulled per refill (Z)
    pub fn refill_batch(&self) -> usize {
        self.refill_batch
    }
}

impl Default for QueueParams {
    fn default() -> Self {
        Self {
            staging_capacity: DEFAULT_STAGING_CAPACITY,
            refill_threshold: DEFAULT_REFILL_THRESHOLD,
            refill_batch: DEFAULT_REFILL_BATCH,
        }
    }
}

fn check_range(name: &'static str, value: usize, min: usize, max: usize) -> QueueResult<()> {
    if value < min || value > max {
        return Err(QueueError::invalid_parameter(name, value, min, max));
    }
    Ok(())
}
