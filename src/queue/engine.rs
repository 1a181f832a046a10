//! Call queue state machine
//!
//! Identifiers flow `source -> staging window -> active call -> completed | skipped`,
//! with recall moving a skipped identifier back to the front of the staging window.

use std::collections::VecDeque;
use std::fmt::Debug;

use log::{debug, trace};

use super::params::QueueParams;
use super::snapshot::QueueSnapshot;

/// Single-operator call queue.
///
/// Every identifier in `source[..cursor]` lives in exactly one of the staging
/// window, the active call slot, the completed list or the skipped list.
/// Operations never fail: calls and resolutions that have nothing to act on
/// are no-ops.
#[derive(Debug, Clone)]
pub struct QueueEngine<T = String> {
    source: Vec<T>,
    params: QueueParams,
    cursor: usize,
    staging: VecDeque<T>,
    active: Option<T>,
    completed: Vec<T>,
    skipped: Vec<T>,
}

impl<T: Clone + Debug> QueueEngine<T> {
    /// Create an engine over `source` and load the staging window.
    ///
    /// No identifier is active until [`call_next`](Self::call_next) or
    /// [`reset`](Self::reset) is invoked.
    pub fn new(source: impl IntoIterator<Item = T>, params: QueueParams) -> Self {
        let mut engine = Self {
            source: source.into_iter().collect(),
            params,
            cursor: 0,
            staging: VecDeque::with_capacity(params.staging_capacity()),
            active: None,
            completed: Vec::new(),
            skipped: Vec::new(),
        };
        engine.initialize();
        engine
    }

    /// Return to a clean state with the staging window loaded from the front of the source.
    pub fn initialize(&mut self) {
        let n = self.params.staging_capacity().min(self.source.len());
        self.staging = self.source[..n].iter().cloned().collect();
        self.cursor = n;
        self.active = None;
        self.completed.clear();
        self.skipped.clear();
        debug!("Queue initialized: {} staged, {} total", n, self.source.len());
    }

    /// Initialize, then call the first identifier.
    pub fn reset(&mut self) -> Option<&T> {
        self.initialize();
        self.call_next()
    }

    /// Promote the front of the staging window to the active call.
    ///
    /// Callers should only invoke this while no call is active: an unresolved
    /// active call is overwritten, not moved anywhere. With an empty staging
    /// window the active call becomes empty and `None` is returned.
    pub fn call_next(&mut self) -> Option<&T> {
        match self.staging.pop_front() {
            Some(next) => {
                debug!("Calling {:?}", next);
                self.active = Some(next);
                self.maybe_refill();
            }
            None => {
                debug!("Nothing left to call");
                self.active = None;
            }
        }
        self.active.as_ref()
    }

    /// Resolve the active call as completed and call the next identifier.
    ///
    /// Returns `false` without touching any state when no call is active.
    pub fn complete_and_next(&mut self) -> bool {
        let Some(current) = self.active.take() else {
            return false;
        };
        debug!("Completed {:?}", current);
        self.completed.push(current);
        self.call_next();
        true
    }

    /// Resolve the active call as skipped and call the next identifier.
    ///
    /// Returns `false` without touching any state when no call is active.
    pub fn skip_and_next(&mut self) -> bool {
        let Some(current) = self.active.take() else {
            return false;
        };
        debug!("Skipped {:?}", current);
        self.skipped.push(current);
        self.call_next();
        true
    }

    /// Move the skipped identifier at `index` to the front of the staging window.
    ///
    /// The staging capacity is not enforced here, so the window may grow past
    /// it. Neither a call nor a refill follows. Returns `false` and changes
    /// nothing when `index` is out of range.
    pub fn recall_skip(&mut self, index: usize) -> bool {
        if index >= self.skipped.len() {
            return false;
        }
        let recalled = self.skipped.remove(index);
        debug!("Recalled {:?} from skipped position {}", recalled, index);
        self.staging.push_front(recalled);
        true
    }

    fn maybe_refill(&mut self) {
        if self.staging.len() > self.params.refill_threshold() || self.cursor >= self.source.len() {
            return;
        }

        let room = self.params.staging_capacity().saturating_sub(self.staging.len());
        let end = self.source.len().min(self.cursor + self.params.refill_batch().min(room));
        self.staging.extend(self.source[self.cursor..end].iter().cloned());
        trace!("Refilled {} identifiers (cursor {} -> {})", end - self.cursor, self.cursor, end);
        self.cursor = end;
    }

    /// Identifiers ready to be called, front first
    pub fn staging(&self) -> &VecDeque<T> {
        &self.staging
    }

    /// Identifier currently presented to the operator
    pub fn active(&self) -> Option<&T> {
        self.active.as_ref()
    }

    /// Identifiers resolved as done, in resolution order
    pub fn completed(&self) -> &[T] {
        &self.completed
    }

    /// Identifiers resolved as skipped, in resolution order
    pub fn skipped(&self) -> &[T] {
        &self.skipped
    }

    /// Index of the next identifier not yet staged
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The full input order
    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn params(&self) -> QueueParams {
        self.params
    }

    /// Number of identifiers not yet staged
    pub fn remaining(&self) -> usize {
        self.source.len() - self.cursor
    }

    /// True when there is nothing active, nothing staged and nothing left to stage
    pub fn is_exhausted(&self) -> bool {
        self.active.is_none() && self.staging.is_empty() && self.remaining() == 0
    }

    /// Owned copy of the observable state
    pub fn snapshot(&self) -> QueueSnapshot<T> {
        QueueSnapshot {
            staging: self.staging.iter().cloned().collect(),
            active: self.active.clone(),
            skipped: self.skipped.clone(),
            completed: self.completed.clone(),
            cursor: self.cursor,
            total: self.source.len(),
            remaining: self.remaining(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (1..=n).map(|i| i.to_string()).collect()
    }

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn staged(engine: &QueueEngine) -> Vec<String> {
        engine.staging().iter().cloned().collect()
    }

    #[test]
    fn test_initialize_loads_front_of_source() {
        let engine = QueueEngine::new(numbered(12), QueueParams::default());
        assert_eq!(staged(&engine), numbered(10));
        assert_eq!(engine.cursor(), 10);
        assert!(engine.active().is_none());
        assert!(engine.completed().is_empty());
        assert!(engine.skipped().is_empty());
    }

    #[test]
    fn test_initialize_short_source() {
        let engine = QueueEngine::new(numbered(3), QueueParams::default());
        assert_eq!(staged(&engine), numbered(3));
        assert_eq!(engine.cursor(), 3);
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn test_initialize_clears_progress() {
        let mut engine = QueueEngine::new(numbered(12), QueueParams::default());
        engine.reset();
        engine.complete_and_next();
        engine.skip_and_next();
        engine.initialize();

        assert_eq!(staged(&engine), numbered(10));
        assert_eq!(engine.cursor(), 10);
        assert!(engine.active().is_none());
        assert!(engine.completed().is_empty());
        assert!(engine.skipped().is_empty());
    }

    #[test]
    fn test_reset_calls_first() {
        let mut engine = QueueEngine::new(numbered(12), QueueParams::default());
        assert_eq!(engine.reset().map(String::as_str), Some("1"));
        assert_eq!(staged(&engine), (2..=10).map(|i| i.to_string()).collect::<Vec<_>>());
        assert_eq!(engine.cursor(), 10);
    }

    #[test]
    fn test_reset_on_empty_source() {
        let mut engine: QueueEngine = QueueEngine::new(Vec::new(), QueueParams::default());
        assert!(engine.reset().is_none());
        assert!(engine.is_exhausted());
    }

    #[test]
    fn test_call_next_with_empty_staging_clears_active() {
        let mut engine = QueueEngine::new(strs(&["a"]), QueueParams::default());
        engine.call_next();
        assert_eq!(engine.active().map(String::as_str), Some("a"));

        // Double call: the unresolved active call is dropped
        assert!(engine.call_next().is_none());
        assert!(engine.active().is_none());
        assert!(engine.is_exhausted());
    }

    #[test]
    fn test_double_call_overwrites_active() {
        let mut engine = QueueEngine::new(strs(&["a", "b", "c"]), QueueParams::default());
        engine.call_next();
        engine.call_next();
        assert_eq!(engine.active().map(String::as_str), Some("b"));
        assert_eq!(staged(&engine), strs(&["c"]));
    }

    #[test]
    fn test_resolve_without_active_is_noop() {
        let mut engine = QueueEngine::new(numbered(12), QueueParams::default());
        let before = engine.snapshot();

        assert!(!engine.complete_and_next());
        assert!(!engine.skip_and_next());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_complete_and_skip_record_order() {
        let mut engine = QueueEngine::new(strs(&["a", "b", "c", "d"]), QueueParams::default());
        engine.reset();
        assert!(engine.skip_and_next());
        assert!(engine.complete_and_next());
        assert!(engine.skip_and_next());

        assert_eq!(engine.skipped(), strs(&["a", "c"]).as_slice());
        assert_eq!(engine.completed(), strs(&["b"]).as_slice());
        assert_eq!(engine.active().map(String::as_str), Some("d"));
    }

    #[test]
    fn test_last_resolution_leaves_no_active() {
        let mut engine = QueueEngine::new(strs(&["a"]), QueueParams::default());
        engine.reset();
        assert!(engine.complete_and_next());
        assert!(engine.active().is_none());
        assert!(engine.is_exhausted());
        assert!(!engine.complete_and_next());
    }

    #[test]
    fn test_recall_moves_to_front() {
        let mut engine = QueueEngine::new(strs(&["a", "b", "c", "d", "e"]), QueueParams::default());
        engine.reset();
        engine.skip_and_next();
        engine.skip_and_next();
        engine.skip_and_next();
        assert_eq!(engine.skipped(), strs(&["a", "b", "c"]).as_slice());

        assert!(engine.recall_skip(1));
        assert_eq!(engine.skipped(), strs(&["a", "c"]).as_slice());
        assert_eq!(staged(&engine), strs(&["b", "e"]));
        assert_eq!(engine.active().map(String::as_str), Some("d"));
    }

    #[test]
    fn test_recall_may_exceed_capacity() {
        let params = QueueParams::new(3, 1, 1).unwrap();
        let mut engine = QueueEngine::new(numbered(10), params);
        engine.reset();
        engine.skip_and_next();
        // staging [3, 4] was refilled only when it dropped to 1
        let before = engine.staging().len();
        assert!(engine.recall_skip(0));
        assert_eq!(engine.staging().len(), before + 1);
        assert_eq!(engine.staging().front().map(String::as_str), Some("1"));

        let params = QueueParams::new(2, 1, 1).unwrap();
        let mut engine = QueueEngine::new(numbered(10), params);
        engine.reset();
        engine.skip_and_next();
        engine.complete_and_next();
        assert_eq!(engine.staging().len(), 2);
        assert!(engine.recall_skip(0));
        assert_eq!(engine.staging().len(), 3);
    }

    #[test]
    fn test_recall_out_of_range_is_noop() {
        let mut engine = QueueEngine::new(strs(&["a", "b", "c"]), QueueParams::default());
        engine.reset();
        engine.skip_and_next();
        engine.skip_and_next();
        let before = engine.snapshot();

        assert!(!engine.recall_skip(2));
        assert!(!engine.recall_skip(5));
        assert!(!engine.recall_skip(usize::MAX));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_refill_respects_threshold_and_capacity() {
        let params = QueueParams::new(4, 2, 3).unwrap();
        let mut engine = QueueEngine::new(numbered(20), params);
        engine.reset();
        // staging [2,3,4] > Y, no refill
        assert_eq!(engine.cursor(), 4);
        engine.complete_and_next();
        // staging [3,4] <= Y, pull min(3, 4-2) = 2
        assert_eq!(staged(&engine), strs(&["3", "4", "5", "6"]));
        assert_eq!(engine.cursor(), 6);
    }

    #[test]
    fn test_refill_after_overflow_pulls_nothing() {
        let params = QueueParams::new(2, 2, 2).unwrap();
        let mut engine = QueueEngine::new(numbered(10), params);
        engine.reset();
        engine.skip_and_next();
        engine.skip_and_next();
        assert!(engine.recall_skip(0));
        assert!(engine.recall_skip(0));
        let cursor = engine.cursor();
        assert_eq!(engine.staging().len(), 4);

        // 4 -> 3 staged, still above the threshold: nothing pulled
        engine.complete_and_next();
        assert_eq!(engine.cursor(), cursor);
    }

    #[test]
    fn test_twelve_identifier_scenario() {
        let mut engine = QueueEngine::new(numbered(12), QueueParams::new(10, 5, 5).unwrap());
        assert_eq!(staged(&engine), numbered(10));
        assert_eq!(engine.cursor(), 10);

        engine.reset();
        assert_eq!(engine.active().map(String::as_str), Some("1"));
        assert_eq!(engine.staging().len(), 9);
        assert_eq!(engine.cursor(), 10);

        for _ in 0..4 {
            assert!(engine.complete_and_next());
        }
        // active 5 leaves [6..10] staged, at the threshold: the last two are pulled
        assert_eq!(engine.active().map(String::as_str), Some("5"));
        assert_eq!(engine.cursor(), 12);

        for _ in 0..3 {
            assert!(engine.complete_and_next());
        }
        assert_eq!(engine.active().map(String::as_str), Some("8"));
        assert_eq!(engine.completed(), numbered(7).as_slice());
        assert_eq!(staged(&engine), strs(&["9", "10", "11", "12"]));
        assert_eq!(engine.cursor(), 12);
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn test_generic_identifiers() {
        let mut engine = QueueEngine::new(1u32..=5, QueueParams::new(2, 1, 1).unwrap());
        assert_eq!(engine.reset(), Some(&1));
        engine.complete_and_next();
        assert_eq!(engine.active(), Some(&2));
        assert_eq!(engine.completed(), &[1]);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = QueueEngine::new(strs(&["a", "b", "c"]), QueueParams::new(2, 1, 1).unwrap());
        engine.reset();
        engine.skip_and_next();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.active.as_deref(), Some("b"));
        assert_eq!(snapshot.staging, strs(&["c"]));
        assert_eq!(snapshot.skipped, strs(&["a"]));
        assert!(snapshot.completed.is_empty());
        assert_eq!(snapshot.cursor, 3);
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.remaining, 0);
    }
}
