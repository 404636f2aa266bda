//! Cancellable delayed events keyed by entity
//!
//! Replaces fire-and-forget timers: at most one event is pending per key,
//! events are polled from the frame loop and can be cancelled before they fire.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
struct Pending<E> {
    due_ms: f64,
    event: E,
}

/// Pending events, one slot per key
#[derive(Debug, Clone)]
pub struct Scheduler<K, E> {
    pending: BTreeMap<K, Pending<E>>,
}

impl<K: Ord + Copy, E> Default for Scheduler<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy, E> Scheduler<K, E> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }

    /// Schedule `event` for `key` unless one is already pending.
    ///
    /// Returns false (and keeps the earlier deadline) if the slot is taken.
    pub fn schedule(&mut self, key: K, due_ms: f64, event: E) -> bool {
        if self.pending.contains_key(&key) {
            return false;
        }
        self.pending.insert(key, Pending { due_ms, event });
        true
    }

    /// Drop the pending event for `key`
    pub fn cancel(&mut self, key: K) -> Option<E> {
        self.pending.remove(&key).map(|p| p.event)
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.contains_key(&key)
    }

    /// Deadline of the pending event for `key`
    pub fn due_at(&self, key: K) -> Option<f64> {
        self.pending.get(&key).map(|p| p.due_ms)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every event due at `now_ms`, earliest first (ties by key)
    pub fn take_due(&mut self, now_ms: f64) -> Vec<(K, E)> {
        let keys: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_ms <= now_ms)
            .map(|(k, _)| *k)
            .collect();

        let mut due: Vec<(f64, K, E)> = keys
            .into_iter()
            .filter_map(|k| self.pending.remove(&k).map(|p| (p.due_ms, k, p.event)))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, k, e)| (k, e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_fires_at_deadline() {
        let mut s = Scheduler::new();
        assert!(s.schedule(1u32, 2000.0, "go"));
        assert!(s.take_due(1999.0).is_empty());
        assert_eq!(s.take_due(2000.0), vec![(1, "go")]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_duplicate_schedule_keeps_first_deadline() {
        let mut s = Scheduler::new();
        assert!(s.schedule(7u32, 100.0, 'a'));
        assert!(!s.schedule(7u32, 500.0, 'b'));
        assert_eq!(s.due_at(7), Some(100.0));
        assert_eq!(s.take_due(100.0), vec![(7, 'a')]);
    }

    #[test]
    fn test_cancelled_event_never_fires() {
        let mut s = Scheduler::new();
        s.schedule(3u32, 10.0, ());
        assert_eq!(s.cancel(3), Some(()));
        assert!(!s.is_pending(3));
        assert!(s.take_due(f64::MAX).is_empty());
    }

    #[test]
    fn test_take_due_orders_by_deadline() {
        let mut s = Scheduler::new();
        s.schedule(1u32, 30.0, "late");
        s.schedule(2u32, 10.0, "early");
        s.schedule(3u32, 10.0, "early-tie");
        s.schedule(4u32, 99.0, "pending");
        assert_eq!(
            s.take_due(50.0),
            vec![(2, "early"), (3, "early-tie"), (1, "late")]
        );
        assert!(s.is_pending(4));
        assert!(!s.is_empty());
    }
}
