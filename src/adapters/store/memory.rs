use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::Utc;

use crate::domain::{MetricSet, MetricSnapshot};

/// Both views of the telemetry state live behind one lock so a reader can
/// never see a history tail that disagrees with the current set.
struct StoreInner {
    current: MetricSet,
    history: VecDeque<MetricSnapshot>,
}

/// In-memory ring buffer of metric snapshots plus the latest sample.
///
/// Written by the single sampler task, read by any number of request
/// handlers. Reads hand out copies; the internal maps are never aliased into
/// caller state.
pub struct SnapshotStore {
    inner: RwLock<StoreInner>,
    capacity: usize,
}

impl SnapshotStore {
    pub fn new(capacity: usize) -> Self {
        // A zero-capacity history could never hold the current sample.
        let capacity = capacity.max(1);
        Self {
            inner: RwLock::new(StoreInner {
                current: MetricSet::new(),
                history: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// Replace the current metrics and append a snapshot, evicting the
    /// oldest entry once the history is full. One critical section covers
    /// both fields.
    pub fn record_sample(&self, metrics: MetricSet) {
        let mut inner = self.inner.write().unwrap();

        if inner.history.len() >= self.capacity {
            inner.history.pop_front();
        }

        inner.history.push_back(MetricSnapshot::new(Utc::now(), metrics.clone()));
        inner.current = metrics;

        debug_assert!(inner.history.len() <= self.capacity);
        debug_assert!(inner
            .history
            .back()
            .is_some_and(|tail| tail.metrics == inner.current));
    }

    /// Copy of the most recent sample; empty before the first tick
    pub fn current(&self) -> MetricSet {
        self.inner.read().unwrap().current.clone()
    }

    /// Copy of the full history, oldest first
    pub fn history(&self) -> Vec<MetricSnapshot> {
        let inner = self.inner.read().unwrap();
        inner.history.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().history.len()
    }

    /// Current metrics and history tail observed under one lock
    #[cfg(test)]
    fn read_pair(&self) -> (MetricSet, Option<MetricSnapshot>) {
        let inner = self.inner.read().unwrap();
        (inner.current.clone(), inner.history.back().cloned())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    fn sample(value: f64) -> MetricSet {
        let mut m = MetricSet::new();
        m.insert("cpu_usage".to_string(), value);
        m
    }

    #[test]
    fn empty_store_reads() {
        let store = SnapshotStore::new(10);
        assert!(store.current().is_empty());
        assert!(store.history().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn current_tracks_last_sample() {
        let store = SnapshotStore::new(10);
        store.record_sample(sample(1.0));
        store.record_sample(sample(2.0));

        assert_eq!(store.current().get("cpu_usage"), Some(&2.0));
        let history = store.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().metrics.get("cpu_usage"), Some(&2.0));
    }

    #[test]
    fn history_is_bounded() {
        let store = SnapshotStore::new(5);
        for i in 0..20 {
            store.record_sample(sample(i as f64));
            assert!(store.len() <= 5);
        }
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn eviction_is_fifo() {
        let store = SnapshotStore::new(3);
        for i in 1..=4 {
            store.record_sample(sample(i as f64));
        }

        let values: Vec<f64> = store
            .history()
            .iter()
            .map(|s| s.metrics["cpu_usage"])
            .collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn history_is_chronological() {
        let store = SnapshotStore::new(10);
        for i in 0..4 {
            store.record_sample(sample(i as f64));
        }

        let history = store.history();
        for pair in history.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn readers_never_see_torn_state() {
        // One writer alternates between two distinguishable samples while
        // readers check that current always matches the history tail.
        let store = Arc::new(SnapshotStore::new(50));
        let stop = Arc::new(AtomicBool::new(false));

        store.record_sample(sample(0.0));

        let writer = {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                let mut i = 0.0;
                while !stop.load(Ordering::Relaxed) {
                    store.record_sample(sample(i));
                    i += 1.0;
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let (current, tail) = store.read_pair();
                        assert_eq!(current, tail.unwrap().metrics);
                        assert!(store.history().len() <= 50);
                    }
                })
            })
            .collect();

        for reader in readers {
            reader.join().unwrap();
        }
        stop.store(true, Ordering::Relaxed);
        writer.join().unwrap();

        // Final quiescent check: the two views agree exactly.
        let history = store.history();
        assert_eq!(history.last().unwrap().metrics, store.current());
    }
}
