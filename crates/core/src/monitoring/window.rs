//! Per-key rolling windows

use std::collections::BTreeMap;

use textops_common::collections::RingBuffer;

use super::stats;

/// One bounded FIFO window per tracked key, all with the same capacity.
///
/// The key set is fixed at construction; pushes to other keys are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindowStore {
    capacity: usize,
    windows: BTreeMap<String, RingBuffer<f64>>,
}

impl RollingWindowStore {
    /// Create empty windows for `keys`. A zero capacity is clamped to `1`.
    pub fn new<I, K>(keys: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let capacity = capacity.max(1);
        let windows = keys.into_iter().map(|k| (k.into(), RingBuffer::new(capacity))).collect();
        Self { capacity, windows }
    }

    /// Capacity shared by every window
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tracked keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.windows.keys().map(String::as_str)
    }

    /// Whether `key` has a window
    pub fn tracks(&self, key: &str) -> bool {
        self.windows.contains_key(key)
    }

    /// Append `value`, evicting the oldest sample once the window is full.
    ///
    /// Returns `false` if `key` is not tracked.
    pub fn push(&mut self, key: &str, value: f64) -> bool {
        match self.windows.get_mut(key) {
            Some(window) => {
                let _ = window.push(value);
                true
            }
            None => false,
        }
    }

    /// Samples for `key`, oldest-first (empty if untracked)
    pub fn snapshot(&self, key: &str) -> Vec<f64> {
        self.windows.get(key).map(RingBuffer::to_vec).unwrap_or_default()
    }

    /// Most recent `min(n, len)` samples, oldest-first
    pub fn tail(&self, key: &str, n: usize) -> Vec<f64> {
        self.windows.get(key).map(|w| w.tail(n).copied().collect()).unwrap_or_default()
    }

    /// Samples held for `key`, `0` if untracked
    pub fn len(&self, key: &str) -> usize {
        self.windows.get(key).map_or(0, RingBuffer::len)
    }

    /// No samples held for `key`
    pub fn is_empty(&self, key: &str) -> bool {
        self.len(key) == 0
    }

    /// Mean of the whole window
    pub fn mean(&self, key: &str) -> Option<f64> {
        self.windows.get(key).and_then(|w| stats::mean(w))
    }

    /// Mean of the most recent `n` samples
    pub fn tail_mean(&self, key: &str, n: usize) -> Option<f64> {
        self.windows.get(key).and_then(|w| stats::mean(w.tail(n)))
    }

    /// Replace the window with the first `capacity` items of `values`.
    ///
    /// Returns `false` if `key` is not tracked.
    pub fn replace_with_prefix(&mut self, key: &str, values: &[f64]) -> bool {
        match self.windows.get_mut(key) {
            Some(window) => {
                *window = RingBuffer::from_prefix(self.capacity, values.iter().copied());
                true
            }
            None => false,
        }
    }

    /// `true` when every tracked window is empty
    pub fn all_empty(&self) -> bool {
        self.windows.values().all(RingBuffer::is_empty)
    }

    /// Empty every window, keeping the tracked keys
    pub fn clear(&mut self) {
        self.windows.values_mut().for_each(RingBuffer::clear);
    }
}
