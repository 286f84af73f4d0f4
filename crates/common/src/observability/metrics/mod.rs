//! Metrics collection trait and the in-process implementations
//!
//! Series are identified by name plus labels. The in-memory collector
//! flattens them into a single key of the form `name{k1=v1,k2=v2}` with
//! labels sorted by key, so the same labels in a different order land on the
//! same series.

use std::collections::BTreeMap;
use std::fmt::Debug;

use parking_lot::Mutex;
use serde::Serialize;

/// Trait for metrics collection implementations
///
/// Allows components to emit metrics without depending on a specific
/// metrics collection system.
pub trait MetricsCollector: Send + Sync + Debug {
    /// Record a counter metric
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]);

    /// Record a gauge metric
    fn record_gauge(&self, name: &str, value: f64, labels: &[(&str, &str)]);

    /// Record a histogram metric
    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]);

    /// Record timing metric (in milliseconds)
    fn record_timing(&self, name: &str, duration_ms: f64, labels: &[(&str, &str)]) {
        self.record_histogram(name, duration_ms, labels);
    }
}

/// No-op metrics collector for when metrics are disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetricsCollector;

impl MetricsCollector for NoOpMetricsCollector {
    fn increment_counter(&self, _name: &str, _labels: &[(&str, &str)]) {}

    fn record_gauge(&self, _name: &str, _value: f64, _labels: &[(&str, &str)]) {}

    fn record_histogram(&self, _name: &str, _value: f64, _labels: &[(&str, &str)]) {}
}

/// Point-in-time copy of everything an [`InMemoryMetricsCollector`] holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Counter totals by series key
    pub counters: BTreeMap<String, u64>,
    /// Last written gauge value by series key
    pub gauges: BTreeMap<String, f64>,
    /// Every histogram observation by series key, in arrival order
    pub histograms: BTreeMap<String, Vec<f64>>,
}

/// Thread-safe collector that keeps all series in memory.
///
/// # Example
/// ```
/// use textops_common::observability::{InMemoryMetricsCollector, MetricsCollector};
///
/// let collector = InMemoryMetricsCollector::new();
/// collector.increment_counter("drift_alerts_total", &[("monitor", "performance")]);
/// assert_eq!(collector.counter("drift_alerts_total", &[("monitor", "performance")]), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMetricsCollector {
    inner: Mutex<MetricsSnapshot>,
}

impl InMemoryMetricsCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter, `0` if it was never incremented
    pub fn counter(&self, name: &str, labels: &[(&str, &str)]) -> u64 {
        self.inner.lock().counters.get(&series_key(name, labels)).copied().unwrap_or(0)
    }

    /// Last value written to a gauge
    pub fn gauge(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        self.inner.lock().gauges.get(&series_key(name, labels)).copied()
    }

    /// All observations recorded for a histogram
    pub fn histogram(&self, name: &str, labels: &[(&str, &str)]) -> Vec<f64> {
        self.inner.lock().histograms.get(&series_key(name, labels)).cloned().unwrap_or_default()
    }

    /// Copy of every series
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner.lock().clone()
    }

    /// Drop all recorded series
    pub fn reset(&self) {
        *self.inner.lock() = MetricsSnapshot::default();
    }
}

impl MetricsCollector for InMemoryMetricsCollector {
    fn increment_counter(&self, name: &str, labels: &[(&str, &str)]) {
        *self.inner.lock().counters.entry(series_key(name, labels)).or_insert(0) += 1;
    }

    fn record_gauge(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.inner.lock().gauges.insert(series_key(name, labels), value);
    }

    fn record_histogram(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        self.inner.lock().histograms.entry(series_key(name, labels)).or_default().push(value);
    }
}

fn series_key(name: &str, labels: &[(&str, &str)]) -> String {
    if labels.is_empty() {
        return name.to_string();
    }
    let mut sorted = labels.to_vec();
    sorted.sort_unstable();
    let rendered: Vec<String> = sorted.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{name}{{{}}}", rendered.join(","))
}
