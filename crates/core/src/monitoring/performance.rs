//! Performance monitor - relative drift of recent metrics against a baseline

use std::collections::BTreeMap;

use parking_lot::Mutex;
use textops_domain::{Observation, PerformanceMonitorConfig};
use tracing::{debug, info, warn};

use super::report::{DriftReport, SkipReason};
use super::window::RollingWindowStore;
use super::{Monitor, MonitorKind};

#[derive(Debug)]
struct PerformanceState {
    windows: RollingWindowStore,
    baseline: BTreeMap<String, f64>,
}

/// Tracks scalar run metrics (accuracy, latency, ...) in rolling windows.
///
/// [`set_baseline`](Self::set_baseline) captures the mean of each window at
/// call time. A drift check then compares the mean of the last
/// `recent_window` samples against it:
///
/// ```text
/// score = |recent_mean - baseline| / |baseline|      drift iff score > threshold
/// ```
///
/// A zero baseline drifts iff the recent mean is non-zero.
#[derive(Debug)]
pub struct PerformanceMonitor {
    drift_threshold: f64,
    recent_window: usize,
    state: Mutex<PerformanceState>,
}

impl PerformanceMonitor {
    /// Monitor tracking `config.metrics` with no baseline
    pub fn new(config: &PerformanceMonitorConfig) -> Self {
        Self {
            drift_threshold: config.drift_threshold,
            recent_window: config.recent_window.max(1),
            state: Mutex::new(PerformanceState {
                windows: RollingWindowStore::new(config.metrics.iter().cloned(), config.window_size),
                baseline: BTreeMap::new(),
            }),
        }
    }

    /// Monitor for `metrics` with the default window, threshold and recent window
    pub fn with_metrics<I, K>(metrics: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let config = PerformanceMonitorConfig {
            metrics: metrics.into_iter().map(Into::into).collect(),
            ..PerformanceMonitorConfig::default()
        };
        Self::new(&config)
    }

    /// Relative change above which a metric drifts
    pub fn drift_threshold(&self) -> f64 {
        self.drift_threshold
    }

    /// Capture the mean of every non-empty window as its baseline.
    ///
    /// Returns the baselines written by this call. Metrics with empty windows
    /// are skipped.
    pub fn set_baseline(&self) -> BTreeMap<String, f64> {
        let mut state = self.state.lock();
        let captured: BTreeMap<String, f64> = state
            .windows
            .keys()
            .filter_map(|metric| state.windows.mean(metric).map(|mean| (metric.to_string(), mean)))
            .collect();
        state.baseline.extend(captured.clone());
        info!(metrics = captured.len(), baseline = ?captured, "Performance baseline set");
        captured
    }

    /// Captured baseline for `metric`
    pub fn baseline(&self, metric: &str) -> Option<f64> {
        self.state.lock().baseline.get(metric).copied()
    }

    /// Copy of every captured baseline
    pub fn baselines(&self) -> BTreeMap<String, f64> {
        self.state.lock().baseline.clone()
    }

    /// Window contents for `metric`, oldest-first
    pub fn window(&self, metric: &str) -> Vec<f64> {
        self.state.lock().windows.snapshot(metric)
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(&PerformanceMonitorConfig::default())
    }
}

impl Monitor for PerformanceMonitor {
    fn kind(&self) -> MonitorKind {
        MonitorKind::Performance
    }

    fn record(&self, observation: &Observation) {
        let mut state = self.state.lock();
        for (metric, value) in observation.iter() {
            if state.windows.push(metric, value) {
                debug!(metric, value, "Recorded performance metric");
            }
        }
    }

    fn drift_report(&self) -> DriftReport {
        let mut report = DriftReport::new(MonitorKind::Performance);
        let state = self.state.lock();

        if state.baseline.is_empty() {
            warn!("No performance baseline set; skipping drift check");
            for metric in state.windows.keys() {
                report.skip(metric, SkipReason::NoBaseline);
            }
            return report;
        }

        for metric in state.windows.keys() {
            let Some(baseline) = state.baseline.get(metric).copied() else {
                report.skip(metric, SkipReason::NoBaseline);
                continue;
            };
            let Some(recent) = state.windows.tail_mean(metric, self.recent_window) else {
                report.skip(metric, SkipReason::NoData);
                continue;
            };

            let (score, drifted) = if baseline == 0.0 {
                let drifted = recent != 0.0;
                (if drifted { f64::INFINITY } else { 0.0 }, drifted)
            } else {
                let score = (recent - baseline).abs() / baseline.abs();
                (score, score > self.drift_threshold)
            };

            if drifted {
                warn!(
                    metric,
                    baseline,
                    recent_mean = recent,
                    score,
                    threshold = self.drift_threshold,
                    "Performance drift detected"
                );
            }
            report.finding(metric, score, self.drift_threshold, drifted);
        }

        report
    }
}
