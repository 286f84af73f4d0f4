//! Data drift monitor - normalized mean shift against a reference sample

use std::collections::BTreeMap;

use parking_lot::Mutex;
use textops_domain::{DataDriftMonitorConfig, Observation};
use tracing::{debug, info, warn};

use super::report::{DriftReport, SkipReason};
use super::stats;
use super::window::RollingWindowStore;
use super::{Monitor, MonitorKind};

#[derive(Debug)]
struct DataDriftState {
    current: RollingWindowStore,
    reference: RollingWindowStore,
}

/// Compares live feature values with an explicitly supplied reference.
///
/// Each tracked feature has a current window fed by `record` and an
/// independent reference window written only by
/// [`set_reference`](Self::set_reference). A check computes, per feature,
///
/// ```text
/// score = |mean(current) - mean(reference)| / std(reference)
/// ```
///
/// over the whole current window. Features whose reference has zero
/// variance are skipped.
#[derive(Debug)]
pub struct DataDriftMonitor {
    drift_threshold: f64,
    state: Mutex<DataDriftState>,
}

impl DataDriftMonitor {
    /// Monitor tracking `config.features` with empty windows
    pub fn new(config: &DataDriftMonitorConfig) -> Self {
        let features = || config.features.iter().cloned();
        Self {
            drift_threshold: config.drift_threshold,
            state: Mutex::new(DataDriftState {
                current: RollingWindowStore::new(features(), config.window_size),
                reference: RollingWindowStore::new(features(), config.window_size),
            }),
        }
    }

    /// Monitor for `features` with the default window size and threshold
    pub fn with_features<I, K>(features: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let config = DataDriftMonitorConfig {
            features: features.into_iter().map(Into::into).collect(),
            ..DataDriftMonitorConfig::default()
        };
        Self::new(&config)
    }

    /// Normalized mean shift above which a feature drifts
    pub fn drift_threshold(&self) -> f64 {
        self.drift_threshold
    }

    /// Replace the reference window of every tracked feature present in
    /// `reference` with the first `window_size` supplied values.
    ///
    /// Features missing from `reference` keep their previous reference;
    /// untracked names are ignored. Returns how many features were updated.
    pub fn set_reference(&self, reference: &BTreeMap<String, Vec<f64>>) -> usize {
        let mut state = self.state.lock();
        let mut updated = 0;
        for (feature, values) in reference {
            if state.reference.replace_with_prefix(feature, values) {
                updated += 1;
                info!(
                    feature = %feature,
                    supplied = values.len(),
                    kept = state.reference.len(feature),
                    "Reference distribution set"
                );
            } else {
                debug!(feature = %feature, "Ignoring reference for untracked feature");
            }
        }
        updated
    }

    /// Reference window for `feature`, oldest-first
    pub fn reference(&self, feature: &str) -> Vec<f64> {
        self.state.lock().reference.snapshot(feature)
    }

    /// Current window for `feature`, oldest-first
    pub fn current(&self, feature: &str) -> Vec<f64> {
        self.state.lock().current.snapshot(feature)
    }
}

impl Default for DataDriftMonitor {
    fn default() -> Self {
        Self::new(&DataDriftMonitorConfig::default())
    }
}

impl Monitor for DataDriftMonitor {
    fn kind(&self) -> MonitorKind {
        MonitorKind::DataDrift
    }

    fn record(&self, observation: &Observation) {
        let mut state = self.state.lock();
        for (feature, value) in observation.iter() {
            if state.current.push(feature, value) {
                debug!(feature, value, "Recorded feature value");
            }
        }
    }

    fn drift_report(&self) -> DriftReport {
        let mut report = DriftReport::new(MonitorKind::DataDrift);
        let state = self.state.lock();

        if state.reference.all_empty() {
            warn!("No reference distribution set; skipping data drift check");
            for feature in state.reference.keys() {
                report.skip(feature, SkipReason::NoReference);
            }
            return report;
        }

        for feature in state.reference.keys() {
            let reference = state.reference.snapshot(feature);
            let (Some(ref_mean), Some(ref_std)) =
                (stats::mean(&reference), stats::population_std(&reference))
            else {
                report.skip(feature, SkipReason::NoReference);
                continue;
            };
            let Some(current_mean) = state.current.mean(feature) else {
                report.skip(feature, SkipReason::NoData);
                continue;
            };
            if ref_std == 0.0 {
                debug!(feature, "Reference has zero variance; feature skipped");
                report.skip(feature, SkipReason::ZeroVariance);
                continue;
            }

            let score = (current_mean - ref_mean).abs() / ref_std;
            let drifted = score > self.drift_threshold;
            if drifted {
                warn!(
                    feature,
                    ref_mean,
                    ref_std,
                    current_mean,
                    score,
                    threshold = self.drift_threshold,
                    "Data drift detected"
                );
            }
            report.finding(feature, score, self.drift_threshold, drifted);
        }

        report
    }
}
