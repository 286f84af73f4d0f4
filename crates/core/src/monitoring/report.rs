//! Drift check results

use serde::Serialize;

use super::MonitorKind;

/// Outcome for one tracked key that could be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftFinding {
    /// Metric or feature name
    pub key: String,
    /// Relative deviation (performance) or normalized mean shift (data)
    pub score: f64,
    /// Threshold the score was compared against
    pub threshold: f64,
    /// `score > threshold`
    pub drifted: bool,
}

/// Why a tracked key was left out of a drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No baseline captured for this metric
    NoBaseline,
    /// Reference window is empty
    NoReference,
    /// Nothing recorded yet
    NoData,
    /// Reference standard deviation is zero
    ZeroVariance,
}

/// A tracked key left out of a drift check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedKey {
    /// Metric or feature name
    pub key: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Full result of one `drift_report()` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftReport {
    /// Monitor that produced the report
    pub monitor: MonitorKind,
    /// Evaluated keys, in key order
    pub findings: Vec<DriftFinding>,
    /// Keys that could not be evaluated
    pub skipped: Vec<SkippedKey>,
}

impl DriftReport {
    /// Empty report for `monitor`
    pub fn new(monitor: MonitorKind) -> Self {
        Self { monitor, findings: Vec::new(), skipped: Vec::new() }
    }

    pub(crate) fn finding(&mut self, key: &str, score: f64, threshold: f64, drifted: bool) {
        self.findings.push(DriftFinding { key: key.to_string(), score, threshold, drifted });
    }

    pub(crate) fn skip(&mut self, key: &str, reason: SkipReason) {
        self.skipped.push(SkippedKey { key: key.to_string(), reason });
    }

    /// Logical OR across findings
    pub fn drift_detected(&self) -> bool {
        self.findings.iter().any(|finding| finding.drifted)
    }

    /// Names of the keys that drifted
    pub fn drifted_keys(&self) -> impl Iterator<Item = &str> {
        self.findings.iter().filter(|f| f.drifted).map(|f| f.key.as_str())
    }

    /// Finding for `key`, if it was evaluated
    pub fn finding_for(&self, key: &str) -> Option<&DriftFinding> {
        self.findings.iter().find(|f| f.key == key)
    }

    /// Why `key` was skipped, if it was
    pub fn skip_reason(&self, key: &str) -> Option<SkipReason> {
        self.skipped.iter().find(|s| s.key == key).map(|s| s.reason)
    }
}
