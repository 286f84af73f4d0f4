//! Drift monitoring engine
//!
//! Two monitors ([`PerformanceMonitor`](performance::PerformanceMonitor) and
//! [`DataDriftMonitor`](data_drift::DataDriftMonitor)) keep bounded windows
//! of observed values and compare them against a captured baseline or an
//! explicit reference. A [`MonitoringContext`](context::MonitoringContext)
//! runs one of them through a [`MonitoringStrategy`](strategy::MonitoringStrategy)
//! and fans detected drift out to alert callbacks.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use textops_common::impl_str_conversions;
use textops_domain::Observation;

pub mod context;
pub mod data_drift;
pub mod features;
pub mod performance;
pub mod report;
pub mod stats;
pub mod strategy;
pub mod window;

use report::DriftReport;

/// Which family of drift a monitor detects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorKind {
    /// Relative change of run metrics against a baseline
    Performance,
    /// Normalized shift of feature means against a reference
    DataDrift,
}

impl_str_conversions!(MonitorKind {
    Performance => "performance",
    DataDrift => "data_drift",
});

/// Records observations and judges whether they drifted.
///
/// Implementations own their windows behind their own lock, so every method
/// takes `&self`.
pub trait Monitor: Send + Sync + Debug {
    /// Family of drift this monitor detects
    fn kind(&self) -> MonitorKind;

    /// Push the tracked keys of `observation`; other keys are ignored.
    fn record(&self, observation: &Observation);

    /// Per-key drift evaluation
    fn drift_report(&self) -> DriftReport;

    /// `true` if any tracked key drifted
    fn check_drift(&self) -> bool {
        self.drift_report().drift_detected()
    }
}
