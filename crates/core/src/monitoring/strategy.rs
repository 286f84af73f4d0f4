//! Monitoring strategies - a uniform `evaluate` over any monitor

use std::fmt::Debug;
use std::sync::Arc;

use textops_domain::Observation;

use super::data_drift::DataDriftMonitor;
use super::performance::PerformanceMonitor;
use super::Monitor;

/// Decides whether an observation should raise an alert.
///
/// New strategies plug into [`MonitoringContext`](super::context::MonitoringContext)
/// without touching it.
pub trait MonitoringStrategy: Send + Sync + Debug {
    /// Short name used in logs and metric labels
    fn name(&self) -> &str;

    /// Consume `observation` and report whether drift is present
    fn evaluate(&self, observation: &Observation) -> bool;
}

/// Records into a shared monitor, then runs its drift check.
///
/// The monitor is held by `Arc` so callers keep a handle for
/// `set_baseline` / `set_reference`.
#[derive(Debug)]
pub struct MonitorStrategy<M> {
    monitor: Arc<M>,
}

impl<M: Monitor> MonitorStrategy<M> {
    /// Wrap a shared monitor
    pub fn new(monitor: Arc<M>) -> Self {
        Self { monitor }
    }

    /// The wrapped monitor
    pub fn monitor(&self) -> &Arc<M> {
        &self.monitor
    }
}

impl<M: Monitor> MonitoringStrategy for MonitorStrategy<M> {
    fn name(&self) -> &str {
        self.monitor.kind().as_str()
    }

    fn evaluate(&self, observation: &Observation) -> bool {
        self.monitor.record(observation);
        self.monitor.check_drift()
    }
}

/// Strategy over a [`PerformanceMonitor`]
pub type PerformanceStrategy = MonitorStrategy<PerformanceMonitor>;
/// Strategy over a [`DataDriftMonitor`]
pub type DataDriftStrategy = MonitorStrategy<DataDriftMonitor>;
