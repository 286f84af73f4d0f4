//! Explicit timing boundary around public operations
//!
//! Call sites wrap an operation in [`Instrumentation::run`] or, when it can
//! fail, [`Instrumentation::try_run`]. Each run opens a `tracing` span and
//! records `operation_duration_ms{operation=...}` on the metrics collector.
//! When a monitoring context is bound, `{"latency": ms}` is fed into it for
//! successful runs only; failed runs count towards
//! `operation_errors_total{operation,severity}` instead.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use textops_common::error::{ErrorClassification, ErrorSeverity};
use textops_common::observability::{MetricsCollector, NoOpMetricsCollector};
use textops_domain::constants::METRIC_LATENCY;
use textops_domain::Observation;
use tracing::{debug, error, info_span, warn};

use crate::monitoring::context::{AlertOutcome, MonitoringContext};

/// Histogram name for operation wall time
pub const OPERATION_DURATION_METRIC: &str = "operation_duration_ms";

/// Counter of failed instrumented operations
pub const OPERATION_ERRORS_METRIC: &str = "operation_errors_total";

/// Result of an instrumented call
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    /// What the operation returned
    pub value: T,
    /// Wall time in milliseconds
    pub duration_ms: f64,
    /// Set when a context was bound
    pub alert: Option<AlertOutcome>,
}

/// Timing wrapper shared by the serving call sites
#[derive(Clone)]
pub struct Instrumentation {
    metrics: Arc<dyn MetricsCollector>,
    context: Option<Arc<MonitoringContext>>,
}

impl Instrumentation {
    /// Record timings on `metrics`, with no context bound
    pub fn new(metrics: Arc<dyn MetricsCollector>) -> Self {
        Self { metrics, context: None }
    }

    /// Spans only; no metrics, no monitoring
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoOpMetricsCollector))
    }

    /// Push each measured latency into `context`
    #[must_use]
    pub fn with_context(mut self, context: Arc<MonitoringContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// Run `operation` and return its value.
    pub fn run<T>(&self, name: &str, operation: impl FnOnce() -> T) -> T {
        self.measure(name, operation).value
    }

    /// Run `operation` and return its value with the measured duration.
    pub fn measure<T>(&self, name: &str, operation: impl FnOnce() -> T) -> Timed<T> {
        let (value, duration_ms) = self.time(name, operation);
        let alert = self.feed_latency(duration_ms);
        Timed { value, duration_ms, alert }
    }

    /// Run a fallible `operation`.
    ///
    /// The duration histogram is recorded either way. Latency reaches the
    /// bound context only on `Ok`; an `Err` is logged at a level matching
    /// its severity and counted instead.
    pub fn try_run<T, E>(
        &self,
        name: &str,
        operation: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<Timed<T>, E>
    where
        E: ErrorClassification + fmt::Display,
    {
        let (result, duration_ms) = self.time(name, operation);
        match result {
            Ok(value) => {
                let alert = self.feed_latency(duration_ms);
                Ok(Timed { value, duration_ms, alert })
            }
            Err(err) => {
                let severity = err.severity();
                if severity >= ErrorSeverity::Error {
                    error!(operation = name, %severity, error = %err, "Operation failed");
                } else {
                    warn!(operation = name, %severity, error = %err, "Operation failed");
                }
                let severity = severity.to_string();
                self.metrics.increment_counter(
                    OPERATION_ERRORS_METRIC,
                    &[("operation", name), ("severity", severity.as_str())],
                );
                Err(err)
            }
        }
    }

    fn time<T>(&self, name: &str, operation: impl FnOnce() -> T) -> (T, f64) {
        let span = info_span!("operation", operation = name);
        let _guard = span.enter();

        let started = Instant::now();
        let value = operation();
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        self.metrics.record_timing(OPERATION_DURATION_METRIC, duration_ms, &[("operation", name)]);
        debug!(operation = name, duration_ms, "Operation finished");
        (value, duration_ms)
    }

    fn feed_latency(&self, duration_ms: f64) -> Option<AlertOutcome> {
        self.context
            .as_ref()
            .map(|context| context.monitor(&Observation::new().with(METRIC_LATENCY, duration_ms)))
    }
}

impl Default for Instrumentation {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for Instrumentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumentation")
            .field("metrics", &self.metrics)
            .field("context", &self.context.is_some())
            .finish()
    }
}
