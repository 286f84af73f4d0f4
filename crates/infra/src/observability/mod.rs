//! Observability infrastructure: subscriber set-up and drift alert sinks

pub mod alerts;
pub mod logging;

pub use alerts::{metrics_alert, tracing_alert, DRIFT_ALERTS_METRIC, OBSERVED_VALUE_METRIC};
pub use logging::init_tracing;
