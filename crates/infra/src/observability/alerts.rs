//! Alert callbacks for [`MonitoringContext`](textops_core::MonitoringContext)

use std::sync::Arc;

use textops_common::observability::MetricsCollector;
use textops_domain::Observation;

/// Counter incremented once per alert
pub const DRIFT_ALERTS_METRIC: &str = "drift_alerts_total";

/// Gauge per observed key, labelled `key=<name>`
pub const OBSERVED_VALUE_METRIC: &str = "drift_observed_value";

/// Logs the triggering observation at `warn!`.
pub fn tracing_alert() -> impl Fn(&Observation) -> anyhow::Result<()> + Send + Sync + 'static {
    |observation: &Observation| {
        let values = serde_json::to_string(observation)?;
        tracing::warn!(keys = observation.len(), observation = %values, "Drift alert raised");
        Ok(())
    }
}

/// Counts alerts and records each observed value as a gauge on `collector`.
pub fn metrics_alert(
    collector: Arc<dyn MetricsCollector>,
) -> impl Fn(&Observation) -> anyhow::Result<()> + Send + Sync + 'static {
    move |observation: &Observation| {
        collector.increment_counter(DRIFT_ALERTS_METRIC, &[]);
        for (key, value) in observation.iter() {
            collector.record_gauge(OBSERVED_VALUE_METRIC, value, &[("key", key)]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use textops_common::observability::InMemoryMetricsCollector;

    use super::*;

    #[test]
    fn metrics_alert_counts_and_records_values() {
        let collector = Arc::new(InMemoryMetricsCollector::new());
        let alert = metrics_alert(collector.clone());
        let observation = Observation::new().with("accuracy", 0.62).with("latency", 18.0);

        alert(&observation).unwrap();
        alert(&Observation::new().with("accuracy", 0.55)).unwrap();

        assert_eq!(collector.counter(DRIFT_ALERTS_METRIC, &[]), 2);
        assert_eq!(collector.gauge(OBSERVED_VALUE_METRIC, &[("key", "accuracy")]), Some(0.55));
        assert_eq!(collector.gauge(OBSERVED_VALUE_METRIC, &[("key", "latency")]), Some(18.0));
    }

    #[test]
    fn tracing_alert_accepts_any_observation() {
        let alert = tracing_alert();
        assert!(alert(&Observation::new()).is_ok());
        assert!(alert(&Observation::new().with("text_length", 1000.0)).is_ok());
    }
}
