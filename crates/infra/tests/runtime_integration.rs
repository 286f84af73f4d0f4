//! End-to-end tests for the serving runtime: training, serving, evaluation
//! and both drift monitors wired through their contexts.

mod support;

use std::sync::Arc;

use support::{capture_logs, essay, held_out, sentiment_corpus, strings};
use tempfile::TempDir;
use textops_common::observability::{InMemoryMetricsCollector, MetricsCollector};
use textops_core::instrumentation::OPERATION_DURATION_METRIC;
use textops_core::{ModelService, Monitor};
use textops_domain::{Config, Label, ModelParams, TextOpsError};
use textops_infra::classifiers::default_registry;
use textops_infra::observability::{metrics_alert, DRIFT_ALERTS_METRIC};
use textops_infra::ServingRuntime;

fn accuracy_only_config() -> Config {
    let mut config = Config::default();
    config.monitoring.performance.metrics = vec!["accuracy".to_string()];
    config
}

fn trained_runtime(config: &Config) -> ServingRuntime {
    let runtime = ServingRuntime::from_config(config).expect("runtime should build");
    let (texts, labels) = sentiment_corpus();
    runtime.train(&texts, &labels).expect("training should succeed");
    runtime
}

#[test]
fn fresh_runtime_has_an_untrained_model() {
    let runtime = ServingRuntime::from_config(&Config::default()).unwrap();

    assert!(runtime.service().is_initialized());
    assert!(matches!(runtime.predict(&strings(&["hello"])), Err(TextOpsError::ModelNotTrained)));
    assert!(runtime.performance_monitor().window("latency").is_empty());
    assert!(runtime.data_drift_monitor().current("text_length").is_empty());
    assert_eq!(runtime.performance_context().callback_count(), 1);
    assert_eq!(runtime.data_drift_context().callback_count(), 1);
}

#[test]
fn predictions_carry_calibrated_confidence() {
    let runtime = trained_runtime(&Config::default());
    let (texts, labels) = held_out();

    let predictions = runtime.predict(&texts).unwrap();
    assert_eq!(predictions.iter().map(|p| p.label).collect::<Vec<_>>(), labels);
    for prediction in &predictions {
        assert!(prediction.confidence > 0.5);
        let expected = match prediction.label {
            Label::Positive => prediction.positive_probability,
            Label::Negative => 1.0 - prediction.positive_probability,
        };
        assert!((prediction.confidence - expected).abs() < 1e-12);
    }

    assert!(runtime.predict(&[]).unwrap().is_empty());
}

#[test]
fn predict_feeds_latency_to_the_performance_monitor() {
    let metrics = Arc::new(InMemoryMetricsCollector::new());
    let runtime = ServingRuntime::from_parts(
        &Config::default(),
        default_registry(),
        Arc::clone(&metrics) as Arc<dyn MetricsCollector>,
    )
    .unwrap();
    let (texts, labels) = sentiment_corpus();
    runtime.train(&texts, &labels).unwrap();

    runtime.predict(&texts).unwrap();
    runtime.predict(&texts[..2]).unwrap();

    assert_eq!(runtime.performance_monitor().window("latency").len(), 2);
    assert_eq!(metrics.histogram(OPERATION_DURATION_METRIC, &[("operation", "predict")]).len(), 2);
}

#[test]
fn evaluation_drop_raises_a_performance_alert() {
    let runtime = trained_runtime(&accuracy_only_config());
    let (texts, labels) = sentiment_corpus();

    let first = runtime.evaluate(&texts, &labels).unwrap();
    assert_eq!(first.report.accuracy, 1.0);
    assert!(!first.alert.drift_detected);

    let baseline = runtime.set_performance_baseline();
    assert_eq!(baseline.get("accuracy"), Some(&1.0));

    let flipped: Vec<Label> =
        labels.iter().map(|l| Label::from_positive(*l == Label::Negative)).collect();
    let (second, logs) = capture_logs(|| runtime.evaluate(&texts, &flipped).unwrap());

    assert_eq!(second.report.accuracy, 0.0);
    assert!(second.alert.drift_detected);
    assert_eq!(second.alert.callbacks_invoked, 1);
    assert_eq!(second.alert.callbacks_failed, 0);
    assert!(logs.contains("WARN", "Drift alert raised"));
}

#[test]
fn evaluation_checks_lengths_before_predicting() {
    let runtime = ServingRuntime::from_config(&Config::default()).unwrap();
    let err = runtime.evaluate(&strings(&["a", "b"]), &[Label::Positive]).unwrap_err();
    assert!(matches!(err, TextOpsError::LengthMismatch { texts: 2, labels: 1 }));
}

#[test]
fn long_texts_raise_a_data_drift_alert() {
    let runtime = trained_runtime(&Config::default());
    let alerts = Arc::new(InMemoryMetricsCollector::new());
    runtime.data_drift_context().add_alert_callback(metrics_alert(alerts.clone()));
    let (texts, _) = sentiment_corpus();

    // No reference yet: the monitor skips every feature.
    runtime.predict(&[essay()]).unwrap();
    assert_eq!(alerts.counter(DRIFT_ALERTS_METRIC, &[]), 0);

    assert_eq!(runtime.set_reference(&texts), 2);
    runtime.predict(&[essay()]).unwrap();
    assert_eq!(alerts.counter(DRIFT_ALERTS_METRIC, &[]), 1);
    assert!(runtime.data_drift_monitor().check_drift());
}

#[test]
fn typical_texts_do_not_drift() {
    let runtime = trained_runtime(&Config::default());
    let alerts = Arc::new(InMemoryMetricsCollector::new());
    runtime.data_drift_context().add_alert_callback(metrics_alert(alerts.clone()));
    let (texts, _) = sentiment_corpus();
    runtime.set_reference(&texts);

    // One batch whose means equal the reference means.
    runtime.predict(&texts).unwrap();
    assert_eq!(alerts.counter(DRIFT_ALERTS_METRIC, &[]), 0);
    assert!(!runtime.data_drift_monitor().check_drift());
}

#[test]
fn configured_artifact_is_loaded_at_start_up() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sentiment.json");
    let trained = trained_runtime(&Config::default());
    trained.save(&path).unwrap();

    let mut config = Config::default();
    config.model.artifact_path = Some(path.clone());
    let restored = ServingRuntime::from_config(&config).unwrap();

    let (texts, _) = held_out();
    let before = trained.predict(&texts).unwrap();
    let after = restored.predict(&texts).unwrap();
    assert_eq!(before, after);

    config.model.artifact_path = Some(dir.path().join("missing.json"));
    assert!(matches!(ServingRuntime::from_config(&config), Err(TextOpsError::FileNotFound(_))));
}

#[test]
fn load_replaces_the_active_model_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sentiment.json");
    trained_runtime(&Config::default()).save(&path).unwrap();

    let runtime = ServingRuntime::from_config(&Config::default()).unwrap();
    assert!(runtime.save(&path).is_err());
    runtime.load(&path).unwrap();
    assert_eq!(runtime.predict(&held_out().0).unwrap().len(), 2);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = Config::default();
    config.monitoring.data_drift.window_size = 0;
    assert!(matches!(ServingRuntime::from_config(&config), Err(TextOpsError::Config(_))));
}

#[test]
fn reinitializing_the_service_logs_a_replacement_warning() {
    let service = ModelService::new(default_registry());

    let (first, logs) = capture_logs(|| service.initialize("svm", &ModelParams::new()));
    let first = first.unwrap();
    assert!(logs.contains("INFO", "Model initialized"));
    assert!(!logs.contents().contains("WARN"));

    let (second, logs) = capture_logs(|| service.initialize("svm", &ModelParams::new()));
    let second = second.unwrap();
    assert!(logs.contains("WARN", "replacing it"));
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&second, &service.get_active().unwrap()));
}
