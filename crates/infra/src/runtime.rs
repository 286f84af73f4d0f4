//! Serving runtime
//!
//! Wires the model service, both monitors and their contexts the way a
//! serving process uses them: predictions feed text statistics to the data
//! drift context and latency to the performance context, evaluations feed
//! their metrics to the performance context.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use textops_common::observability::{MetricsCollector, NoOpMetricsCollector};
use textops_core::classifier::ports::ensure_same_length;
use textops_core::monitoring::features::{text_feature_samples, text_statistics};
use textops_core::{
    evaluate, AlertOutcome, DataDriftMonitor, DataDriftStrategy, EvaluationReport,
    Instrumentation, ModelRegistry, ModelService, MonitoringContext, PerformanceMonitor,
    PerformanceStrategy,
};
use textops_domain::{Config, Label, Result, TextOpsError};
use tracing::info;

use crate::classifiers::default_registry;
use crate::observability::tracing_alert;

/// One served prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted class
    pub label: Label,
    /// Probability of `label`
    pub confidence: f64,
    /// `p1` regardless of the predicted class
    pub positive_probability: f64,
}

/// Evaluation metrics plus what feeding them to the performance monitor did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Scored metrics
    pub report: EvaluationReport,
    /// Performance context outcome for the metrics
    pub alert: AlertOutcome,
}

/// Model service plus both drift monitors, wired for serving
#[derive(Debug)]
pub struct ServingRuntime {
    service: ModelService,
    performance: Arc<PerformanceMonitor>,
    data_drift: Arc<DataDriftMonitor>,
    performance_context: Arc<MonitoringContext>,
    data_drift_context: Arc<MonitoringContext>,
    serving: Instrumentation,
}

impl ServingRuntime {
    /// Build from `config` with the built-in registry and no metrics export.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_parts(config, default_registry(), Arc::new(NoOpMetricsCollector))
    }

    /// Build from `config` with an explicit registry and metrics collector.
    ///
    /// Initializes the configured model type and, when
    /// `config.model.artifact_path` is set, loads it. Both contexts start
    /// with the tracing alert sink attached.
    pub fn from_parts(
        config: &Config,
        registry: Arc<ModelRegistry>,
        metrics: Arc<dyn MetricsCollector>,
    ) -> Result<Self> {
        config.validate()?;

        let service = ModelService::new(registry);
        service.initialize(&config.model.model_type, &config.model.params)?;
        if let Some(path) = &config.model.artifact_path {
            service.load_into_active(path)?;
        }

        let performance = Arc::new(PerformanceMonitor::new(&config.monitoring.performance));
        let data_drift = Arc::new(DataDriftMonitor::new(&config.monitoring.data_drift));

        let performance_context = Arc::new(MonitoringContext::new(Arc::new(
            PerformanceStrategy::new(Arc::clone(&performance)),
        )));
        let data_drift_context = Arc::new(MonitoringContext::new(Arc::new(
            DataDriftStrategy::new(Arc::clone(&data_drift)),
        )));
        performance_context.add_alert_callback(tracing_alert());
        data_drift_context.add_alert_callback(tracing_alert());

        let serving = Instrumentation::new(metrics).with_context(Arc::clone(&performance_context));

        info!(
            model_type = %config.model.model_type,
            artifact = ?config.model.artifact_path,
            "Serving runtime ready"
        );
        Ok(Self { service, performance, data_drift, performance_context, data_drift_context, serving })
    }

    /// Train the active model in place.
    pub fn train(&self, texts: &[String], labels: &[Label]) -> Result<()> {
        let model = self.service.get_active()?;
        let result = model.write().train(texts, labels);
        result
    }

    /// Predict `texts` with the active model.
    ///
    /// The latency of a successful call goes to the performance context and
    /// the batch's text statistics go to the data drift context. Failed calls
    /// feed neither.
    pub fn predict(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        let model = self.service.get_active()?;
        let (labels, probabilities) = self
            .serving
            .try_run("predict", || {
                let guard = model.read();
                Ok::<_, TextOpsError>((guard.predict(texts)?, guard.predict_proba(texts)?))
            })?
            .value;

        if !texts.is_empty() {
            self.data_drift_context.monitor(&text_statistics(texts));
        }

        Ok(labels
            .into_iter()
            .zip(probabilities)
            .map(|(label, probabilities)| Prediction {
                label,
                confidence: probabilities.get(label),
                positive_probability: probabilities.positive(),
            })
            .collect())
    }

    /// Score the active model on labelled `texts` and feed the metrics to the
    /// performance context.
    pub fn evaluate(&self, texts: &[String], labels: &[Label]) -> Result<Evaluation> {
        ensure_same_length(texts, labels)?;
        let model = self.service.get_active()?;
        let (predictions, probabilities) = {
            let guard = model.read();
            (guard.predict(texts)?, guard.predict_proba(texts)?)
        };

        let report = evaluate(labels, &predictions, Some(&probabilities))?;
        let alert = self.performance_context.monitor(&report.to_observation());
        info!(
            samples = report.support,
            accuracy = report.accuracy,
            drift_detected = alert.drift_detected,
            "Evaluation recorded"
        );
        Ok(Evaluation { report, alert })
    }

    /// Persist the active model to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        self.service.save_active(path)
    }

    /// Replace the active model's state from `path`
    pub fn load(&self, path: &Path) -> Result<()> {
        self.service.load_into_active(path)
    }

    /// Capture current performance window means as the baseline.
    pub fn set_performance_baseline(&self) -> BTreeMap<String, f64> {
        self.performance.set_baseline()
    }

    /// Use the text statistics of `texts` as the data drift reference.
    pub fn set_reference(&self, texts: &[String]) -> usize {
        self.data_drift.set_reference(&text_feature_samples(texts))
    }

    /// The model service
    pub fn service(&self) -> &ModelService {
        &self.service
    }

    /// Shared handle to the performance monitor
    pub fn performance_monitor(&self) -> &Arc<PerformanceMonitor> {
        &self.performance
    }

    /// Shared handle to the data drift monitor
    pub fn data_drift_monitor(&self) -> &Arc<DataDriftMonitor> {
        &self.data_drift
    }

    /// Context fed with latency and evaluation metrics
    pub fn performance_context(&self) -> &Arc<MonitoringContext> {
        &self.performance_context
    }

    /// Context fed with text statistics
    pub fn data_drift_context(&self) -> &Arc<MonitoringContext> {
        &self.data_drift_context
    }
}
