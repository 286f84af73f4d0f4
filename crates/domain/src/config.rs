//! Configuration structures
//!
//! Every section implements `Default` with the documented defaults and is
//! `#[serde(default)]`, so a config file only needs the keys it overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DATA_DRIFT_THRESHOLD, DEFAULT_DATA_WINDOW_SIZE, DEFAULT_DRIFT_FEATURES,
    DEFAULT_LOG_LEVEL, DEFAULT_MODEL_TYPE, DEFAULT_PERFORMANCE_DRIFT_THRESHOLD,
    DEFAULT_PERFORMANCE_METRICS, DEFAULT_PERFORMANCE_WINDOW_SIZE, DEFAULT_RECENT_WINDOW,
};
use crate::errors::{Result, TextOpsError};
use crate::types::ModelParams;

/// Top-level TextOps configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active model selection
    pub model: ModelConfig,
    /// Drift monitor settings
    pub monitoring: MonitoringConfig,
    /// Tracing subscriber settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Check every section, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.monitoring.performance.validate()?;
        self.monitoring.data_drift.validate()?;
        self.logging.validate()
    }
}

/// Which classifier to build and where its artifact lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Registry name, e.g. `"svm"`
    pub model_type: String,
    /// Constructor keyword arguments
    pub params: ModelParams,
    /// Artifact to load on startup, if any
    pub artifact_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_type: DEFAULT_MODEL_TYPE.to_string(),
            params: ModelParams::default(),
            artifact_path: None,
        }
    }
}

impl ModelConfig {
    fn validate(&self) -> Result<()> {
        if self.model_type.trim().is_empty() {
            return Err(TextOpsError::config("model.model_type must not be empty"));
        }
        Ok(())
    }
}

/// Settings for both drift monitors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Performance monitor
    pub performance: PerformanceMonitorConfig,
    /// Data drift monitor
    pub data_drift: DataDriftMonitorConfig,
}

/// Performance monitor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMonitorConfig {
    /// Metric names to track
    pub metrics: Vec<String>,
    /// Per-metric history length
    pub window_size: usize,
    /// Relative deviation from baseline above which drift is reported
    pub drift_threshold: f64,
    /// Number of most recent values averaged against the baseline
    pub recent_window: usize,
}

impl Default for PerformanceMonitorConfig {
    fn default() -> Self {
        Self {
            metrics: DEFAULT_PERFORMANCE_METRICS.iter().map(ToString::to_string).collect(),
            window_size: DEFAULT_PERFORMANCE_WINDOW_SIZE,
            drift_threshold: DEFAULT_PERFORMANCE_DRIFT_THRESHOLD,
            recent_window: DEFAULT_RECENT_WINDOW,
        }
    }
}

impl PerformanceMonitorConfig {
    /// Reject a zero window or a negative or non-finite threshold
    pub fn validate(&self) -> Result<()> {
        validate_window("monitoring.performance.window_size", self.window_size)?;
        validate_window("monitoring.performance.recent_window", self.recent_window)?;
        validate_threshold("monitoring.performance.drift_threshold", self.drift_threshold)
    }
}

/// Data drift monitor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataDriftMonitorConfig {
    /// Feature names to track
    pub features: Vec<String>,
    /// Current-window length per feature
    pub window_size: usize,
    /// Mean shift, in reference standard deviations, that counts as drift
    pub drift_threshold: f64,
}

impl Default for DataDriftMonitorConfig {
    fn default() -> Self {
        Self {
            features: DEFAULT_DRIFT_FEATURES.iter().map(ToString::to_string).collect(),
            window_size: DEFAULT_DATA_WINDOW_SIZE,
            drift_threshold: DEFAULT_DATA_DRIFT_THRESHOLD,
        }
    }
}

impl DataDriftMonitorConfig {
    /// Reject a zero window or a negative or non-finite threshold
    pub fn validate(&self) -> Result<()> {
        validate_window("monitoring.data_drift.window_size", self.window_size)?;
        validate_threshold("monitoring.data_drift.drift_threshold", self.drift_threshold)
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(TextOpsError::config("logging.level must not be empty"));
        }
        Ok(())
    }
}

fn validate_window(field: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(TextOpsError::config(format!("{field} must be at least 1")));
    }
    Ok(())
}

fn validate_threshold(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TextOpsError::config(format!(
            "{field} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}
