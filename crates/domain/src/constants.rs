//! Domain constants
//!
//! Metric and feature names used as observation keys, plus the defaults
//! behind [`crate::config::Config`].

// Model defaults
/// Registry name of the shipped classifier
pub const DEFAULT_MODEL_TYPE: &str = "svm";

// Observation keys
/// Evaluation accuracy metric
pub const METRIC_ACCURACY: &str = "accuracy";
/// Serving latency in milliseconds
pub const METRIC_LATENCY: &str = "latency";
/// Mean characters per text
pub const FEATURE_TEXT_LENGTH: &str = "text_length";
/// Mean whitespace tokens per text
pub const FEATURE_WORD_COUNT: &str = "word_count";

// Performance monitor
/// Metrics tracked by default
pub const DEFAULT_PERFORMANCE_METRICS: [&str; 2] = [METRIC_ACCURACY, METRIC_LATENCY];
/// Samples kept per metric
pub const DEFAULT_PERFORMANCE_WINDOW_SIZE: usize = 100;
/// Relative change that counts as drift
pub const DEFAULT_PERFORMANCE_DRIFT_THRESHOLD: f64 = 0.1;
/// Most recent samples averaged against the baseline
pub const DEFAULT_RECENT_WINDOW: usize = 10;

// Data drift monitor
/// Features tracked by default
pub const DEFAULT_DRIFT_FEATURES: [&str; 2] = [FEATURE_TEXT_LENGTH, FEATURE_WORD_COUNT];
/// Samples kept per feature, current and reference alike
pub const DEFAULT_DATA_WINDOW_SIZE: usize = 1000;
/// Normalized mean shift that counts as drift
pub const DEFAULT_DATA_DRIFT_THRESHOLD: f64 = 0.2;

// Logging
/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Evaluation
/// Probability clip for log-loss
pub const LOG_LOSS_EPSILON: f64 = 1e-15;
