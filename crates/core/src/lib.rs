//! # TextOps Core
//!
//! Pure model-lifecycle and monitoring logic - no file formats, no
//! subscriber set-up.
//!
//! This crate contains:
//! - The classifier port (`TextClassifier`) and the name-keyed `ModelRegistry`
//! - `ModelService`, the single active model slot
//! - Rolling windows, the performance and data drift monitors, strategies
//!   and the alerting `MonitoringContext`
//! - Evaluation metrics, text preprocessing and the instrumentation boundary
//!
//! ## Architecture Principles
//! - Only depends on `textops-common` and `textops-domain`
//! - Concrete classifiers live in `textops-infra` behind the port
//! - Every shared structure is guarded by its own `parking_lot` lock

#![warn(missing_docs)]

pub mod classifier;
pub mod evaluation;
pub mod instrumentation;
pub mod monitoring;
pub mod preprocessing;

// Re-export specific items to avoid ambiguity
pub use classifier::ports::TextClassifier;
pub use classifier::registry::{ClassifierConstructor, ModelRegistry};
pub use classifier::service::{ModelService, SharedClassifier};
pub use evaluation::{evaluate, EvaluationReport};
pub use instrumentation::Instrumentation;
pub use monitoring::context::{AlertCallback, AlertOutcome, MonitoringContext};
pub use monitoring::data_drift::DataDriftMonitor;
pub use monitoring::performance::PerformanceMonitor;
pub use monitoring::report::{DriftFinding, DriftReport, SkipReason, SkippedKey};
pub use monitoring::strategy::{
    DataDriftStrategy, MonitorStrategy, MonitoringStrategy, PerformanceStrategy,
};
pub use monitoring::window::RollingWindowStore;
pub use monitoring::{Monitor, MonitorKind};
pub use preprocessing::{BatchTextProcessor, StandardTextProcessor, TextProcessor};
