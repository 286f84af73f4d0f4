//! # TextOps Infrastructure
//!
//! Adapters around `textops-core`:
//! - The built-in `"svm"` classifier (TF-IDF, linear SVM, Platt scaling)
//! - Configuration loading from files and `TEXTOPS_*` environment variables
//! - Tracing subscriber set-up and drift alert sinks
//! - [`ServingRuntime`], which wires the model service to both monitors

#![warn(missing_docs)]

pub mod classifiers;
pub mod config;
pub mod observability;
pub mod runtime;

pub use classifiers::{default_registry, register_builtin, SvmTextClassifier};
pub use runtime::{Evaluation, Prediction, ServingRuntime};
