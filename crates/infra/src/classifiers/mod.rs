//! Built-in classifier implementations

pub mod platt;
pub mod svm;
pub mod tfidf;

use std::sync::Arc;

use textops_core::{ModelRegistry, TextClassifier};

pub use platt::PlattScaler;
pub use svm::{Kernel, LinearSvm, SvmParams, SvmTextClassifier};
pub use tfidf::TfidfVectorizer;

/// Register every built-in model type on `registry`.
pub fn register_builtin(registry: &ModelRegistry) {
    registry.register(svm::MODEL_TYPE, |params| {
        Ok(Box::new(SvmTextClassifier::from_params(params)?) as Box<dyn TextClassifier>)
    });
}

/// Fresh registry with the built-in model types
pub fn default_registry() -> Arc<ModelRegistry> {
    let registry = ModelRegistry::new();
    register_builtin(&registry);
    Arc::new(registry)
}
