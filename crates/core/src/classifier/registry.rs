//! Name-keyed classifier constructors

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use textops_domain::{ModelParams, Result, TextOpsError};
use tracing::{debug, info};

use super::ports::TextClassifier;

/// Builds a fresh, untrained classifier from keyword parameters.
pub type ClassifierConstructor =
    Arc<dyn Fn(&ModelParams) -> Result<Box<dyn TextClassifier>> + Send + Sync>;

/// Maps a model-type name to its constructor.
///
/// Registration may happen at any time; the last registration for a name
/// wins.
#[derive(Default)]
pub struct ModelRegistry {
    constructors: RwLock<HashMap<String, ClassifierConstructor>>,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `name` with `constructor`, replacing any previous entry.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&ModelParams) -> Result<Box<dyn TextClassifier>> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced =
            self.constructors.write().insert(name.clone(), Arc::new(constructor)).is_some();
        info!(model_type = %name, replaced, "Registered model type");
    }

    /// Construct a new untrained instance of `name`.
    pub fn create(&self, name: &str, params: &ModelParams) -> Result<Box<dyn TextClassifier>> {
        // Constructor runs outside the lock so it may consult the registry.
        let constructor = self
            .constructors
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| TextOpsError::UnknownModelType(name.to_string()))?;

        let classifier = constructor(params)?;
        debug!(model_type = %name, params = params.len(), "Created classifier instance");
        Ok(classifier)
    }

    /// Whether a constructor is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.read().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry").field("model_types", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::stub::MajorityClassifier;

    fn stub_registry() -> ModelRegistry {
        let registry = ModelRegistry::new();
        registry.register("majority", |_: &ModelParams| {
            Ok(Box::new(MajorityClassifier::new("majority")) as Box<dyn TextClassifier>)
        });
        registry
    }

    #[test]
    fn unknown_name_fails() {
        let registry = stub_registry();
        let err = registry.create("unknown", &ModelParams::new()).unwrap_err();
        assert!(matches!(err, TextOpsError::UnknownModelType(name) if name == "unknown"));
    }

    #[test]
    fn create_returns_untrained_instance() {
        let registry = stub_registry();
        let classifier = registry.create("majority", &ModelParams::new()).unwrap();
        assert_eq!(classifier.model_type(), "majority");
        assert!(!classifier.is_trained());
    }

    #[test]
    fn last_registration_wins() {
        let registry = stub_registry();
        registry.register("majority", |_: &ModelParams| {
            Ok(Box::new(MajorityClassifier::new("replacement")) as Box<dyn TextClassifier>)
        });

        let classifier = registry.create("majority", &ModelParams::new()).unwrap();
        assert_eq!(classifier.model_type(), "replacement");
        assert_eq!(registry.names(), vec!["majority".to_string()]);
    }

    #[test]
    fn constructor_errors_propagate() {
        let registry = ModelRegistry::new();
        registry.register("strict", |params: &ModelParams| {
            params.ensure_only("strict", &[])?;
            Ok(Box::new(MajorityClassifier::new("strict")) as Box<dyn TextClassifier>)
        });

        let params = ModelParams::new().with("C", 1.0);
        assert!(matches!(registry.create("strict", &params), Err(TextOpsError::InvalidInput(_))));
        assert!(registry.contains("strict"));
        assert!(!registry.contains("svm"));
    }
}
