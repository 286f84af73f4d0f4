//! Model service - owns the single active classifier

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use textops_domain::{ModelParams, Result, TextOpsError};
use tracing::{info, warn};

use super::ports::TextClassifier;
use super::registry::ModelRegistry;

/// Handle to the active classifier.
///
/// Clones share one instance: a `train` through one handle is visible
/// through every other.
pub type SharedClassifier = Arc<RwLock<Box<dyn TextClassifier>>>;

struct ActiveModel {
    model_type: String,
    classifier: SharedClassifier,
}

/// Holder of the one active model instance.
///
/// Constructed explicitly and shared by reference rather than reached through
/// a global, so each test or runtime gets its own slot. Slot mutations
/// (`initialize`, `load_into_active`, `save_active`) are serialized by one
/// lock; `get_active` only holds it long enough to clone the handle.
pub struct ModelService {
    registry: Arc<ModelRegistry>,
    slot: Mutex<Option<ActiveModel>>,
}

impl ModelService {
    /// Create an empty service backed by `registry`
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry, slot: Mutex::new(None) }
    }

    /// Registry used by [`initialize`](Self::initialize)
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Build a `model_type` instance and install it as the active model.
    ///
    /// A previously active instance is dropped from the slot (logged at
    /// `warn`). If construction fails the slot is left untouched.
    pub fn initialize(&self, model_type: &str, params: &ModelParams) -> Result<SharedClassifier> {
        let instance = self.registry.create(model_type, params)?;
        let classifier: SharedClassifier = Arc::new(RwLock::new(instance));

        let mut slot = self.slot.lock();
        let previous = slot.replace(ActiveModel {
            model_type: model_type.to_string(),
            classifier: Arc::clone(&classifier),
        });
        if let Some(previous) = previous {
            warn!(
                previous = %previous.model_type,
                model_type = %model_type,
                "Active model already initialized; replacing it"
            );
        }
        info!(model_type = %model_type, "Model initialized");

        Ok(classifier)
    }

    /// Handle to the active classifier
    pub fn get_active(&self) -> Result<SharedClassifier> {
        self.slot
            .lock()
            .as_ref()
            .map(|active| Arc::clone(&active.classifier))
            .ok_or(TextOpsError::ServiceNotInitialized)
    }

    /// Registry name of the active model, if any
    pub fn active_model_type(&self) -> Option<String> {
        self.slot.lock().as_ref().map(|active| active.model_type.clone())
    }

    /// `true` once `initialize` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Replace the active model's state with the artifact at `path`.
    pub fn load_into_active(&self, path: &Path) -> Result<()> {
        let slot = self.slot.lock();
        let active = slot.as_ref().ok_or(TextOpsError::ServiceNotInitialized)?;
        active.classifier.write().load(path)?;
        info!(model_type = %active.model_type, path = %path.display(), "Model loaded");
        Ok(())
    }

    /// Persist the active model to `path`.
    pub fn save_active(&self, path: &Path) -> Result<()> {
        let slot = self.slot.lock();
        let active = slot.as_ref().ok_or(TextOpsError::ServiceNotInitialized)?;
        active.classifier.read().save(path)?;
        info!(model_type = %active.model_type, path = %path.display(), "Model saved");
        Ok(())
    }
}

impl fmt::Debug for ModelService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelService")
            .field("registry", &self.registry)
            .field("active_model_type", &self.active_model_type())
            .finish()
    }
}
