//! Classifier port, registry and the active model slot

pub mod ports;
pub mod registry;
pub mod service;

pub use ports::TextClassifier;
pub use registry::{ClassifierConstructor, ModelRegistry};
pub use service::{ModelService, SharedClassifier};

#[cfg(test)]
pub(crate) mod stub;
