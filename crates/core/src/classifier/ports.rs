//! Port interface for trainable text classifiers

use std::fmt::Debug;
use std::path::Path;

use textops_domain::{ClassProbabilities, Label, Result, TextOpsError};

/// Capability set every servable model implements.
///
/// Instances start untrained. `predict`, `predict_proba` and `save` fail with
/// [`TextOpsError::ModelNotTrained`] until `train` or `load` succeeds.
pub trait TextClassifier: Send + Sync + Debug {
    /// Registry name of this implementation
    fn model_type(&self) -> &str;

    /// Whether `train` or `load` has succeeded
    fn is_trained(&self) -> bool;

    /// Fit from paired samples, replacing any previous fit.
    ///
    /// Fails with [`TextOpsError::LengthMismatch`] when the slices differ in
    /// length.
    fn train(&mut self, texts: &[String], labels: &[Label]) -> Result<()>;

    /// Predicted class per text
    fn predict(&self, texts: &[String]) -> Result<Vec<Label>> {
        Ok(self.predict_proba(texts)?.iter().map(ClassProbabilities::most_likely).collect())
    }

    /// `[p0, p1]` per text
    fn predict_proba(&self, texts: &[String]) -> Result<Vec<ClassProbabilities>>;

    /// Write the full model state to `path`, creating parent directories.
    fn save(&self, path: &Path) -> Result<()>;

    /// Replace the model state with an artifact written by `save`.
    ///
    /// Fails with [`TextOpsError::FileNotFound`] when `path` does not exist.
    fn load(&mut self, path: &Path) -> Result<()>;
}

/// Training precondition shared by implementations.
pub fn ensure_same_length(texts: &[String], labels: &[Label]) -> Result<()> {
    if texts.len() != labels.len() {
        return Err(TextOpsError::LengthMismatch { texts: texts.len(), labels: labels.len() });
    }
    Ok(())
}

/// Fail with [`TextOpsError::FileNotFound`] unless `path` exists.
pub fn ensure_artifact_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(TextOpsError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}
