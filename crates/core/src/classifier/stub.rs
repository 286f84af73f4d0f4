//! Minimal in-crate classifier used by unit tests.

use std::path::Path;

use textops_domain::{ClassProbabilities, Label, Result, TextOpsError};

use super::ports::{ensure_artifact_exists, ensure_same_length, TextClassifier};

/// Predicts the majority class seen during training.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MajorityClassifier {
    pub(crate) name: String,
    pub(crate) positive_rate: Option<f64>,
}

impl MajorityClassifier {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: name.to_string(), positive_rate: None }
    }
}

impl TextClassifier for MajorityClassifier {
    fn model_type(&self) -> &str {
        &self.name
    }

    fn is_trained(&self) -> bool {
        self.positive_rate.is_some()
    }

    fn train(&mut self, texts: &[String], labels: &[Label]) -> Result<()> {
        ensure_same_length(texts, labels)?;
        let positives = labels.iter().filter(|l| **l == Label::Positive).count();
        self.positive_rate = Some(positives as f64 / labels.len().max(1) as f64);
        Ok(())
    }

    fn predict_proba(&self, texts: &[String]) -> Result<Vec<ClassProbabilities>> {
        let rate = self.positive_rate.ok_or(TextOpsError::ModelNotTrained)?;
        Ok(texts.iter().map(|_| ClassProbabilities::from_positive(rate)).collect())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let rate = self.positive_rate.ok_or(TextOpsError::ModelNotTrained)?;
        std::fs::write(path, rate.to_string())?;
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        ensure_artifact_exists(path)?;
        let raw = std::fs::read_to_string(path)?;
        let rate = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| TextOpsError::invalid_input(format!("corrupt artifact: {e}")))?;
        self.positive_rate = Some(rate);
        Ok(())
    }
}
