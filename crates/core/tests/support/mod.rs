//! Shared test helpers for `textops-core` integration tests.
//!
//! Provides a deterministic keyword classifier that implements the full
//! `TextClassifier` contract, including a JSON artifact, so lifecycle tests
//! exercise real file round-trips without depending on `textops-infra`.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use textops_core::{ModelRegistry, TextClassifier};
use textops_domain::{ClassProbabilities, Label, ModelParams, Result, TextOpsError};

/// Scores a text by the average learned polarity of its words.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordClassifier {
    /// Logistic temperature applied to the average polarity
    pub sharpness: f64,
    weights: Option<BTreeMap<String, f64>>,
}

impl KeywordClassifier {
    pub fn new(sharpness: f64) -> Self {
        Self { sharpness, weights: None }
    }

    pub fn from_params(params: &ModelParams) -> Result<Self> {
        params.ensure_only("keyword", &["sharpness"])?;
        Ok(Self::new(params.get_f64("sharpness")?.unwrap_or(4.0)))
    }

    fn score(weights: &BTreeMap<String, f64>, text: &str) -> f64 {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return 0.0;
        }
        let total: f64 = words.iter().map(|w| weights.get(*w).copied().unwrap_or(0.0)).sum();
        total / words.len() as f64
    }
}

impl TextClassifier for KeywordClassifier {
    fn model_type(&self) -> &str {
        "keyword"
    }

    fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    fn train(&mut self, texts: &[String], labels: &[Label]) -> Result<()> {
        if texts.len() != labels.len() {
            return Err(TextOpsError::LengthMismatch { texts: texts.len(), labels: labels.len() });
        }
        let mut tally: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for (text, label) in texts.iter().zip(labels) {
            for word in text.split_whitespace() {
                let entry = tally.entry(word.to_string()).or_default();
                entry.0 += label.sign();
                entry.1 += 1.0;
            }
        }
        self.weights = Some(tally.into_iter().map(|(w, (sum, n))| (w, sum / n)).collect());
        Ok(())
    }

    fn predict_proba(&self, texts: &[String]) -> Result<Vec<ClassProbabilities>> {
        let weights = self.weights.as_ref().ok_or(TextOpsError::ModelNotTrained)?;
        Ok(texts
            .iter()
            .map(|text| {
                let z = self.sharpness * Self::score(weights, text);
                ClassProbabilities::from_positive(1.0 / (1.0 + (-z).exp()))
            })
            .collect())
    }

    fn save(&self, path: &Path) -> Result<()> {
        if !self.is_trained() {
            return Err(TextOpsError::ModelNotTrained);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec(self)?)?;
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(TextOpsError::FileNotFound(path.to_path_buf()));
        }
        *self = serde_json::from_slice(&std::fs::read(path)?)?;
        Ok(())
    }
}

/// Registry with `"keyword"` registered
pub fn keyword_registry() -> Arc<ModelRegistry> {
    let registry = ModelRegistry::new();
    registry.register("keyword", |params: &ModelParams| {
        Ok(Box::new(KeywordClassifier::from_params(params)?) as Box<dyn TextClassifier>)
    });
    Arc::new(registry)
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Small labelled corpus: texts plus labels
pub fn sentiment_corpus() -> (Vec<String>, Vec<Label>) {
    let texts = strings(&[
        "great movie loved it",
        "wonderful acting great story",
        "loved the soundtrack",
        "terrible plot boring",
        "awful acting hated it",
        "boring and terrible",
    ]);
    let labels = vec![
        Label::Positive,
        Label::Positive,
        Label::Positive,
        Label::Negative,
        Label::Negative,
        Label::Negative,
    ];
    (texts, labels)
}
