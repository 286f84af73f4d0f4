//! Linear SVM text classifier (`"svm"`)
//!
//! TF-IDF features, a linear SVM trained with the Pegasos sub-gradient
//! solver, and Platt-scaled probabilities. The whole fitted state persists as
//! one JSON artifact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use textops_common::impl_str_conversions;
use textops_core::classifier::ports::{ensure_artifact_exists, ensure_same_length};
use textops_core::TextClassifier;
use textops_domain::{ClassProbabilities, Label, ModelParams, Result, TextOpsError};
use tracing::{debug, info};

use super::platt::PlattScaler;
use super::tfidf::{SparseRow, TfidfVectorizer};

/// Registry name
pub const MODEL_TYPE: &str = "svm";

/// Bumped whenever the artifact layout changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

const PARAM_KEYS: [&str; 6] =
    ["C", "kernel", "max_features", "ngram_range", "max_epochs", "random_state"];

/// Weights are folded back into the scale factor below this value
const RESCALE_THRESHOLD: f64 = 1e-9;

/// Supported SVM kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    /// `k(x, y) = x·y`
    Linear,
}

impl_str_conversions!(Kernel {
    Linear => "linear",
});

/// Hyper-parameters accepted by [`SvmTextClassifier`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvmParams {
    /// Inverse regularization strength
    #[serde(rename = "C")]
    pub c: f64,
    /// Kernel; only `linear` is implemented
    pub kernel: Kernel,
    /// Vocabulary size cap
    pub max_features: usize,
    /// Inclusive n-gram lengths
    pub ngram_range: (usize, usize),
    /// Passes over the training set
    pub max_epochs: usize,
    /// Seed for the per-epoch shuffle
    pub random_state: u64,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            kernel: Kernel::Linear,
            max_features: 10_000,
            ngram_range: (1, 1),
            max_epochs: 50,
            random_state: 0,
        }
    }
}

impl SvmParams {
    /// Resolve keyword parameters over the defaults.
    pub fn from_params(params: &ModelParams) -> Result<Self> {
        params.ensure_only(MODEL_TYPE, &PARAM_KEYS)?;
        let defaults = Self::default();

        let kernel = match params.get_str("kernel")? {
            Some(name) => name.parse::<Kernel>().map_err(|_| {
                TextOpsError::invalid_input(format!(
                    "unsupported kernel '{name}': only 'linear' is implemented"
                ))
            })?,
            None => defaults.kernel,
        };

        let resolved = Self {
            c: params.get_f64("C")?.unwrap_or(defaults.c),
            kernel,
            max_features: params.get_usize("max_features")?.unwrap_or(defaults.max_features),
            ngram_range: params.get_usize_pair("ngram_range")?.unwrap_or(defaults.ngram_range),
            max_epochs: params.get_usize("max_epochs")?.unwrap_or(defaults.max_epochs),
            random_state: params.get_u64("random_state")?.unwrap_or(defaults.random_state),
        };
        resolved.validate()?;
        Ok(resolved)
    }

    /// Range-check every field
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(TextOpsError::invalid_input(format!("C must be positive, got {}", self.c)));
        }
        if self.max_features == 0 {
            return Err(TextOpsError::invalid_input("max_features must be at least 1"));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(TextOpsError::invalid_input(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({min_n}, {max_n})"
            )));
        }
        if self.max_epochs == 0 {
            return Err(TextOpsError::invalid_input("max_epochs must be at least 1"));
        }
        Ok(())
    }
}

/// Primal linear SVM `f(x) = w·x + b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSvm {
    /// One weight per TF-IDF feature
    pub weights: Vec<f64>,
    /// Intercept
    pub bias: f64,
}

impl LinearSvm {
    /// Pegasos with `lambda = 1 / (C * n)` and the bias as an extra constant
    /// feature. The weight vector is stored as `scale * v` so the per-step
    /// shrink is O(1).
    pub fn fit(rows: &[SparseRow], labels: &[Label], n_features: usize, params: &SvmParams) -> Self {
        let n = rows.len();
        let lambda = 1.0 / (params.c * n as f64);
        let bias_idx = n_features;

        let mut v = vec![0.0_f64; n_features + 1];
        let mut scale = 1.0_f64;
        let mut t = 0_u64;
        let mut order: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(params.random_state);

        for _ in 0..params.max_epochs {
            order.shuffle(&mut rng);
            for &i in &order {
                t += 1;
                let y = labels[i].sign();
                let eta = 1.0 / (lambda * t as f64);
                let raw: f64 = rows[i].iter().map(|(j, x)| v[*j] * x).sum::<f64>() + v[bias_idx];
                let margin = y * scale * raw;

                scale *= 1.0 - eta * lambda;
                if scale <= 0.0 {
                    v.iter_mut().for_each(|w| *w = 0.0);
                    scale = 1.0;
                } else if scale < RESCALE_THRESHOLD {
                    v.iter_mut().for_each(|w| *w *= scale);
                    scale = 1.0;
                }

                if margin < 1.0 {
                    let step = eta * y / scale;
                    for (j, x) in &rows[i] {
                        v[*j] += step * x;
                    }
                    v[bias_idx] += step;
                }
            }
        }

        let weights = v[..n_features].iter().map(|w| w * scale).collect();
        Self { weights, bias: v[bias_idx] * scale }
    }

    /// Signed margin of `row`; indices past the weights count as zero
    pub fn decision(&self, row: &SparseRow) -> f64 {
        row.iter().map(|(j, x)| self.weights.get(*j).map_or(0.0, |w| w * x)).sum::<f64>()
            + self.bias
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedSvm {
    vectorizer: TfidfVectorizer,
    svm: LinearSvm,
    platt: PlattScaler,
}

impl FittedSvm {
    fn decision(&self, text: &str) -> f64 {
        self.svm.decision(&self.vectorizer.transform(text))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SvmArtifact {
    format_version: u32,
    model_type: String,
    saved_at: DateTime<Utc>,
    params: SvmParams,
    model: FittedSvm,
}

/// TF-IDF + linear SVM sentiment classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SvmTextClassifier {
    params: SvmParams,
    fitted: Option<FittedSvm>,
}

impl SvmTextClassifier {
    /// Untrained classifier with `params`
    pub fn new(params: SvmParams) -> Self {
        Self { params, fitted: None }
    }

    pub fn from_params(params: &ModelParams) -> Result<Self> {
        Ok(Self::new(SvmParams::from_params(params)?))
    }

    /// Hyper-parameters in use
    pub fn params(&self) -> &SvmParams {
        &self.params
    }

    /// Signed distance to the separating hyperplane per text
    pub fn decision_function(&self, texts: &[String]) -> Result<Vec<f64>> {
        let fitted = self.fitted()?;
        Ok(texts.iter().map(|text| fitted.decision(text)).collect())
    }

    fn fitted(&self) -> Result<&FittedSvm> {
        self.fitted.as_ref().ok_or(TextOpsError::ModelNotTrained)
    }
}

impl Default for SvmTextClassifier {
    fn default() -> Self {
        Self::new(SvmParams::default())
    }
}

impl TextClassifier for SvmTextClassifier {
    fn model_type(&self) -> &str {
        MODEL_TYPE
    }

    fn is_trained(&self) -> bool {
        self.fitted.is_some()
    }

    fn train(&mut self, texts: &[String], labels: &[Label]) -> Result<()> {
        ensure_same_length(texts, labels)?;
        if texts.is_empty() {
            return Err(TextOpsError::invalid_input("cannot train on an empty dataset"));
        }
        let positives = labels.iter().filter(|l| **l == Label::Positive).count();
        if positives == 0 || positives == labels.len() {
            return Err(TextOpsError::invalid_input("training data must contain both classes"));
        }

        let started = Instant::now();
        let mut vectorizer = TfidfVectorizer::new(self.params.max_features, self.params.ngram_range);
        vectorizer.fit(texts)?;
        let rows = vectorizer.transform_batch(texts);

        let svm = LinearSvm::fit(&rows, labels, vectorizer.n_features(), &self.params);
        let decisions: Vec<f64> = rows.iter().map(|row| svm.decision(row)).collect();
        let platt = PlattScaler::fit(&decisions, labels);

        info!(
            samples = texts.len(),
            positives,
            vocabulary = vectorizer.n_features(),
            platt_a = platt.a,
            platt_b = platt.b,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "SVM classifier trained"
        );
        self.fitted = Some(FittedSvm { vectorizer, svm, platt });
        Ok(())
    }

    fn predict(&self, texts: &[String]) -> Result<Vec<Label>> {
        let fitted = self.fitted()?;
        Ok(texts.iter().map(|text| Label::from_positive(fitted.decision(text) > 0.0)).collect())
    }

    fn predict_proba(&self, texts: &[String]) -> Result<Vec<ClassProbabilities>> {
        let fitted = self.fitted()?;
        Ok(texts
            .iter()
            .map(|text| {
                ClassProbabilities::from_positive(
                    fitted.platt.positive_probability(fitted.decision(text)),
                )
            })
            .collect())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let fitted = self.fitted()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let artifact = SvmArtifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            model_type: MODEL_TYPE.to_string(),
            saved_at: Utc::now(),
            params: self.params.clone(),
            model: fitted.clone(),
        };

        // Write next to the target and rename so readers never see a partial file.
        let mut staged = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            serde_json::to_writer(&mut writer, &artifact)?;
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| e.error)?;

        info!(path = %path.display(), vocabulary = fitted.vectorizer.n_features(), "SVM artifact saved");
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        ensure_artifact_exists(path)?;
        let artifact: SvmArtifact = serde_json::from_reader(BufReader::new(File::open(path)?))?;

        if artifact.model_type != MODEL_TYPE {
            return Err(TextOpsError::invalid_input(format!(
                "artifact at {} holds model type '{}', expected '{MODEL_TYPE}'",
                path.display(),
                artifact.model_type
            )));
        }
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(TextOpsError::invalid_input(format!(
                "unsupported artifact version {} (expected {ARTIFACT_FORMAT_VERSION})",
                artifact.format_version
            )));
        }
        if artifact.model.svm.weights.len() != artifact.model.vectorizer.n_features() {
            return Err(TextOpsError::invalid_input(format!(
                "corrupt artifact: {} weights for {} features",
                artifact.model.svm.weights.len(),
                artifact.model.vectorizer.n_features()
            )));
        }
        artifact.model.vectorizer.validate()?;
        artifact.params.validate()?;

        debug!(saved_at = %artifact.saved_at, "Read SVM artifact");
        self.params = artifact.params;
        self.fitted = Some(artifact.model);
        info!(path = %path.display(), "SVM artifact loaded");
        Ok(())
    }
}
