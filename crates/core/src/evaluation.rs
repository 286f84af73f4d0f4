//! Binary classification metrics

use serde::Serialize;
use textops_domain::constants::{LOG_LOSS_EPSILON, METRIC_ACCURACY};
use textops_domain::{ClassProbabilities, Label, Observation, Result, TextOpsError};

/// Metrics for the positive class (`Label::Positive`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Fraction of correct predictions
    pub accuracy: f64,
    /// `tp / (tp + fp)`, `0.0` when nothing was predicted positive
    pub precision: f64,
    /// `tp / (tp + fn)`, `0.0` when there are no positives
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1_score: f64,
    /// `[[tn, fp], [fn, tp]]`, rows are true labels
    pub confusion_matrix: [[usize; 2]; 2],
    /// Present when probabilities were supplied
    pub log_loss: Option<f64>,
    /// Number of samples scored
    pub support: usize,
}

impl EvaluationReport {
    /// Scalar metrics as an observation for the performance monitor.
    pub fn to_observation(&self) -> Observation {
        let mut observation = Observation::new()
            .with(METRIC_ACCURACY, self.accuracy)
            .with("precision", self.precision)
            .with("recall", self.recall)
            .with("f1_score", self.f1_score);
        if let Some(log_loss) = self.log_loss {
            observation.insert("log_loss", log_loss);
        }
        observation
    }
}

/// Score `predictions` (and optionally `probabilities`) against `labels`.
///
/// Ratios with a zero denominator are reported as `0.0`. Log loss clips
/// probabilities to `[1e-15, 1 - 1e-15]`.
pub fn evaluate(
    labels: &[Label],
    predictions: &[Label],
    probabilities: Option<&[ClassProbabilities]>,
) -> Result<EvaluationReport> {
    if labels.len() != predictions.len() {
        return Err(TextOpsError::LengthMismatch { texts: predictions.len(), labels: labels.len() });
    }
    if labels.is_empty() {
        return Err(TextOpsError::invalid_input("cannot evaluate an empty set"));
    }

    let mut matrix = [[0usize; 2]; 2];
    for (truth, predicted) in labels.iter().zip(predictions) {
        matrix[truth.index()][predicted.index()] += 1;
    }
    let [[tn, fp], [fn_, tp]] = matrix;

    let n = labels.len();
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    let log_loss = probabilities.map(|probs| binary_log_loss(labels, probs)).transpose()?;

    Ok(EvaluationReport {
        accuracy: ratio(tp + tn, n),
        precision,
        recall,
        f1_score,
        confusion_matrix: matrix,
        log_loss,
        support: n,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn binary_log_loss(labels: &[Label], probabilities: &[ClassProbabilities]) -> Result<f64> {
    if labels.len() != probabilities.len() {
        return Err(TextOpsError::LengthMismatch {
            texts: probabilities.len(),
            labels: labels.len(),
        });
    }
    let total: f64 = labels
        .iter()
        .zip(probabilities)
        .map(|(label, p)| {
            let p = p.get(*label).clamp(LOG_LOSS_EPSILON, 1.0 - LOG_LOSS_EPSILON);
            -p.ln()
        })
        .sum();
    Ok(total / labels.len() as f64)
}
