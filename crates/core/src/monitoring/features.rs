//! Text statistics fed to the data drift monitor

use std::collections::BTreeMap;

use textops_domain::constants::{FEATURE_TEXT_LENGTH, FEATURE_WORD_COUNT};
use textops_domain::Observation;

use super::stats;

/// `(text_length, word_count)` for one text: characters and
/// whitespace-separated tokens.
pub fn text_features(text: &str) -> (f64, f64) {
    (text.chars().count() as f64, text.split_whitespace().count() as f64)
}

/// Batch means of `text_length` and `word_count`.
///
/// Returns an empty observation for an empty batch.
pub fn text_statistics(texts: &[String]) -> Observation {
    let samples = text_feature_samples(texts);
    samples
        .iter()
        .filter_map(|(feature, values)| stats::mean(values).map(|mean| (feature.clone(), mean)))
        .collect()
}

/// Per-text feature values, suitable for
/// [`DataDriftMonitor::set_reference`](super::data_drift::DataDriftMonitor::set_reference).
pub fn text_feature_samples(texts: &[String]) -> BTreeMap<String, Vec<f64>> {
    let (lengths, words): (Vec<f64>, Vec<f64>) = texts.iter().map(|t| text_features(t)).unzip();
    BTreeMap::from([
        (FEATURE_TEXT_LENGTH.to_string(), lengths),
        (FEATURE_WORD_COUNT.to_string(), words),
    ])
}
