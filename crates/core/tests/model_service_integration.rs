//! Integration tests for the model lifecycle
//!
//! Covers registry construction, the single active slot and artifact
//! round-trips through the service using a real file on disk.

mod support;

use std::sync::Arc;
use std::thread;

use support::{keyword_registry, sentiment_corpus, strings, KeywordClassifier};
use textops_core::{ModelService, TextClassifier};
use textops_domain::{Label, ModelParams, TextOpsError};

// ============================================================================
// Registry
// ============================================================================

/// Validates that a registered constructor receives the caller's params.
#[test]
fn test_registry_forwards_params() {
    let registry = keyword_registry();
    let params = ModelParams::new().with("sharpness", 9.0);
    let classifier = registry.create("keyword", &params).unwrap();

    assert_eq!(classifier.model_type(), "keyword");
    assert!(!classifier.is_trained());
    assert!(matches!(
        registry.create("keyword", &ModelParams::new().with("depth", 3)),
        Err(TextOpsError::InvalidInput(_))
    ));
}

/// Validates that re-registering a name changes what `create` builds.
#[test]
fn test_registry_overwrite_uses_latest_constructor() {
    let registry = keyword_registry();
    registry.register("keyword", |_: &ModelParams| {
        let mut classifier = KeywordClassifier::new(1.0);
        classifier.train(&strings(&["fine"]), &[Label::Positive])?;
        Ok(Box::new(classifier) as Box<dyn TextClassifier>)
    });

    let classifier = registry.create("keyword", &ModelParams::new()).unwrap();
    assert!(classifier.is_trained());
}

// ============================================================================
// Model service
// ============================================================================

/// Validates the full train → save → load cycle through the service.
///
/// Assertions:
/// - The artifact lands in a directory that did not exist.
/// - A freshly initialized slot predicts identically after loading it.
#[test]
fn test_service_roundtrip_matches_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("models").join("keyword.json");
    let (texts, labels) = sentiment_corpus();
    let held_out = strings(&["great soundtrack", "boring acting", "unknown words only"]);

    let service = ModelService::new(keyword_registry());
    let trained = service.initialize("keyword", &ModelParams::new()).unwrap();
    trained.write().train(&texts, &labels).unwrap();
    let expected_labels = trained.read().predict(&held_out).unwrap();
    let expected_probs = trained.read().predict_proba(&held_out).unwrap();
    service.save_active(&path).unwrap();
    assert!(path.exists());

    service.initialize("keyword", &ModelParams::new()).unwrap();
    assert!(matches!(
        service.get_active().unwrap().read().predict(&held_out),
        Err(TextOpsError::ModelNotTrained)
    ));

    service.load_into_active(&path).unwrap();
    let active = service.get_active().unwrap();
    assert!(active.read().is_trained());
    assert_eq!(active.read().predict(&held_out).unwrap(), expected_labels);
    assert_eq!(active.read().predict_proba(&held_out).unwrap(), expected_probs);
    assert_eq!(expected_labels[0], Label::Positive);
    assert_eq!(expected_labels[1], Label::Negative);
}

/// Validates loading a missing artifact reports the path.
#[test]
fn test_service_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let service = ModelService::new(keyword_registry());
    service.initialize("keyword", &ModelParams::new()).unwrap();

    match service.load_into_active(&path) {
        Err(TextOpsError::FileNotFound(reported)) => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

/// Validates mismatched training input is rejected before fitting.
#[test]
fn test_train_length_mismatch() {
    let service = ModelService::new(keyword_registry());
    let active = service.initialize("keyword", &ModelParams::new()).unwrap();

    let err = active.write().train(&strings(&["a", "b"]), &[Label::Positive]).unwrap_err();
    assert!(matches!(err, TextOpsError::LengthMismatch { texts: 2, labels: 1 }));
    assert!(!active.read().is_trained());
}

/// Validates concurrent readers and re-initialization never observe an
/// empty slot once it has been filled.
#[test]
fn test_concurrent_get_active_and_initialize() {
    let service = Arc::new(ModelService::new(keyword_registry()));
    service.initialize("keyword", &ModelParams::new()).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..50 {
                    if i % 2 == 0 {
                        service.initialize("keyword", &ModelParams::new()).unwrap();
                    } else {
                        let active = service.get_active().unwrap();
                        assert_eq!(active.read().model_type(), "keyword");
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.active_model_type().as_deref(), Some("keyword"));
}
