//! Integration tests for `textops_common::error`.
//!
//! Verifies that module errors composed with `CommonError` through the
//! exported macros classify and convert the same way the domain error does.

use textops_common::error::{CommonError, ErrorClassification, ErrorSeverity};
use textops_common::{impl_error_classification, impl_error_conversion};
use thiserror::Error;

#[derive(Debug, Error)]
enum ArtifactError {
    #[error("Artifact is corrupt: {0}")]
    Corrupt(String),

    #[error("Artifact missing: {0}")]
    Missing(String),

    #[error(transparent)]
    Common(#[from] CommonError),
}

impl_error_conversion!(ArtifactError, Common);
impl_error_classification!(ArtifactError, Common,
    Self::Corrupt(_) => {
        retryable: false,
        severity: ErrorSeverity::Critical,
        critical: true,
    },
    Self::Missing(_) => {
        retryable: false,
        severity: ErrorSeverity::Info,
        critical: false,
    }
);

fn read_artifact(path: &std::path::Path) -> Result<String, ArtifactError> {
    Ok(std::fs::read_to_string(path)?)
}

#[test]
fn io_errors_route_through_common() {
    let err = read_artifact(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(
        err,
        ArtifactError::Common(CommonError::Persistence { kind: std::io::ErrorKind::NotFound, .. })
    ));
    assert_eq!(err.severity(), ErrorSeverity::Error);
    assert!(!err.is_retryable());
}

#[test]
fn json_errors_route_through_common() {
    let parse: Result<serde_json::Value, ArtifactError> =
        serde_json::from_str("[1, 2").map_err(ArtifactError::from);
    let err = parse.unwrap_err();
    assert!(err.to_string().starts_with("Serialization error (JSON)"));
}

#[test]
fn module_variants_use_inline_classification() {
    let corrupt = ArtifactError::Corrupt("bad header".into());
    assert!(corrupt.is_critical());
    assert_eq!(corrupt.severity(), ErrorSeverity::Critical);

    let missing = ArtifactError::Missing("model.json".into());
    assert_eq!(missing.severity(), ErrorSeverity::Info);
    assert_eq!(missing.retry_after(), None);

    let interrupted = ArtifactError::from(std::io::Error::from(std::io::ErrorKind::Interrupted));
    assert!(interrupted.is_retryable());
    assert_eq!(interrupted.severity(), ErrorSeverity::Warning);
}
