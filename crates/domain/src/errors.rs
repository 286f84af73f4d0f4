//! Error types used throughout TextOps

use std::path::PathBuf;

use textops_common::error::{CommonError, ErrorSeverity};
use textops_common::{impl_error_classification, impl_error_conversion};
use thiserror::Error;

/// Main error type for TextOps
#[derive(Error, Debug)]
pub enum TextOpsError {
    /// No constructor registered under this name
    #[error("Unknown model type: '{0}'")]
    UnknownModelType(String),

    /// The model service slot is empty
    #[error("Model service not initialized: call initialize() first")]
    ServiceNotInitialized,

    /// Predict or save before train or load
    #[error("Model has not been trained")]
    ModelNotTrained,

    /// Artifact path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Texts and labels differ in length
    #[error("Length mismatch: {texts} texts but {labels} labels")]
    LengthMismatch {
        /// Number of texts supplied
        texts: usize,
        /// Number of labels supplied
        labels: usize,
    },

    /// Rejected argument or artifact content
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or filesystem failure
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl TextOpsError {
    /// Shorthand for [`TextOpsError::InvalidInput`]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Shorthand for [`TextOpsError::Config`]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl_error_conversion!(TextOpsError, Common);

impl_error_classification!(TextOpsError, Common,
    Self::FileNotFound(_) => {
        retryable: false,
        severity: ErrorSeverity::Info,
        critical: false,
    },
    Self::UnknownModelType(_)
    | Self::ServiceNotInitialized
    | Self::ModelNotTrained
    | Self::LengthMismatch { .. }
    | Self::InvalidInput(_)
    | Self::Config(_) => {
        retryable: false,
        severity: ErrorSeverity::Error,
        critical: false,
    },
);

/// Result type alias for TextOps operations
pub type Result<T> = std::result::Result<T, TextOpsError>;
