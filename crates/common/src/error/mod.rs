//! Common error types and utilities shared by every TextOps crate
//!
//! The error handling system is built on three pieces:
//!
//! 1. **`CommonError`**: the failures every layer can hit while moving
//!    artifacts and configuration between memory and disk (serialization
//!    and filesystem persistence).
//!
//! 2. **`ErrorClassification` trait**: a uniform way to ask an error whether
//!    it is retryable, how severe it is and whether it needs immediate
//!    attention.
//!
//! 3. **`ErrorSeverity` enum**: the severity scale used by logging and
//!    alerting.
//!
//! ## Composition
//!
//! Module-specific errors embed `CommonError` instead of duplicating its
//! variants:
//!
//! ```rust,ignore
//! #[derive(Debug, thiserror::Error)]
//! pub enum RegistryError {
//!     #[error("Unknown model type: {0}")]
//!     UnknownModelType(String),
//!
//!     #[error(transparent)]
//!     Common(#[from] CommonError),
//! }
//!
//! impl_error_conversion!(RegistryError, Common);
//! impl_error_classification!(RegistryError, Common,
//!     Self::UnknownModelType(_) => {
//!         retryable: false,
//!         severity: ErrorSeverity::Error,
//!         critical: false,
//!     }
//! );
//! ```
//!
//! ## Severity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Info** | Expected conditions | Missing artifact |
//! | **Warning** | Transient, worth retrying | Interrupted or timed-out I/O |
//! | **Error** | Caller or environment failure | Corrupt JSON, permission denied |
//! | **Critical** | Integrity at risk | Reserved for module errors |

use std::fmt;
use std::io;
use std::time::Duration;

/// Failures shared by every layer that reads or writes artifacts
#[derive(Debug, Clone, PartialEq)]
pub enum CommonError {
    /// Serialization or deserialization errors
    Serialization {
        /// Wire format, e.g. `"JSON"`
        format: &'static str,
        /// Parser or writer message
        message: String,
    },

    /// Filesystem errors, keeping the OS error kind for classification
    Persistence {
        /// Kind reported by the OS
        kind: io::ErrorKind,
        /// OS error message
        message: String,
    },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialization { format, message } => {
                write!(f, "Serialization error ({}): {}", format, message)
            }
            Self::Persistence { message, .. } => write!(f, "Persistence error: {}", message),
        }
    }
}

impl std::error::Error for CommonError {}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Persistence {
                kind: io::ErrorKind::Interrupted
                    | io::ErrorKind::WouldBlock
                    | io::ErrorKind::TimedOut,
                ..
            }
        )
    }

    fn severity(&self) -> ErrorSeverity {
        if self.is_retryable() {
            ErrorSeverity::Warning
        } else {
            ErrorSeverity::Error
        }
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl CommonError {
    /// Create a serialization error tagged with its wire format
    pub fn serialization<S: Into<String>>(format: &'static str, message: S) -> Self {
        Self::Serialization { format, message: message.into() }
    }
}

/// Error classification trait for consistent error handling across modules
///
/// Every error type in the workspace implements this so that call sites at
/// the serving boundary can decide on retries and log levels without
/// matching on concrete variants.
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Only transient I/O conditions qualify; the lifecycle and
    /// precondition errors of the core never do.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

// Standard conversions from common error types
impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err.to_string())
    }
}

impl From<io::Error> for CommonError {
    fn from(err: io::Error) -> Self {
        Self::Persistence { kind: err.kind(), message: err.to_string() }
    }
}

/// Utility macro for creating error conversions from std types
///
/// Generates `From<serde_json::Error>` and `From<std::io::Error>` for a
/// module error by routing them through its `CommonError` variant.
/// `From<CommonError>` itself is expected to come from `#[from]`.
///
/// ```rust,ignore
/// #[derive(Debug, thiserror::Error)]
/// pub enum MyError {
///     #[error(transparent)]
///     Common(#[from] CommonError),
/// }
///
/// impl_error_conversion!(MyError, Common);
/// ```
#[macro_export]
macro_rules! impl_error_conversion {
    ($error_type:ty, $variant:ident) => {
        impl From<serde_json::Error> for $error_type {
            fn from(err: serde_json::Error) -> Self {
                Self::$variant($crate::error::CommonError::from(err))
            }
        }

        impl From<std::io::Error> for $error_type {
            fn from(err: std::io::Error) -> Self {
                Self::$variant($crate::error::CommonError::from(err))
            }
        }
    };
}

/// Macro to implement ErrorClassification by delegating to CommonError
///
/// The embedded `CommonError` variant delegates; every other variant lists
/// its classification inline.
///
/// ```rust,ignore
/// impl_error_classification!(MyError, Common,
///     Self::Specific(_) => {
///         retryable: false,
///         severity: ErrorSeverity::Error,
///         critical: false,
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_error_classification {
    (
        $error_type:ty,
        $common_variant:ident
        $(,
            $variant:pat => {
                retryable: $retryable:expr,
                severity: $severity:expr,
                critical: $critical:expr
                $(,)?
            }
        )*
        $(,)?
    ) => {
        impl $crate::error::ErrorClassification for $error_type {
            fn is_retryable(&self) -> bool {
                match self {
                    Self::$common_variant(e) => $crate::error::ErrorClassification::is_retryable(e),
                    $(
                        $variant => $retryable,
                    )*
                }
            }

            fn severity(&self) -> $crate::error::ErrorSeverity {
                match self {
                    Self::$common_variant(e) => $crate::error::ErrorClassification::severity(e),
                    $(
                        $variant => $severity,
                    )*
                }
            }

            fn is_critical(&self) -> bool {
                match self {
                    Self::$common_variant(e) => $crate::error::ErrorClassification::is_critical(e),
                    $(
                        $variant => $critical,
                    )*
                }
            }

            fn retry_after(&self) -> ::core::option::Option<::std::time::Duration> {
                match self {
                    Self::$common_variant(e) => $crate::error::ErrorClassification::retry_after(e),
                    #[allow(unreachable_patterns)]
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}
