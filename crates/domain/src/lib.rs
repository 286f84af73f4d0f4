//! # TextOps Domain
//!
//! Domain types shared by every TextOps crate.
//!
//! This crate contains:
//! - Sentiment labels, class probabilities and monitoring observations
//! - Model hyper-parameters passed through the registry
//! - The `TextOpsError` type and `Result` alias
//! - Configuration structures with their defaults
//! - Domain constants (metric names, feature names, defaults)
//!
//! ## Architecture
//! - Depends only on `textops-common` foundation utilities
//! - No I/O, no logging, no locking

#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
