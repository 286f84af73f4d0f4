//! Observability primitives
//!
//! Metric emission is abstracted behind [`MetricsCollector`] so the core can
//! report timings and alert counts without binding to a metrics backend.
//! Exporters live outside this crate; [`InMemoryMetricsCollector`] keeps
//! everything in process for tests and local runs.

pub mod metrics;

// Re-export commonly used types for convenience
pub use metrics::{InMemoryMetricsCollector, MetricsCollector, MetricsSnapshot, NoOpMetricsCollector};
