//! # reconcile-observability
//!
//! Structured tracing with span definitions and event helpers, plus collection of
//! per-round merge metrics and cluster-size distributions for quality reporting.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::MergeMetricsCollector;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
