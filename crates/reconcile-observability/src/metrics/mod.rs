//! Merge metrics collection across runs.

mod merge_metrics;

pub use merge_metrics::MergeMetricsCollector;
