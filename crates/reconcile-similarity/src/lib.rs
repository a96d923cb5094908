//! # reconcile-similarity
//!
//! Per-property comparators (geo distance, label strings, type overlap, music
//! properties), the aggregator that folds present scores into one value, and
//! data-parallel scoring of candidate pairs.

pub mod aggregator;
pub mod metrics;
pub mod pairs;
pub mod scorer;

pub use aggregator::Aggregator;
pub use pairs::{score_pairs, PairFailure, ScoredPairs};
pub use scorer::SimilarityScorer;
