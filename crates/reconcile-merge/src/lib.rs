//! # reconcile-merge
//!
//! Cluster representatives by majority vote, conflict resolution between
//! competing candidate pairs, and the fixpoint merge engine that drives blocking,
//! scoring and merging round by round.

pub mod conflict;
pub mod engine;
pub mod merge_step;
pub mod representative;
pub mod working_set;

pub use conflict::{resolve_conflicts, Resolution};
pub use engine::{EngineState, MergeEngine, MergeOutcome};
pub use merge_step::merge_clusters;
pub use representative::{build_representative, build_representatives, component_key};
pub use working_set::{Replacement, WorkingSet};
