use serde::{Deserialize, Serialize};

use super::defaults;

/// Merge/refinement engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Minimum aggregated similarity for a pair to be merged.
    pub min_merge_similarity: f64,
    /// Maximum number of distinct sources a cluster may hold.
    pub max_cluster_size: usize,
    /// Safety valve: the loop stops after this many rounds even without a fixpoint.
    pub max_rounds: usize,
    /// Re-merge representatives that SimSort split out of one original component.
    pub rejoin_simsort_splits: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            min_merge_similarity: defaults::DEFAULT_MIN_MERGE_SIMILARITY,
            max_cluster_size: defaults::DEFAULT_MAX_CLUSTER_SIZE,
            max_rounds: defaults::DEFAULT_MAX_ROUNDS,
            rejoin_simsort_splits: defaults::DEFAULT_REJOIN_SIMSORT_SPLITS,
        }
    }
}
