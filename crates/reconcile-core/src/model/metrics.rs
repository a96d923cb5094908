use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Statistics of one merge round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    /// 1-based round number.
    pub round: usize,
    /// Working-set size at the start of the round.
    pub working_set_size: usize,
    /// Clusters excluded from pairing because they hit the size cap.
    pub full_clusters: usize,
    /// Pairs produced by the candidate generator.
    pub candidates: usize,
    /// Pairs scored successfully.
    pub scored: usize,
    /// Pairs whose similarity computation failed and were dropped.
    pub failures: usize,
    /// Pairs at or above the merge threshold.
    pub above_threshold: usize,
    /// Pairs dropped by conflict resolution.
    pub conflicts_dropped: usize,
    /// Flagged pairs reinstated as mutual best matches.
    pub reinstated: usize,
    /// Merges committed this round.
    pub merges: usize,
}

/// Read-only cluster-size distribution: size -> number of clusters of that size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDistribution {
    /// Keyed by number of distinct sources.
    pub by_sources: BTreeMap<usize, usize>,
    /// Keyed by number of member records.
    pub by_members: BTreeMap<usize, usize>,
}

impl SizeDistribution {
    /// Total number of clusters counted.
    pub fn cluster_count(&self) -> usize {
        self.by_members.values().sum()
    }

    /// Total number of member records counted.
    pub fn member_count(&self) -> usize {
        self.by_members.iter().map(|(size, n)| size * n).sum()
    }
}
