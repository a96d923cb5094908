use reconcile_core::model::{RoundStats, SizeDistribution};
use serde::{Deserialize, Serialize};

/// Aggregated merge metrics over any number of runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeMetricsCollector {
    /// Every recorded round, across runs.
    rounds: Vec<RoundStats>,
    /// Total merge runs recorded.
    pub total_runs: u64,
    /// Runs that stopped at the round cap instead of a fixpoint.
    pub capped_runs: u64,
    /// Cluster-size distribution at the end of the latest run.
    pub last_distribution: Option<SizeDistribution>,
}

impl MergeMetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rounds and final distribution of one run.
    pub fn record_run(
        &mut self,
        rounds: &[RoundStats],
        reached_fixpoint: bool,
        distribution: SizeDistribution,
    ) {
        self.rounds.extend_from_slice(rounds);
        self.total_runs += 1;
        if !reached_fixpoint {
            self.capped_runs += 1;
        }
        self.last_distribution = Some(distribution);
    }

    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn total_merges(&self) -> usize {
        self.rounds.iter().map(|r| r.merges).sum()
    }

    pub fn total_conflicts_dropped(&self) -> usize {
        self.rounds.iter().map(|r| r.conflicts_dropped).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.rounds.iter().map(|r| r.failures).sum()
    }

    /// Average merges per round.
    pub fn avg_merges_per_round(&self) -> f64 {
        if self.rounds.is_empty() {
            return 0.0;
        }
        self.total_merges() as f64 / self.rounds.len() as f64
    }

    /// Share of above-threshold pairs lost to conflict resolution.
    pub fn conflict_rate(&self) -> f64 {
        let above: usize = self.rounds.iter().map(|r| r.above_threshold).sum();
        if above == 0 {
            return 0.0;
        }
        self.total_conflicts_dropped() as f64 / above as f64
    }

    /// Serialize a snapshot for export.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "total_runs": self.total_runs,
            "capped_runs": self.capped_runs,
            "total_rounds": self.total_rounds(),
            "total_merges": self.total_merges(),
            "total_conflicts_dropped": self.total_conflicts_dropped(),
            "total_failures": self.total_failures(),
            "avg_merges_per_round": self.avg_merges_per_round(),
            "conflict_rate": self.conflict_rate(),
            "last_distribution": self.last_distribution,
        })
    }
}
