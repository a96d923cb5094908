use reconcile_core::model::{ClusterEntity, RoundStats, SizeDistribution};
use reconcile_observability::MergeMetricsCollector;
use serde::{Deserialize, Serialize};

/// Where the fixpoint loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// The last round merged at least one pair.
    HasCandidateMerges,
    /// A round accepted zero pairs.
    Fixpoint,
    /// The round cap stopped the loop before a fixpoint.
    RoundCapReached,
}

/// Result of one merge run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Active clusters sorted by id.
    pub clusters: Vec<ClusterEntity>,
    pub state: EngineState,
    /// Statistics per executed round, in order.
    pub rounds: Vec<RoundStats>,
    /// Merges performed by the SimSort rejoin step before the first round.
    pub rejoined: usize,
    pub distribution: SizeDistribution,
}

impl MergeOutcome {
    pub fn rounds_run(&self) -> usize {
        self.rounds.len()
    }

    pub fn reached_fixpoint(&self) -> bool {
        self.state == EngineState::Fixpoint
    }

    pub fn total_merges(&self) -> usize {
        self.rounds.iter().map(|r| r.merges).sum()
    }

    /// Feed this run into a metrics collector.
    pub fn record_into(&self, collector: &mut MergeMetricsCollector) {
        collector.record_run(&self.rounds, self.reached_fixpoint(), self.distribution.clone());
    }
}
