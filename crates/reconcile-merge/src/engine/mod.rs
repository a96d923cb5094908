//! MergeEngine: explicit fixpoint loop with a round cap, a single-execution
//! guard, and cooperative cancellation between rounds.

mod outcome;
mod rejoin;
mod round;

pub use outcome::{EngineState, MergeOutcome};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reconcile_blocking::CandidateGenerator;
use reconcile_core::config::ReconcileConfig;
use reconcile_core::errors::{ReconcileError, ReconcileResult};
use reconcile_core::model::{ClusterEntity, EntityRecord};
use reconcile_core::traits::PairScorer;
use reconcile_observability::merge_span;
use reconcile_observability::tracing_setup::events;
use reconcile_similarity::{Aggregator, SimilarityScorer};
use reconcile_simsort::SimSort;
use tracing::info;

use crate::representative::{build_representatives, component_key};
use crate::working_set::WorkingSet;
use round::RoundContext;

/// The iterative cluster merge engine.
///
/// Each round pairs the clusters below the size cap, scores and filters the
/// pairs, resolves conflicts and merges what remains. The loop stops at the
/// first round that merges nothing, or at the configured round cap.
pub struct MergeEngine {
    config: ReconcileConfig,
    scorer: Box<dyn PairScorer>,
    aggregator: Aggregator,
    generator: CandidateGenerator,
    /// Guard: only one run at a time.
    is_running: Arc<AtomicBool>,
    /// Checked at every round barrier.
    cancel: Arc<AtomicBool>,
}

impl MergeEngine {
    /// Create an engine scoring with the metrics configured in `config`.
    pub fn new(config: ReconcileConfig) -> ReconcileResult<Self> {
        let scorer = SimilarityScorer::new(config.similarity.clone());
        Self::with_scorer(config, Box::new(scorer))
    }

    /// Create an engine with a custom pair scorer. Aggregation still follows
    /// `config.similarity`.
    pub fn with_scorer(
        config: ReconcileConfig,
        scorer: Box<dyn PairScorer>,
    ) -> ReconcileResult<Self> {
        config.validate()?;
        let aggregator = Aggregator::new(config.similarity.clone());
        let generator =
            CandidateGenerator::new(config.blocking.clone(), config.merge.max_cluster_size);
        Ok(Self {
            config,
            scorer,
            aggregator,
            generator,
            is_running: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Shared flag; setting it stops the current (or next) run at its next round
    /// barrier. The flag is cleared when a run ends.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Group records by component, build one representative per component and
    /// refine them.
    ///
    /// With SimSort enabled, components are purified first and every excluded
    /// record starts as a representative of its own.
    pub fn run_records(&self, records: &[EntityRecord]) -> ReconcileResult<MergeOutcome> {
        let representatives = if self.config.simsort.enabled {
            let simsort = SimSort::new(self.config.simsort.clone());
            let (_, keys) = simsort.purify(records, self.scorer.as_ref(), &self.aggregator)?;
            build_representatives(records, |record| {
                keys.get(&record.id).copied().unwrap_or_else(|| component_key(record))
            })?
        } else {
            build_representatives(records, component_key)?
        };
        self.run(representatives)
    }

    /// Refine `clusters` until a fixpoint or the round cap.
    pub fn run(&self, clusters: Vec<ClusterEntity>) -> ReconcileResult<MergeOutcome> {
        // Acquire the single-execution guard.
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ReconcileError::AlreadyRunning);
        }

        let result = self.run_loop(clusters);

        // Release the guard.
        self.cancel.store(false, Ordering::SeqCst);
        self.is_running.store(false, Ordering::SeqCst);
        result
    }

    /// Merge representatives split out of one original component back together.
    ///
    /// Returns the resulting clusters (sorted by id) and the number of merges.
    pub fn prepare(
        &self,
        clusters: Vec<ClusterEntity>,
    ) -> ReconcileResult<(Vec<ClusterEntity>, usize)> {
        let ws = WorkingSet::new(clusters)?;
        let (ws, merges) = self.rejoin(&ws)?;
        Ok((ws.iter().cloned().collect(), merges))
    }

    fn rejoin(&self, ws: &WorkingSet) -> ReconcileResult<(WorkingSet, usize)> {
        rejoin::rejoin_splits(
            ws,
            self.scorer.as_ref(),
            &self.aggregator,
            self.config.merge.min_merge_similarity,
            self.config.merge.max_cluster_size,
        )
    }

    fn run_loop(&self, clusters: Vec<ClusterEntity>) -> ReconcileResult<MergeOutcome> {
        let span = merge_span!(clusters.len());
        let _guard = span.enter();

        let mut ws = WorkingSet::new(clusters)?;
        let mut rejoined = 0;
        if self.config.merge.rejoin_simsort_splits {
            (ws, rejoined) = self.rejoin(&ws)?;
        }

        let ctx = RoundContext {
            generator: &self.generator,
            scorer: self.scorer.as_ref(),
            aggregator: &self.aggregator,
            min_merge_similarity: self.config.merge.min_merge_similarity,
            max_cluster_size: self.config.merge.max_cluster_size,
        };
        let mut rounds = Vec::new();
        let mut state = EngineState::HasCandidateMerges;
        while state == EngineState::HasCandidateMerges {
            if rounds.len() >= self.config.merge.max_rounds {
                state = EngineState::RoundCapReached;
                break;
            }
            if self.cancel.load(Ordering::SeqCst) {
                info!(round = rounds.len(), "merge cancelled");
                return Err(ReconcileError::Cancelled {
                    round: rounds.len(),
                });
            }

            let (next, stats) = round::run_round(&ctx, rounds.len() + 1, &ws)?;
            events::round_completed(&stats);
            if stats.merges == 0 {
                state = EngineState::Fixpoint;
            }
            rounds.push(stats);
            ws = next;
        }

        let distribution = ws.size_distribution();
        let mut clusters = ws.into_active();
        self.generator.assign_keys(&mut clusters);
        events::merge_finished(rounds.len(), clusters.len(), state == EngineState::Fixpoint);

        Ok(MergeOutcome {
            clusters,
            state,
            rounds,
            rejoined,
            distribution,
        })
    }
}
