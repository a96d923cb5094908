//! One merge round: pair, score, filter, resolve, merge, replace.

use std::collections::HashMap;

use rayon::prelude::*;
use reconcile_blocking::CandidateGenerator;
use reconcile_core::errors::{PreconditionError, ReconcileResult};
use reconcile_core::model::{ClusterEntity, EntityId, RoundStats};
use reconcile_core::traits::PairScorer;
use reconcile_observability::round_span;
use reconcile_observability::tracing_setup::events;
use reconcile_similarity::{score_pairs, Aggregator};
use tracing::debug;

use crate::conflict::resolve_conflicts;
use crate::merge_step::merge_clusters;
use crate::working_set::{Replacement, WorkingSet};

pub(crate) struct RoundContext<'a> {
    pub generator: &'a CandidateGenerator,
    pub scorer: &'a dyn PairScorer,
    pub aggregator: &'a Aggregator,
    pub min_merge_similarity: f64,
    pub max_cluster_size: usize,
}

/// Run round `round` over `ws` and return the next working set.
pub(crate) fn run_round(
    ctx: &RoundContext<'_>,
    round: usize,
    ws: &WorkingSet,
) -> ReconcileResult<(WorkingSet, RoundStats)> {
    let span = round_span!(round);
    let _guard = span.enter();

    let mut stats = RoundStats {
        round,
        working_set_size: ws.len(),
        full_clusters: ws.full_count(ctx.max_cluster_size),
        ..RoundStats::default()
    };

    // Phase 1: exclude full clusters. Phase 2: blocking and pairing.
    let pairable: Vec<ClusterEntity> = ws
        .pairable(ctx.max_cluster_size)
        .into_iter()
        .cloned()
        .collect();
    let candidates = ctx.generator.generate(&pairable);
    stats.candidates = candidates.len();

    // Phase 3: scoring.
    let lookup: HashMap<EntityId, &ClusterEntity> = pairable.iter().map(|c| (c.id, c)).collect();
    let scored = score_pairs(candidates, &lookup, ctx.scorer, ctx.aggregator)?;
    stats.scored = scored.scored.len();
    stats.failures = scored.failures.len();
    for failure in &scored.failures {
        events::pair_failed(failure.source, failure.target, &failure.error.to_string());
    }

    // Phase 4: threshold.
    let above: Vec<_> = scored
        .scored
        .into_iter()
        .filter(|p| p.similarity >= ctx.min_merge_similarity)
        .collect();
    stats.above_threshold = above.len();

    // Phase 5: conflicts.
    let resolution = resolve_conflicts(above);
    stats.conflicts_dropped = resolution.dropped.len();
    stats.reinstated = resolution.reinstated;
    for pair in &resolution.dropped {
        events::conflict_dropped(pair.source, pair.target, pair.similarity);
    }

    // Phase 6: merge.
    let replacements = resolution
        .accepted
        .par_iter()
        .map(|pair| {
            let a = lookup
                .get(&pair.source)
                .ok_or(PreconditionError::UnknownCluster { id: pair.source })?;
            let b = lookup
                .get(&pair.target)
                .ok_or(PreconditionError::UnknownCluster { id: pair.target })?;
            merge_clusters(a, b).map(|output| Replacement {
                inputs: vec![pair.source, pair.target],
                output,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    stats.merges = replacements.len();

    // Phase 7: replace.
    let next = ws.apply(replacements)?;
    debug!(round, before = ws.len(), after = next.len(), "round committed");
    Ok((next, stats))
}
