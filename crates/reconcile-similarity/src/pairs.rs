//! Data-parallel scoring of candidate pairs.

use std::collections::HashMap;

use rayon::prelude::*;
use reconcile_core::errors::{PreconditionError, SimilarityError};
use reconcile_core::model::{CandidatePair, EntityId};
use reconcile_core::traits::{Clustered, PairScorer};
use tracing::debug;

use crate::aggregator::Aggregator;

/// A pair whose similarity computation failed. The pair is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PairFailure {
    pub source: EntityId,
    pub target: EntityId,
    pub error: SimilarityError,
}

/// Result of scoring a batch of candidates.
#[derive(Debug, Clone, Default)]
pub struct ScoredPairs {
    pub scored: Vec<CandidatePair>,
    pub failures: Vec<PairFailure>,
}

/// Score every candidate in parallel and aggregate its per-property scores.
///
/// A failing metric drops only its own pair; the failure is returned for the
/// caller to report.
/// A candidate referring to an id missing from `entities` is a precondition
/// violation and aborts the batch. Output keeps the input order.
pub fn score_pairs<C>(
    candidates: Vec<CandidatePair>,
    entities: &HashMap<EntityId, C>,
    scorer: &dyn PairScorer,
    aggregator: &Aggregator,
) -> Result<ScoredPairs, PreconditionError>
where
    C: Clustered + Sync,
{
    let results: Vec<Result<CandidatePair, PairFailure>> = candidates
        .into_par_iter()
        .map(|mut pair| {
            let a = entities
                .get(&pair.source)
                .ok_or(PreconditionError::UnknownCluster { id: pair.source })?;
            let b = entities
                .get(&pair.target)
                .ok_or(PreconditionError::UnknownCluster { id: pair.target })?;
            Ok(match scorer.score(a, b) {
                Ok(scores) => {
                    pair.similarity = aggregator.aggregate(a.attributes().domain(), &scores);
                    pair.scores = scores;
                    Ok(pair)
                }
                Err(error) => Err(PairFailure {
                    source: pair.source,
                    target: pair.target,
                    error,
                }),
            })
        })
        .collect::<Result<_, PreconditionError>>()?;

    let mut out = ScoredPairs::default();
    for result in results {
        match result {
            Ok(pair) => out.scored.push(pair),
            Err(failure) => out.failures.push(failure),
        }
    }
    debug!(
        scorer = scorer.name(),
        scored = out.scored.len(),
        failures = out.failures.len(),
        "pairs scored"
    );
    Ok(out)
}
