//! Rejoin step run before the first round.
//!
//! SimSort may split single vertices out of a component. Representatives that
//! came from the same original component are scored against each other and the
//! pairs above the merge threshold are merged back, best pair first, as long as
//! sources stay disjoint and the size cap holds.

use std::collections::{BTreeMap, HashMap};

use reconcile_blocking::PairRules;
use reconcile_core::errors::{PreconditionError, ReconcileResult};
use reconcile_core::model::{CandidatePair, ClusterEntity, EntityId};
use reconcile_core::traits::PairScorer;
use reconcile_observability::tracing_setup::events;
use reconcile_similarity::{score_pairs, Aggregator};
use tracing::info;

use crate::merge_step::merge_clusters;
use crate::working_set::{Replacement, WorkingSet};

pub(crate) fn rejoin_splits(
    ws: &WorkingSet,
    scorer: &dyn PairScorer,
    aggregator: &Aggregator,
    min_merge_similarity: f64,
    max_cluster_size: usize,
) -> ReconcileResult<(WorkingSet, usize)> {
    let mut by_component: BTreeMap<u64, Vec<&ClusterEntity>> = BTreeMap::new();
    for cluster in ws.pairable(max_cluster_size) {
        if let Some(component) = cluster.origin_component {
            by_component.entry(component).or_default().push(cluster);
        }
    }
    by_component.retain(|_, members| members.len() > 1);
    if by_component.is_empty() {
        return Ok((ws.clone(), 0));
    }

    let rules = PairRules::new(max_cluster_size);
    let mut candidates = Vec::new();
    for members in by_component.values() {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if rules.accepts(a, b) {
                    candidates.push(CandidatePair::new(a.id, b.id));
                }
            }
        }
    }
    let lookup: HashMap<EntityId, &ClusterEntity> = by_component
        .values()
        .flatten()
        .map(|c| (c.id, *c))
        .collect();
    let scored = score_pairs(candidates, &lookup, scorer, aggregator)?;
    for failure in &scored.failures {
        events::pair_failed(failure.source, failure.target, &failure.error.to_string());
    }

    let mut accepted: Vec<CandidatePair> = scored
        .scored
        .into_iter()
        .filter(|p| p.similarity >= min_merge_similarity)
        .collect();
    accepted.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.ids().cmp(&b.ids()))
    });

    // Greedy agglomeration: `owner` maps every original id to the id of the
    // cluster that currently contains it.
    let mut owner: HashMap<EntityId, EntityId> = lookup.keys().map(|id| (*id, *id)).collect();
    let mut current: HashMap<EntityId, ClusterEntity> =
        lookup.iter().map(|(id, c)| (*id, (*c).clone())).collect();
    let mut merges = 0;
    for pair in &accepted {
        let (Some(&left), Some(&right)) = (owner.get(&pair.source), owner.get(&pair.target)) else {
            continue;
        };
        if left == right {
            continue;
        }
        let (Some(a), Some(b)) = (current.get(&left), current.get(&right)) else {
            continue;
        };
        if !rules.accepts(a, b) {
            continue;
        }
        let merged = merge_clusters(a, b)?;
        let merged_id = merged.id;
        current.remove(&left);
        current.remove(&right);
        current.insert(merged_id, merged);
        for slot in owner.values_mut() {
            if *slot == left || *slot == right {
                *slot = merged_id;
            }
        }
        merges += 1;
    }

    if merges == 0 {
        return Ok((ws.clone(), 0));
    }

    let mut inputs: BTreeMap<EntityId, Vec<EntityId>> = BTreeMap::new();
    for (original, cluster) in &owner {
        inputs.entry(*cluster).or_default().push(*original);
    }
    let replacements = inputs
        .into_iter()
        .filter(|(_, originals)| originals.len() > 1)
        .map(|(id, mut originals)| {
            originals.sort_unstable();
            current
                .remove(&id)
                .map(|output| Replacement {
                    inputs: originals,
                    output,
                })
                .ok_or(PreconditionError::UnknownCluster { id })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        components = by_component.len(),
        merges, "rejoined representatives split by simsort"
    );
    Ok((ws.apply(replacements)?, merges))
}
