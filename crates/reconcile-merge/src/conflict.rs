//! Conflict resolution between accepted pairs that share a cluster.
//!
//! Any cluster taking part in more than one accepted pair flags all of its pairs.
//! A flagged pair survives only when both sides rank each other as their single
//! highest-scoring candidate; a tie for the top score is not a single best.

use std::collections::HashMap;

use reconcile_core::model::{CandidatePair, EntityId};

/// Outcome of conflict resolution for one round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Pairs to merge, mutually exclusive, sorted by (source, target).
    pub accepted: Vec<CandidatePair>,
    /// Flagged pairs that are not mutual best matches.
    pub dropped: Vec<CandidatePair>,
    /// Flagged pairs kept as mutual best matches.
    pub reinstated: usize,
}

#[derive(Debug, Clone, Copy)]
struct Best {
    partner: EntityId,
    similarity: f64,
    tied: bool,
}

impl Best {
    fn offer(slot: &mut Option<Best>, partner: EntityId, similarity: f64) {
        match slot {
            None => {
                *slot = Some(Best {
                    partner,
                    similarity,
                    tied: false,
                })
            }
            Some(best) if similarity > best.similarity => {
                *best = Best {
                    partner,
                    similarity,
                    tied: false,
                }
            }
            Some(best) if similarity == best.similarity => best.tied = true,
            Some(_) => {}
        }
    }

    fn is_single(slot: Option<&Best>, partner: EntityId) -> bool {
        matches!(slot, Some(best) if !best.tied && best.partner == partner)
    }
}

/// Resolve conflicts among `pairs`, all already above the merge threshold.
pub fn resolve_conflicts(pairs: Vec<CandidatePair>) -> Resolution {
    let mut degree: HashMap<EntityId, usize> = HashMap::new();
    let mut best: HashMap<EntityId, Option<Best>> = HashMap::new();
    for pair in &pairs {
        for (id, partner) in [(pair.source, pair.target), (pair.target, pair.source)] {
            *degree.entry(id).or_insert(0) += 1;
            Best::offer(best.entry(id).or_insert(None), partner, pair.similarity);
        }
    }

    let mut resolution = Resolution::default();
    for pair in pairs {
        let flagged = degree.get(&pair.source).copied().unwrap_or(0) > 1
            || degree.get(&pair.target).copied().unwrap_or(0) > 1;
        if !flagged {
            resolution.accepted.push(pair);
            continue;
        }
        let mutual = Best::is_single(best.get(&pair.source).and_then(Option::as_ref), pair.target)
            && Best::is_single(best.get(&pair.target).and_then(Option::as_ref), pair.source);
        if mutual {
            resolution.reinstated += 1;
            resolution.accepted.push(pair);
        } else {
            resolution.dropped.push(pair);
        }
    }
    resolution.accepted.sort_by_key(CandidatePair::ids);
    resolution
}
