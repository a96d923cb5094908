//! Candidate pair generation: blocking plus structural pairing constraints.

use std::collections::BTreeMap;

use rayon::prelude::*;
use reconcile_core::config::BlockingConfig;
use reconcile_core::encoding::{SourceSet, SourceTag};
use reconcile_core::model::{CandidatePair, ClusterEntity};
use tracing::debug;

use crate::keys::{Blocker, KeyFunction};

/// Structural constraints a pair must satisfy to become a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRules {
    /// Maximum number of distinct sources of the merged cluster.
    pub max_cluster_size: usize,
    /// Both sides carrying types must share one.
    pub require_type_overlap: bool,
    /// Only pair with singleton clusters from this source.
    pub new_source: Option<SourceTag>,
}

impl PairRules {
    pub fn new(max_cluster_size: usize) -> Self {
        Self {
            max_cluster_size,
            require_type_overlap: false,
            new_source: None,
        }
    }

    pub fn from_config(config: &BlockingConfig, max_cluster_size: usize) -> Self {
        Self {
            max_cluster_size,
            require_type_overlap: config.require_type_overlap,
            new_source: config.new_source,
        }
    }

    /// Whether `a` and `b` may be merged.
    pub fn accepts(&self, a: &ClusterEntity, b: &ClusterEntity) -> bool {
        if a.sources.overlaps(b.sources) {
            return false;
        }
        if a.sources.union(b.sources).len() > self.max_cluster_size {
            return false;
        }
        if self.require_type_overlap {
            let (ta, tb) = (a.types(), b.types());
            if !ta.is_empty() && !tb.is_empty() && !ta.overlaps(tb) {
                return false;
            }
        }
        match self.new_source {
            Some(source) => is_new_singleton(a, source) || is_new_singleton(b, source),
            None => true,
        }
    }
}

fn is_new_singleton(cluster: &ClusterEntity, source: SourceTag) -> bool {
    cluster.members.len() == 1 && cluster.sources == SourceSet::of(source)
}

/// Group active clusters by key and emit every accepted pair within a group.
///
/// Groups are processed in parallel. The output is sorted by (source, target).
pub fn generate_candidates(
    clusters: &[ClusterEntity],
    key_fn: &dyn KeyFunction,
    rules: &PairRules,
) -> Vec<CandidatePair> {
    let mut groups: BTreeMap<String, Vec<&ClusterEntity>> = BTreeMap::new();
    for cluster in clusters.iter().filter(|c| c.active) {
        groups
            .entry(key_fn.key_or_unblocked(cluster))
            .or_default()
            .push(cluster);
    }
    let group_count = groups.len();

    let mut pairs: Vec<CandidatePair> = groups
        .into_par_iter()
        .flat_map_iter(|(_, members)| {
            let mut local = Vec::new();
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    if rules.accepts(a, b) {
                        local.push(CandidatePair::new(a.id, b.id));
                    }
                }
            }
            local
        })
        .collect();
    pairs.sort_unstable_by_key(CandidatePair::ids);

    debug!(groups = group_count, candidates = pairs.len(), "candidates generated");
    pairs
}

/// Candidate generation bound to one configuration.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    config: BlockingConfig,
    rules: PairRules,
}

impl CandidateGenerator {
    pub fn new(config: BlockingConfig, max_cluster_size: usize) -> Self {
        let rules = PairRules::from_config(&config, max_cluster_size);
        Self { config, rules }
    }

    pub fn rules(&self) -> &PairRules {
        &self.rules
    }

    /// Blocker for the current clusters. IDF tables are computed over the
    /// active clusters only.
    pub fn blocker(&self, clusters: &[ClusterEntity]) -> Blocker {
        let active: Vec<ClusterEntity> = clusters.iter().filter(|c| c.active).cloned().collect();
        Blocker::new(self.config.strategy.clone(), &active)
    }

    /// Store the blocking key on each cluster.
    pub fn assign_keys(&self, clusters: &mut [ClusterEntity]) {
        let blocker = self.blocker(clusters);
        for cluster in clusters.iter_mut() {
            cluster.blocking_key = blocker.key_or_unblocked(cluster);
        }
    }

    pub fn generate(&self, clusters: &[ClusterEntity]) -> Vec<CandidatePair> {
        let blocker = self.blocker(clusters);
        generate_candidates(clusters, &blocker, &self.rules)
    }
}
