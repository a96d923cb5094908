//! The collection of clusters under refinement.

use std::collections::BTreeMap;

use reconcile_core::errors::PreconditionError;
use reconcile_core::model::{ClusterEntity, EntityId, SizeDistribution};

/// A merged cluster and the clusters it supersedes.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub inputs: Vec<EntityId>,
    pub output: ClusterEntity,
}

/// Clusters keyed by id. Each round builds a new working set from the previous
/// one; a committed set is never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    clusters: BTreeMap<EntityId, ClusterEntity>,
}

impl WorkingSet {
    pub fn new(clusters: Vec<ClusterEntity>) -> Result<Self, PreconditionError> {
        let mut map = BTreeMap::new();
        for cluster in clusters {
            let id = cluster.id;
            if map.insert(id, cluster).is_some() {
                return Err(PreconditionError::DuplicateCluster { id });
            }
        }
        Ok(Self { clusters: map })
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&ClusterEntity> {
        self.clusters.get(&id)
    }

    /// Clusters in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ClusterEntity> {
        self.clusters.values()
    }

    /// Active clusters below the size cap, in id order.
    pub fn pairable(&self, max_cluster_size: usize) -> Vec<&ClusterEntity> {
        self.iter()
            .filter(|c| c.active && !c.is_full(max_cluster_size))
            .collect()
    }

    /// Number of clusters at or beyond the size cap.
    pub fn full_count(&self, max_cluster_size: usize) -> usize {
        self.iter().filter(|c| c.is_full(max_cluster_size)).count()
    }

    /// Build the next working set: every input of a replacement is removed and
    /// its output inserted.
    pub fn apply(&self, replacements: Vec<Replacement>) -> Result<Self, PreconditionError> {
        let mut clusters = self.clusters.clone();
        for replacement in &replacements {
            for id in &replacement.inputs {
                if clusters.remove(id).is_none() {
                    return Err(PreconditionError::UnknownCluster { id: *id });
                }
            }
        }
        for replacement in replacements {
            let id = replacement.output.id;
            if clusters.insert(id, replacement.output).is_some() {
                return Err(PreconditionError::DuplicateCluster { id });
            }
        }
        Ok(Self { clusters })
    }

    /// Read-only cluster-size distribution over active clusters.
    pub fn size_distribution(&self) -> SizeDistribution {
        let mut distribution = SizeDistribution::default();
        for cluster in self.iter().filter(|c| c.active) {
            *distribution
                .by_sources
                .entry(cluster.source_count())
                .or_insert(0) += 1;
            *distribution
                .by_members
                .entry(cluster.members.len())
                .or_insert(0) += 1;
        }
        distribution
    }

    /// Active clusters sorted by id.
    pub fn into_active(self) -> Vec<ClusterEntity> {
        self.clusters.into_values().filter(|c| c.active).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use reconcile_core::encoding::SourceTag;
    use reconcile_core::model::{Attributes, EntityRecord, GeoAttributes};

    fn singleton(id: u64, source: SourceTag) -> ClusterEntity {
        ClusterEntity::from_record(&EntityRecord::new(
            id,
            source,
            "x",
            Attributes::Geography(GeoAttributes::default()),
        ))
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = WorkingSet::new(vec![
            singleton(1, SourceTag::DBpedia),
            singleton(1, SourceTag::GeoNames),
        ])
        .unwrap_err();
        assert!(matches!(err, PreconditionError::DuplicateCluster { id: 1 }));
    }

    #[test]
    fn apply_replaces_inputs() {
        let ws = WorkingSet::new(vec![
            singleton(1, SourceTag::DBpedia),
            singleton(2, SourceTag::GeoNames),
            singleton(3, SourceTag::Freebase),
        ])
        .unwrap();
        let mut merged = singleton(1, SourceTag::DBpedia);
        merged.members = BTreeSet::from([1, 2]);
        merged.sources = [SourceTag::DBpedia, SourceTag::GeoNames].into_iter().collect();

        let next = ws
            .apply(vec![Replacement {
                inputs: vec![1, 2],
                output: merged,
            }])
            .unwrap();
        assert_eq!(ws.len(), 3);
        assert_eq!(next.len(), 2);
        assert_eq!(next.get(1).map(|c| c.members.len()), Some(2));
        assert!(next.get(2).is_none());

        let dist = next.size_distribution();
        assert_eq!(dist.by_sources.get(&2), Some(&1));
        assert_eq!(dist.by_sources.get(&1), Some(&1));
        assert_eq!(dist.member_count(), 3);
    }

    #[test]
    fn apply_rejects_unknown_inputs() {
        let ws = WorkingSet::new(vec![singleton(1, SourceTag::DBpedia)]).unwrap();
        let err = ws
            .apply(vec![Replacement {
                inputs: vec![1, 9],
                output: singleton(1, SourceTag::DBpedia),
            }])
            .unwrap_err();
        assert!(matches!(err, PreconditionError::UnknownCluster { id: 9 }));
    }

    #[test]
    fn pairable_skips_full_and_inactive() {
        let mut full = singleton(1, SourceTag::DBpedia);
        full.sources = [SourceTag::DBpedia, SourceTag::GeoNames].into_iter().collect();
        let mut inactive = singleton(2, SourceTag::Freebase);
        inactive.active = false;
        let ws = WorkingSet::new(vec![full, inactive, singleton(3, SourceTag::NyTimes)]).unwrap();

        let ids: Vec<_> = ws.pairable(2).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(ws.full_count(2), 1);
        assert_eq!(ws.clone().into_active().len(), 2);
    }
}
