//! Property tests for reconcile-merge: source disjointness, size cap,
//! partitioning, shrinking working sets and determinism.

use std::collections::BTreeSet;

use proptest::prelude::*;

use reconcile_core::config::ReconcileConfig;
use reconcile_core::encoding::{EntityType, SourceTag, TypeSet};
use reconcile_core::model::{Attributes, ClusterEntity, EntityRecord, GeoAttributes, GeoPoint};
use reconcile_merge::{EngineState, MergeEngine};

const SOURCES: [SourceTag; 5] = [
    SourceTag::DBpedia,
    SourceTag::GeoNames,
    SourceTag::LinkedGeoData,
    SourceTag::Freebase,
    SourceTag::NyTimes,
];
const LABELS: [&str; 4] = ["Leipzig", "Leipzig (Saxony)", "Halle", "Lepzig"];

fn records_strategy() -> impl Strategy<Value = Vec<EntityRecord>> {
    prop::collection::vec((0usize..5, 0usize..4, 0u32..40, any::<bool>()), 0..24).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (source, label, offset, typed))| {
                    let types = if typed {
                        TypeSet::of(EntityType::Settlement)
                    } else {
                        TypeSet::empty()
                    };
                    EntityRecord::new(
                        i as u64 + 1,
                        SOURCES[source],
                        LABELS[label],
                        Attributes::Geography(GeoAttributes {
                            point: Some(GeoPoint::new(51.3 + offset as f64 * 0.002, 12.37)),
                            types,
                        }),
                    )
                })
                .collect()
        },
    )
}

fn run(records: &[EntityRecord], max_cluster_size: usize) -> reconcile_merge::MergeOutcome {
    let mut config = ReconcileConfig::default();
    config.merge.max_cluster_size = max_cluster_size;
    let engine = MergeEngine::new(config).unwrap();
    engine
        .run(records.iter().map(ClusterEntity::from_record).collect())
        .unwrap()
}

proptest! {
    #[test]
    fn prop_members_never_share_a_source(records in records_strategy(), cap in 1usize..=5) {
        let outcome = run(&records, cap);
        for cluster in &outcome.clusters {
            prop_assert_eq!(cluster.sources.len(), cluster.members.len());
            prop_assert!(cluster.sources.len() <= cap);
        }
    }
}

proptest! {
    #[test]
    fn prop_component_groups_never_share_a_source(
        records in records_strategy(),
        components in prop::collection::vec(0u64..4, 24),
    ) {
        let grouped: Vec<EntityRecord> = records
            .into_iter()
            .zip(components)
            .map(|(record, component)| record.with_component(1_000 + component))
            .collect();
        let engine = MergeEngine::new(ReconcileConfig::default()).unwrap();
        let outcome = engine.run_records(&grouped).unwrap();
        let mut covered = BTreeSet::new();
        for cluster in &outcome.clusters {
            prop_assert_eq!(cluster.sources.len(), cluster.members.len());
            covered.extend(cluster.members.iter().copied());
        }
        prop_assert_eq!(covered.len(), grouped.len());
    }
}

proptest! {
    #[test]
    fn prop_clusters_partition_the_input(records in records_strategy()) {
        let outcome = run(&records, 4);
        let mut seen = BTreeSet::new();
        for cluster in &outcome.clusters {
            prop_assert!(cluster.members.contains(&cluster.id));
            for id in &cluster.members {
                prop_assert!(seen.insert(*id), "member {} in two clusters", id);
            }
        }
        let input: BTreeSet<u64> = records.iter().map(|r| r.id).collect();
        prop_assert_eq!(seen, input);
    }
}

proptest! {
    #[test]
    fn prop_working_set_shrinks_until_fixpoint(records in records_strategy()) {
        let outcome = run(&records, 4);
        prop_assert_eq!(outcome.state, EngineState::Fixpoint);
        let last = outcome.rounds.last().unwrap();
        prop_assert_eq!(last.merges, 0);
        for window in outcome.rounds.windows(2) {
            prop_assert!(window[0].merges > 0);
            prop_assert!(window[1].working_set_size < window[0].working_set_size);
            prop_assert_eq!(
                window[1].working_set_size,
                window[0].working_set_size - window[0].merges
            );
        }
        prop_assert_eq!(outcome.clusters.len(), last.working_set_size);
    }
}

proptest! {
    #[test]
    fn prop_runs_are_deterministic(records in records_strategy()) {
        let a = run(&records, 4);
        let b = run(&records, 4);
        let members = |o: &reconcile_merge::MergeOutcome| -> Vec<Vec<u64>> {
            o.clusters.iter().map(|c| c.members.iter().copied().collect()).collect()
        };
        prop_assert_eq!(members(&a), members(&b));
        prop_assert_eq!(a.rounds_run(), b.rounds_run());
    }
}
