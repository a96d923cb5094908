//! End-to-end merge engine scenarios.

use std::sync::atomic::Ordering;

use reconcile_core::config::{AggregationMode, ReconcileConfig};
use reconcile_core::encoding::{EntityType, SourceTag, TypeSet};
use reconcile_core::errors::ReconcileError;
use reconcile_core::model::{
    Attributes, ClusterEntity, EntityRecord, GeoAttributes, GeoPoint, MusicAttributes,
};
use reconcile_merge::{EngineState, MergeEngine};
use reconcile_observability::MergeMetricsCollector;

fn place(id: u64, source: SourceTag, label: &str, lat: f64, lon: f64) -> EntityRecord {
    EntityRecord::new(
        id,
        source,
        label,
        Attributes::Geography(GeoAttributes {
            point: Some(GeoPoint::new(lat, lon)),
            types: TypeSet::of(EntityType::Settlement),
        }),
    )
}

fn singletons(records: &[EntityRecord]) -> Vec<ClusterEntity> {
    records.iter().map(ClusterEntity::from_record).collect()
}

#[test]
fn two_singletons_merge_into_one_cluster() {
    let records = [
        place(1, SourceTag::DBpedia, "Leipzig", 51.3397, 12.3731),
        place(2, SourceTag::GeoNames, "Leipzig.", 51.3396, 12.3713),
    ];
    let engine = MergeEngine::new(ReconcileConfig::default()).unwrap();
    let outcome = engine.run(singletons(&records)).unwrap();

    assert_eq!(outcome.state, EngineState::Fixpoint);
    assert_eq!(outcome.rounds_run(), 2);
    assert_eq!(outcome.clusters.len(), 1);
    let cluster = &outcome.clusters[0];
    assert_eq!(cluster.id, 1);
    assert_eq!(cluster.members.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(cluster.label, "Leipzig.");
    assert_eq!(cluster.sources.len(), 2);
    assert_eq!(cluster.blocking_key, "lei");
}

#[test]
fn conflicting_triangle_merges_only_the_mutual_best() {
    // A and B are each other's best; C's best is B, so B-C is dropped.
    let records = [
        place(1, SourceTag::DBpedia, "Leipzig", 51.3400, 12.37),
        place(2, SourceTag::GeoNames, "Leipzig", 51.3401, 12.37),
        place(3, SourceTag::Freebase, "Leipzig", 51.3450, 12.37),
    ];
    let mut config = ReconcileConfig::default();
    config.merge.max_rounds = 1;
    let outcome = MergeEngine::new(config).unwrap().run(singletons(&records)).unwrap();

    let round = &outcome.rounds[0];
    assert_eq!(round.candidates, 3);
    assert_eq!(round.scored, 3);
    assert_eq!(round.above_threshold, 3);
    assert_eq!(round.conflicts_dropped, 2);
    assert_eq!(round.reinstated, 1);
    assert_eq!(round.merges, 1);
    assert_eq!(outcome.state, EngineState::RoundCapReached);
    assert_eq!(outcome.clusters.len(), 2);
}

#[test]
fn shared_source_never_merges() {
    let records = [
        place(1, SourceTag::DBpedia, "Leipzig", 51.34, 12.37),
        place(2, SourceTag::DBpedia, "Leipzig", 51.34, 12.37),
    ];
    let outcome = MergeEngine::new(ReconcileConfig::default())
        .unwrap()
        .run(singletons(&records))
        .unwrap();
    assert_eq!(outcome.rounds[0].candidates, 0);
    assert_eq!(outcome.clusters.len(), 2);
}

#[test]
fn full_clusters_leave_the_working_set_pairing() {
    let records = [
        place(1, SourceTag::DBpedia, "Leipzig", 51.3400, 12.37),
        place(2, SourceTag::GeoNames, "Leipzig", 51.3401, 12.37),
        place(3, SourceTag::Freebase, "Leipzig", 51.3410, 12.37),
    ];
    let mut config = ReconcileConfig::default();
    config.merge.max_cluster_size = 2;
    let outcome = MergeEngine::new(config).unwrap().run(singletons(&records)).unwrap();
    assert_eq!(outcome.clusters.len(), 2);
    assert_eq!(outcome.rounds[1].full_clusters, 1);
    assert!(outcome.clusters.iter().all(|c| c.sources.len() <= 2));
}

#[test]
fn run_records_groups_by_component() {
    let records = [
        place(1, SourceTag::DBpedia, "Leipzig", 51.34, 12.37).with_component(7),
        place(2, SourceTag::GeoNames, "Leipzig", 51.34, 12.37).with_component(7),
        place(3, SourceTag::DBpedia, "Halle", 51.48, 11.97),
    ];
    let outcome = MergeEngine::new(ReconcileConfig::default())
        .unwrap()
        .run_records(&records)
        .unwrap();
    assert_eq!(outcome.clusters.len(), 2);
    assert_eq!(outcome.clusters[0].members.len(), 2);
    assert_eq!(outcome.clusters[0].origin_component, Some(7));
    assert_eq!(outcome.clusters[1].id, 3);
}

#[test]
fn repeated_source_in_a_component_stays_apart() {
    let records = [
        place(1, SourceTag::DBpedia, "Leipzig", 51.34, 12.37).with_component(7),
        place(2, SourceTag::GeoNames, "Leipzig", 51.34, 12.37).with_component(7),
        place(3, SourceTag::DBpedia, "Leipzig", 51.34, 12.37).with_component(7),
    ];
    let outcome = MergeEngine::new(ReconcileConfig::default())
        .unwrap()
        .run_records(&records)
        .unwrap();
    assert_eq!(outcome.clusters.len(), 2);
    assert_eq!(outcome.clusters[0].members.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(outcome.clusters[1].members.iter().copied().collect::<Vec<_>>(), vec![3]);
    for cluster in &outcome.clusters {
        assert_eq!(cluster.sources.len(), cluster.members.len());
    }
}

#[test]
fn weighted_aggregation_penalizes_missing_properties() {
    let bare = |id, source| {
        EntityRecord::new(
            id,
            source,
            "Leipzig",
            Attributes::Geography(GeoAttributes::default()),
        )
    };
    let records = [bare(1, SourceTag::DBpedia), bare(2, SourceTag::GeoNames)];

    let mean = MergeEngine::new(ReconcileConfig::default())
        .unwrap()
        .run(singletons(&records))
        .unwrap();
    assert_eq!(mean.clusters.len(), 1);

    let mut config = ReconcileConfig::default();
    config.similarity.aggregation = AggregationMode::Weighted;
    let weighted = MergeEngine::new(config).unwrap().run(singletons(&records)).unwrap();
    assert_eq!(weighted.clusters.len(), 2);
}

#[test]
fn music_tracks_merge_on_all_properties() {
    let track = |id, source, label: &str, length| {
        EntityRecord::new(
            id,
            source,
            label,
            Attributes::Music(MusicAttributes {
                artist: Some("Nina Simone".into()),
                album: Some("Pastel Blues".into()),
                year: Some(1965),
                length_ms: Some(length),
                ..MusicAttributes::default()
            }),
        )
    };
    let records = [
        track(1, SourceTag::MusicBrainz1, "Sinnerman", 622_000),
        track(2, SourceTag::MusicBrainz2, "Sinnerman", 620_000),
        track(3, SourceTag::MusicBrainz3, "Be My Husband", 170_000),
    ];
    let outcome = MergeEngine::new(ReconcileConfig::default())
        .unwrap()
        .run(singletons(&records))
        .unwrap();
    assert_eq!(outcome.clusters.len(), 2);
    let merged = &outcome.clusters[0];
    assert_eq!(merged.members.len(), 2);
    assert_eq!(merged.attributes.as_music().and_then(|m| m.year), Some(1965));
}

#[test]
fn mixed_domains_in_one_component_are_rejected() {
    let music = EntityRecord::new(
        2,
        SourceTag::MusicBrainz1,
        "Leipzig",
        Attributes::Music(MusicAttributes::default()),
    )
    .with_component(1);
    let records = [place(1, SourceTag::DBpedia, "Leipzig", 51.34, 12.37).with_component(1), music];
    let err = MergeEngine::new(ReconcileConfig::default())
        .unwrap()
        .run_records(&records)
        .unwrap_err();
    assert!(matches!(err, ReconcileError::PreconditionError(_)));
}

#[test]
fn outcome_feeds_the_metrics_collector() {
    let records = [
        place(1, SourceTag::DBpedia, "Leipzig", 51.3400, 12.37),
        place(2, SourceTag::GeoNames, "Leipzig", 51.3401, 12.37),
    ];
    let outcome = MergeEngine::new(ReconcileConfig::default())
        .unwrap()
        .run(singletons(&records))
        .unwrap();
    assert_eq!(outcome.distribution.cluster_count(), 1);
    assert_eq!(outcome.distribution.member_count(), 2);

    let mut collector = MergeMetricsCollector::new();
    outcome.record_into(&mut collector);
    assert_eq!(collector.total_runs, 1);
    assert_eq!(collector.capped_runs, 0);
    assert_eq!(collector.total_merges(), 1);
    assert_eq!(collector.total_rounds(), 2);
}

#[test]
fn engine_is_reusable_after_cancellation() {
    let engine = MergeEngine::new(ReconcileConfig::default()).unwrap();
    let cancel = engine.cancel_handle();
    cancel.store(true, Ordering::SeqCst);
    assert!(matches!(
        engine.run(Vec::new()),
        Err(ReconcileError::Cancelled { round: 0 })
    ));
    assert!(!engine.is_running());
    assert!(engine.run(Vec::new()).unwrap().reached_fixpoint());
}
