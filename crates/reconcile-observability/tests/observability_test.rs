use std::collections::BTreeMap;

use reconcile_core::model::{RoundStats, SizeDistribution};
use reconcile_observability::tracing_setup::{events, spans};
use reconcile_observability::{init_tracing_with_filter, MergeMetricsCollector};

#[test]
fn events_and_spans_emit_without_subscriber_panics() {
    init_tracing_with_filter("debug");
    // A second init must not panic.
    init_tracing_with_filter("debug");

    let span = reconcile_observability::merge_span!(10);
    let _guard = span.enter();
    events::round_completed(&RoundStats {
        round: 1,
        merges: 2,
        ..Default::default()
    });
    events::pair_failed(1, 2, "non-finite coordinate");
    events::conflict_dropped(1, 3, 0.9);
    events::merge_finished(2, 5, true);
    events::simsort_finished(3, 1, true);
    assert_eq!(spans::names::MERGE, "reconcile.merge");
}

#[test]
fn snapshot_exports_distribution() {
    let mut collector = MergeMetricsCollector::new();
    let distribution = SizeDistribution {
        by_sources: BTreeMap::from([(1, 3), (2, 1)]),
        by_members: BTreeMap::from([(1, 3), (2, 1)]),
    };
    assert_eq!(distribution.cluster_count(), 4);
    assert_eq!(distribution.member_count(), 5);

    collector.record_run(&[], true, distribution);
    let json = collector.to_json();
    assert_eq!(json["total_runs"], 1);
    assert_eq!(json["last_distribution"]["by_members"]["2"], 1);
}
