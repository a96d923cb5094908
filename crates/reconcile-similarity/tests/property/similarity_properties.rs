//! Property tests: every metric and both aggregation modes are symmetric and bounded.

use proptest::prelude::*;
use reconcile_core::config::{AggregationMode, SimilarityConfig, StringMetric};
use reconcile_core::encoding::{EntityType, SourceTag, Tag, TypeSet};
use reconcile_core::model::{Attributes, EntityRecord, GeoAttributes, GeoPoint};
use reconcile_core::traits::PairScorer;
use reconcile_similarity::metrics::{compare_labels, geo_similarity, type_overlap};
use reconcile_similarity::SimilarityScorer;

fn point() -> impl Strategy<Value = GeoPoint> {
    (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

fn types() -> impl Strategy<Value = TypeSet> {
    (0u32..(1 << EntityType::ALL.len())).prop_map(TypeSet::from_bits)
}

fn place() -> impl Strategy<Value = (String, Option<GeoPoint>, TypeSet)> {
    ("[a-zA-Z ,()-]{0,16}", proptest::option::of(point()), types())
}

proptest! {
    #[test]
    fn string_metrics_are_symmetric_and_bounded(a in "[a-zA-Z0-9 .,-]{0,20}", b in "[a-zA-Z0-9 .,-]{0,20}") {
        for metric in [StringMetric::Trigram, StringMetric::JaroWinkler] {
            let ab = compare_labels(&a, &b, metric);
            let ba = compare_labels(&b, &a, metric);
            prop_assert_eq!(ab, ba);
            if let Some(score) = ab {
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn geo_is_symmetric_and_bounded(a in point(), b in point()) {
        let ab = geo_similarity((1, Some(a)), (2, Some(b)), 50_000.0).unwrap();
        let ba = geo_similarity((2, Some(b)), (1, Some(a)), 50_000.0).unwrap();
        prop_assert_eq!(ab, ba);
        let score = ab.unwrap();
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn type_overlap_is_symmetric(a in types(), b in types()) {
        prop_assert_eq!(type_overlap(a, b), type_overlap(b, a));
    }

    #[test]
    fn aggregate_is_symmetric(left in place(), right in place(), weighted in any::<bool>()) {
        let config = SimilarityConfig {
            aggregation: if weighted { AggregationMode::Weighted } else { AggregationMode::Mean },
            ..SimilarityConfig::default()
        };
        let scorer = SimilarityScorer::new(config);
        let make = |id: u64, source: SourceTag, (label, point, types): (String, Option<GeoPoint>, TypeSet)| {
            EntityRecord::new(id, source, label, Attributes::Geography(GeoAttributes { point, types }))
        };
        let a = make(1, SourceTag::DBpedia, left);
        let b = make(2, SourceTag::GeoNames, right);

        let ab = scorer.score_pair(&a, &b).unwrap();
        let ba = scorer.score_pair(&b, &a).unwrap();
        prop_assert_eq!(ab.similarity, ba.similarity);
        prop_assert_eq!(&ab.scores, &ba.scores);
        prop_assert!((0.0..=1.0).contains(&ab.similarity));
        prop_assert_eq!(scorer.score(&a, &b).unwrap(), ab.scores);
    }
}
