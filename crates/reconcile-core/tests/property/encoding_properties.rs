//! Property tests for tag-set encoding.

use proptest::prelude::*;

use reconcile_core::{SourceSet, SourceTag, Tag};

fn source_set() -> impl Strategy<Value = SourceSet> {
    any::<u32>().prop_map(SourceSet::from_bits)
}

proptest! {
    #[test]
    fn prop_union_is_commutative(a in source_set(), b in source_set()) {
        prop_assert_eq!(a.union(b), b.union(a));
    }

    #[test]
    fn prop_overlap_is_symmetric(a in source_set(), b in source_set()) {
        prop_assert_eq!(a.overlaps(b), b.overlaps(a));
    }

    #[test]
    fn prop_disjoint_union_adds_popcounts(a in source_set(), b in source_set()) {
        if !a.overlaps(b) {
            prop_assert_eq!(a.union(b).len(), a.len() + b.len());
        } else {
            prop_assert!(a.union(b).len() < a.len() + b.len());
        }
    }

    #[test]
    fn prop_decode_matches_popcount(a in source_set()) {
        let decoded = a.decode();
        prop_assert_eq!(decoded.len(), a.len());
        for tag in SourceTag::ALL {
            prop_assert_eq!(decoded.contains(tag), a.contains(*tag));
        }
    }
}
