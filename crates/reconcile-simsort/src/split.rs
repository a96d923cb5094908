use std::collections::BTreeMap;

use reconcile_core::model::EntityId;

use crate::propagation::SimSortOutcome;

/// Component key for a vertex excluded from `component`.
///
/// Derived from both values so that separate runs over the same input give
/// the same keys.
pub fn split_key(component: u64, id: EntityId) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&component.to_le_bytes());
    hasher.update(&id.to_le_bytes());
    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Map every vertex id to the component it belongs to after purification.
///
/// Active vertices keep their component; every excluded vertex becomes a
/// component of its own.
pub fn split_components(outcome: &SimSortOutcome) -> BTreeMap<EntityId, u64> {
    outcome
        .vertices
        .iter()
        .map(|v| {
            let key = if v.active { v.component } else { split_key(v.component, v.id) };
            (v.id, key)
        })
        .collect()
}
