use reconcile_core::encoding::TypeSet;

/// 1 when the type sets share a type, 0 when they don't, absent if either is empty.
pub fn type_overlap(a: TypeSet, b: TypeSet) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    Some(if a.overlaps(b) { 1.0 } else { 0.0 })
}
