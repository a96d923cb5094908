//! Merging two accepted clusters into their replacement.

use reconcile_core::errors::PreconditionError;
use reconcile_core::model::ClusterEntity;

use crate::representative::{combine, PointRule};

/// Merge two clusters into a new cluster that supersedes both.
///
/// The geo point is the mean of the present points; the label is the majority
/// label weighted by member count, ties preferring the longer string. Source
/// sets, type sets and member ids are unioned. The result takes the smaller id.
pub fn merge_clusters(
    a: &ClusterEntity,
    b: &ClusterEntity,
) -> Result<ClusterEntity, PreconditionError> {
    let key = format!("{}+{}", a.id, b.id);
    combine(&key, &[a, b], PointRule::Average)
}
