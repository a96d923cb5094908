use reconcile_core::constants::{round_similarity, EARTH_RADIUS_M};
use reconcile_core::errors::SimilarityError;
use reconcile_core::model::{EntityId, GeoPoint};

/// Great-circle distance in meters.
pub fn haversine_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Normalized geo similarity: `1 - distance / max_distance_m`, 0 at or beyond the
/// maximum distance. Absent when either point is missing.
///
/// A point with non-finite or out-of-range coordinates fails the comparison.
pub fn geo_similarity(
    a: (EntityId, Option<GeoPoint>),
    b: (EntityId, Option<GeoPoint>),
    max_distance_m: f64,
) -> Result<Option<f64>, SimilarityError> {
    let (Some(pa), Some(pb)) = (a.1, b.1) else {
        return Ok(None);
    };
    for (id, point) in [(a.0, pa), (b.0, pb)] {
        if !point.is_valid() {
            return Err(SimilarityError::NonFiniteCoordinate { id });
        }
    }

    let distance = haversine_m(&pa, &pb);
    if distance >= max_distance_m {
        return Ok(Some(0.0));
    }
    Ok(Some(round_similarity(1.0 - distance / max_distance_m)))
}
