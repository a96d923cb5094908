/// reconcile system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal places every metric score and aggregate is rounded to.
pub const SIMILARITY_SCALE: i32 = 10;

/// Mean earth radius in meters, used for haversine distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Prefix of blocking keys assigned to entities without a usable label.
/// Such keys are unique per entity, so the entity is never compared.
pub const UNBLOCKED_KEY_PREFIX: &str = "#unblocked:";

/// Round a similarity value to [`SIMILARITY_SCALE`] decimal places (half away from zero).
pub fn round_similarity(value: f64) -> f64 {
    let factor = 10f64.powi(SIMILARITY_SCALE);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_ten_places() {
        assert_eq!(round_similarity(0.123_456_789_012_3), 0.123_456_789_0);
        assert_eq!(round_similarity(1.0), 1.0);
        assert_eq!(round_similarity(0.0), 0.0);
    }

    #[test]
    fn rounding_removes_float_noise() {
        let noisy = 0.1 + 0.2;
        assert_eq!(round_similarity(noisy), 0.3);
    }
}
