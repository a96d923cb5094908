//! Per-property comparators.
//!
//! Every metric returns `Some(score)` with `score` in [0, 1], rounded to the
//! similarity scale, or `None` when the property is missing on either side.

pub mod geo;
pub mod music;
pub mod string;
pub mod types;

pub use geo::{geo_similarity, haversine_m};
pub use music::{length_similarity, number_similarity, year_similarity};
pub use string::{
    compare_labels, compare_optional, jaro_winkler_similarity, normalize_label, trigram_similarity,
};
pub use types::type_overlap;
