// Single source of truth for all default values.

// --- Merge ---
pub const DEFAULT_MIN_MERGE_SIMILARITY: f64 = 0.7;
pub const DEFAULT_MAX_CLUSTER_SIZE: usize = 4;
pub const DEFAULT_MAX_ROUNDS: usize = 100;
pub const DEFAULT_REJOIN_SIMSORT_SPLITS: bool = true;

// --- Similarity ---
pub const DEFAULT_MAX_GEO_DISTANCE_M: f64 = 50_000.0;
pub const DEFAULT_MIN_LABEL_PRIORITY_SIMILARITY: Option<f64> = Some(0.7);

pub const DEFAULT_GEO_WEIGHT_LABEL: f64 = 0.45;
pub const DEFAULT_GEO_WEIGHT_TYPE: f64 = 0.25;
pub const DEFAULT_GEO_WEIGHT_GEO: f64 = 0.30;

pub const DEFAULT_MUSIC_WEIGHT_LABEL: f64 = 0.35;
pub const DEFAULT_MUSIC_WEIGHT_ARTIST: f64 = 0.25;
pub const DEFAULT_MUSIC_WEIGHT_ALBUM: f64 = 0.15;
pub const DEFAULT_MUSIC_WEIGHT_YEAR: f64 = 0.05;
pub const DEFAULT_MUSIC_WEIGHT_LENGTH: f64 = 0.15;
pub const DEFAULT_MUSIC_WEIGHT_LANGUAGE: f64 = 0.05;
pub const DEFAULT_MUSIC_WEIGHT_NUMBER: f64 = 0.0;

// --- Blocking ---
pub const DEFAULT_PREFIX_LENGTH: usize = 3;
pub const DEFAULT_IDF_TOKENS: usize = 2;
pub const DEFAULT_REQUIRE_TYPE_OVERLAP: bool = false;

// --- SimSort ---
pub const DEFAULT_SIMSORT_ENABLED: bool = false;
pub const DEFAULT_MIN_SIMSORT_SIMILARITY: f64 = 0.75;
pub const DEFAULT_SIMSORT_MAX_ITERATIONS: usize = 100;
