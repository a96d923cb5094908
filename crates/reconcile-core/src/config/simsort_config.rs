use serde::{Deserialize, Serialize};

use super::defaults;

/// SimSort purification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSortConfig {
    pub enabled: bool,
    /// Vertices whose aggregated similarity stays below this leave their component.
    pub min_simsort_similarity: f64,
    /// Superstep cap. Reaching it terminates the propagation without error.
    pub max_iterations: usize,
}

impl Default for SimSortConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_SIMSORT_ENABLED,
            min_simsort_similarity: defaults::DEFAULT_MIN_SIMSORT_SIMILARITY,
            max_iterations: defaults::DEFAULT_SIMSORT_MAX_ITERATIONS,
        }
    }
}
