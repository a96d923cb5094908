//! Immutable run configuration, injected into every component at construction.

mod blocking_config;
pub mod defaults;
mod merge_config;
mod similarity_config;
mod simsort_config;

pub use blocking_config::{BlockingConfig, BlockingStrategy};
pub use merge_config::MergeConfig;
pub use similarity_config::{AggregationMode, GeoWeights, MusicWeights, SimilarityConfig, StringMetric};
pub use simsort_config::SimSortConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, PreconditionError, ReconcileResult};
use crate::model::Domain;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub merge: MergeConfig,
    pub similarity: SimilarityConfig,
    pub blocking: BlockingConfig,
    pub simsort: SimSortConfig,
}

impl ReconcileConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> ReconcileResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> ReconcileResult<String> {
        toml::to_string(self).map_err(|e| {
            ConfigError::SerializeError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Check every value the engine relies on.
    pub fn validate(&self) -> Result<(), PreconditionError> {
        check_unit("merge.min_merge_similarity", self.merge.min_merge_similarity)?;
        check_unit(
            "simsort.min_simsort_similarity",
            self.simsort.min_simsort_similarity,
        )?;
        if let Some(value) = self.similarity.min_label_priority_similarity {
            check_unit("similarity.min_label_priority_similarity", value)?;
        }

        if self.merge.max_cluster_size == 0 {
            return Err(PreconditionError::InvalidLimit {
                name: "merge.max_cluster_size".to_string(),
                value: 0.0,
            });
        }
        if self.merge.max_rounds == 0 {
            return Err(PreconditionError::InvalidLimit {
                name: "merge.max_rounds".to_string(),
                value: 0.0,
            });
        }
        if self.simsort.max_iterations == 0 {
            return Err(PreconditionError::InvalidLimit {
                name: "simsort.max_iterations".to_string(),
                value: 0.0,
            });
        }
        let distance = self.similarity.max_geo_distance_m;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(PreconditionError::InvalidLimit {
                name: "similarity.max_geo_distance_m".to_string(),
                value: distance,
            });
        }

        for domain in [Domain::Geography, Domain::Music] {
            let weights = self.similarity.weights(domain);
            if let Some((property, weight)) = weights
                .iter()
                .find(|(_, w)| !w.is_finite() || *w < 0.0)
            {
                return Err(PreconditionError::InvalidWeights {
                    reason: format!("{property:?} weight {weight} for {domain:?}"),
                });
            }
            let total: f64 = weights.iter().map(|(_, w)| w).sum();
            if total <= 0.0 {
                return Err(PreconditionError::InvalidWeights {
                    reason: format!("{domain:?} weights sum to {total}"),
                });
            }
        }

        match self.blocking.strategy {
            BlockingStrategy::StandardPrefix { length } | BlockingStrategy::MusicPrefix { length }
                if length == 0 =>
            {
                Err(PreconditionError::InvalidLimit {
                    name: "blocking.strategy.length".to_string(),
                    value: 0.0,
                })
            }
            BlockingStrategy::IdfTokens { top: 0 } => Err(PreconditionError::InvalidLimit {
                name: "blocking.strategy.top".to_string(),
                value: 0.0,
            }),
            _ => Ok(()),
        }
    }
}

fn check_unit(name: &str, value: f64) -> Result<(), PreconditionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PreconditionError::InvalidThreshold {
            name: name.to_string(),
            value,
        })
    }
}
