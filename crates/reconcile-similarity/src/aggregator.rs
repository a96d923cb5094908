//! Folds per-property scores into one similarity value.

use reconcile_core::config::{AggregationMode, SimilarityConfig};
use reconcile_core::constants::round_similarity;
use reconcile_core::model::{Domain, Property, PropertyScores};

/// Combines present metric scores into a single scalar.
///
/// Shared by the merge engine and SimSort so both use the same aggregation.
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: SimilarityConfig,
}

impl Aggregator {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    pub fn mode(&self) -> AggregationMode {
        self.config.aggregation
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Aggregate with the configured mode.
    pub fn aggregate(&self, domain: Domain, scores: &PropertyScores) -> f64 {
        match self.config.aggregation {
            AggregationMode::Mean => self.mean(scores),
            AggregationMode::Weighted => self.weighted(domain, scores),
        }
    }

    /// Arithmetic mean over present scores. No present score yields 0.
    ///
    /// When the label is the only present score and falls below the configured
    /// label priority threshold, the result is 0.
    pub fn mean(&self, scores: &PropertyScores) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        if let (Some(threshold), Some(label)) = (
            self.config.min_label_priority_similarity,
            scores.get(Property::Label),
        ) {
            if scores.len() == 1 && label < threshold {
                return 0.0;
            }
        }
        let sum: f64 = scores.iter().map(|(_, s)| s).sum();
        round_similarity(sum / scores.len() as f64)
    }

    /// Weighted sum over the full weight basis of `domain`. Absent properties
    /// contribute 0 but their weight still counts.
    pub fn weighted(&self, domain: Domain, scores: &PropertyScores) -> f64 {
        let weights = self.config.weights(domain);
        let basis: f64 = weights.iter().map(|(_, w)| w).sum();
        if basis <= 0.0 {
            return 0.0;
        }
        let total: f64 = weights
            .iter()
            .map(|(property, weight)| scores.get(*property).unwrap_or(0.0) * weight)
            .sum();
        round_similarity(total / basis)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}
