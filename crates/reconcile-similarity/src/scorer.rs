//! Domain-dispatching [`PairScorer`] built from the metrics.

use reconcile_core::config::SimilarityConfig;
use reconcile_core::errors::SimilarityError;
use reconcile_core::model::{
    Attributes, CandidatePair, GeoAttributes, MusicAttributes, Property, PropertyScores,
};
use reconcile_core::traits::{Clustered, PairScorer};

use crate::aggregator::Aggregator;
use crate::metrics::{self, compare_labels, compare_optional};

/// Scores pairs of same-domain entities with every applicable metric.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    aggregator: Aggregator,
}

impl SimilarityScorer {
    pub fn new(config: SimilarityConfig) -> Self {
        Self {
            aggregator: Aggregator::new(config),
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Score both sides and aggregate into a normalized [`CandidatePair`].
    pub fn score_pair(
        &self,
        a: &dyn Clustered,
        b: &dyn Clustered,
    ) -> Result<CandidatePair, SimilarityError> {
        let scores = self.score(a, b)?;
        let mut pair = CandidatePair::new(a.id(), b.id());
        pair.similarity = self.aggregator.aggregate(a.attributes().domain(), &scores);
        pair.scores = scores;
        Ok(pair)
    }

    fn score_geo(
        &self,
        a: (&dyn Clustered, &GeoAttributes),
        b: (&dyn Clustered, &GeoAttributes),
    ) -> Result<PropertyScores, SimilarityError> {
        let config = self.aggregator.config();
        let mut scores = PropertyScores::new();
        scores.set(
            Property::Label,
            compare_labels(a.0.label(), b.0.label(), config.string_metric),
        );
        scores.set(Property::Type, metrics::type_overlap(a.1.types, b.1.types));
        scores.set(
            Property::Geo,
            metrics::geo_similarity(
                (a.0.id(), a.1.point),
                (b.0.id(), b.1.point),
                config.max_geo_distance_m,
            )?,
        );
        Ok(scores)
    }

    fn score_music(
        &self,
        a: (&dyn Clustered, &MusicAttributes),
        b: (&dyn Clustered, &MusicAttributes),
    ) -> PropertyScores {
        let metric = self.aggregator.config().string_metric;
        let (ma, mb) = (a.1, b.1);
        let mut scores = PropertyScores::new();
        scores.set(Property::Label, compare_labels(a.0.label(), b.0.label(), metric));
        scores.set(
            Property::Artist,
            compare_optional(ma.artist.as_deref(), mb.artist.as_deref(), metric),
        );
        scores.set(
            Property::Album,
            compare_optional(ma.album.as_deref(), mb.album.as_deref(), metric),
        );
        scores.set(
            Property::Language,
            compare_optional(ma.language.as_deref(), mb.language.as_deref(), metric),
        );
        scores.set(Property::Year, metrics::year_similarity(ma.year, mb.year));
        scores.set(
            Property::Length,
            metrics::length_similarity(ma.length_ms, mb.length_ms),
        );
        scores.set(
            Property::Number,
            metrics::number_similarity(ma.number.as_deref(), mb.number.as_deref()),
        );
        scores
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

impl PairScorer for SimilarityScorer {
    fn score(
        &self,
        a: &dyn Clustered,
        b: &dyn Clustered,
    ) -> Result<PropertyScores, SimilarityError> {
        match (a.attributes(), b.attributes()) {
            (Attributes::Geography(ga), Attributes::Geography(gb)) => {
                self.score_geo((a, ga), (b, gb))
            }
            (Attributes::Music(ma), Attributes::Music(mb)) => Ok(self.score_music((a, ma), (b, mb))),
            _ => Err(SimilarityError::DomainMismatch {
                source_id: a.id().min(b.id()),
                target_id: a.id().max(b.id()),
            }),
        }
    }

    fn name(&self) -> &str {
        "similarity"
    }
}
