use serde::{Deserialize, Serialize};

use super::defaults;
use crate::model::{Domain, Property};

/// How per-property scores are combined into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Mean over present scores; absent properties are ignored.
    Mean,
    /// Fixed weights; absent properties count as zero but stay in the weight basis.
    Weighted,
}

/// String comparison used for label-like properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringMetric {
    Trigram,
    JaroWinkler,
}

/// Weights for geographic entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoWeights {
    pub label: f64,
    #[serde(rename = "type")]
    pub types: f64,
    pub geo: f64,
}

impl Default for GeoWeights {
    fn default() -> Self {
        Self {
            label: defaults::DEFAULT_GEO_WEIGHT_LABEL,
            types: defaults::DEFAULT_GEO_WEIGHT_TYPE,
            geo: defaults::DEFAULT_GEO_WEIGHT_GEO,
        }
    }
}

/// Weights for music entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicWeights {
    pub label: f64,
    pub artist: f64,
    pub album: f64,
    pub year: f64,
    pub length: f64,
    pub language: f64,
    pub number: f64,
}

impl Default for MusicWeights {
    fn default() -> Self {
        Self {
            label: defaults::DEFAULT_MUSIC_WEIGHT_LABEL,
            artist: defaults::DEFAULT_MUSIC_WEIGHT_ARTIST,
            album: defaults::DEFAULT_MUSIC_WEIGHT_ALBUM,
            year: defaults::DEFAULT_MUSIC_WEIGHT_YEAR,
            length: defaults::DEFAULT_MUSIC_WEIGHT_LENGTH,
            language: defaults::DEFAULT_MUSIC_WEIGHT_LANGUAGE,
            number: defaults::DEFAULT_MUSIC_WEIGHT_NUMBER,
        }
    }
}

/// Similarity metric and aggregation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub aggregation: AggregationMode,
    pub string_metric: StringMetric,
    /// Distance in meters at and beyond which geo similarity is 0.
    pub max_geo_distance_m: f64,
    /// In mean mode, a label-only comparison below this value aggregates to 0.
    pub min_label_priority_similarity: Option<f64>,
    pub geo_weights: GeoWeights,
    pub music_weights: MusicWeights,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationMode::Mean,
            string_metric: StringMetric::Trigram,
            max_geo_distance_m: defaults::DEFAULT_MAX_GEO_DISTANCE_M,
            min_label_priority_similarity: defaults::DEFAULT_MIN_LABEL_PRIORITY_SIMILARITY,
            geo_weights: GeoWeights::default(),
            music_weights: MusicWeights::default(),
        }
    }
}

impl SimilarityConfig {
    /// Weight of `property` for entities of `domain`. Properties foreign to the
    /// domain weigh 0.
    pub fn weight(&self, domain: Domain, property: Property) -> f64 {
        match domain {
            Domain::Geography => {
                let w = &self.geo_weights;
                match property {
                    Property::Label => w.label,
                    Property::Type => w.types,
                    Property::Geo => w.geo,
                    _ => 0.0,
                }
            }
            Domain::Music => {
                let w = &self.music_weights;
                match property {
                    Property::Label => w.label,
                    Property::Artist => w.artist,
                    Property::Album => w.album,
                    Property::Year => w.year,
                    Property::Length => w.length,
                    Property::Language => w.language,
                    Property::Number => w.number,
                    _ => 0.0,
                }
            }
        }
    }

    /// All weights of one domain.
    pub fn weights(&self, domain: Domain) -> Vec<(Property, f64)> {
        let properties: &[Property] = match domain {
            Domain::Geography => &[Property::Label, Property::Type, Property::Geo],
            Domain::Music => &[
                Property::Label,
                Property::Artist,
                Property::Album,
                Property::Year,
                Property::Length,
                Property::Language,
                Property::Number,
            ],
        };
        properties
            .iter()
            .map(|p| (*p, self.weight(domain, *p)))
            .collect()
    }
}
