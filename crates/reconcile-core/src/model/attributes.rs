use serde::{Deserialize, Serialize};

use crate::encoding::TypeSet;

/// Data domain of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Geography,
    Music,
}

/// WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Arithmetic mean of two points.
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }
}

/// Geographic properties of a place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoAttributes {
    #[serde(default)]
    pub point: Option<GeoPoint>,
    #[serde(default)]
    pub types: TypeSet,
}

/// Properties of a music track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicAttributes {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,
    /// Track length in milliseconds.
    pub length_ms: Option<u32>,
    pub language: Option<String>,
    /// Track number as printed on the release (may contain letters, e.g. "A2").
    pub number: Option<String>,
}

/// Domain-specific payload of an entity or cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum Attributes {
    Geography(GeoAttributes),
    Music(MusicAttributes),
}

impl Attributes {
    pub fn domain(&self) -> Domain {
        match self {
            Self::Geography(_) => Domain::Geography,
            Self::Music(_) => Domain::Music,
        }
    }

    pub fn types(&self) -> TypeSet {
        match self {
            Self::Geography(geo) => geo.types,
            Self::Music(_) => TypeSet::empty(),
        }
    }

    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            Self::Geography(geo) => geo.point,
            Self::Music(_) => None,
        }
    }

    pub fn as_music(&self) -> Option<&MusicAttributes> {
        match self {
            Self::Music(music) => Some(music),
            Self::Geography(_) => None,
        }
    }
}
