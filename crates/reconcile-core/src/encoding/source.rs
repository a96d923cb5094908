use serde::{Deserialize, Serialize};

use super::Tag;
use crate::model::Domain;

/// Originating dataset of an entity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceTag {
    #[serde(rename = "dbpedia")]
    DBpedia,
    #[serde(rename = "geonames")]
    GeoNames,
    #[serde(rename = "linkedgeodata")]
    LinkedGeoData,
    #[serde(rename = "freebase")]
    Freebase,
    #[serde(rename = "nytimes")]
    NyTimes,
    #[serde(rename = "musicbrainz-1")]
    MusicBrainz1,
    #[serde(rename = "musicbrainz-2")]
    MusicBrainz2,
    #[serde(rename = "musicbrainz-3")]
    MusicBrainz3,
    #[serde(rename = "musicbrainz-4")]
    MusicBrainz4,
    #[serde(rename = "musicbrainz-5")]
    MusicBrainz5,
}

/// Namespace prefixes of the geographic datasets.
const NAMESPACES: &[(&str, SourceTag)] = &[
    ("http://dbpedia.org/", SourceTag::DBpedia),
    ("http://sws.geonames.org/", SourceTag::GeoNames),
    ("http://linkedgeodata.org/", SourceTag::LinkedGeoData),
    ("http://rdf.freebase.com/", SourceTag::Freebase),
    ("http://data.nytimes.com/", SourceTag::NyTimes),
];

impl SourceTag {
    /// The data domain this dataset belongs to.
    pub fn domain(self) -> Domain {
        match self {
            Self::DBpedia | Self::GeoNames | Self::LinkedGeoData | Self::Freebase | Self::NyTimes => {
                Domain::Geography
            }
            _ => Domain::Music,
        }
    }

    /// Parse a canonical tag name (`"geonames"`, `"musicbrainz-3"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.name().eq_ignore_ascii_case(name))
    }

    /// Resolve the dataset from a resource URI or namespace prefix.
    pub fn from_namespace(uri: &str) -> Option<Self> {
        NAMESPACES
            .iter()
            .find(|(prefix, _)| uri.starts_with(prefix))
            .map(|(_, tag)| *tag)
    }
}

impl Tag for SourceTag {
    const ALL: &'static [Self] = &[
        Self::DBpedia,
        Self::GeoNames,
        Self::LinkedGeoData,
        Self::Freebase,
        Self::NyTimes,
        Self::MusicBrainz1,
        Self::MusicBrainz2,
        Self::MusicBrainz3,
        Self::MusicBrainz4,
        Self::MusicBrainz5,
    ];

    fn index(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        match self {
            Self::DBpedia => "dbpedia",
            Self::GeoNames => "geonames",
            Self::LinkedGeoData => "linkedgeodata",
            Self::Freebase => "freebase",
            Self::NyTimes => "nytimes",
            Self::MusicBrainz1 => "musicbrainz-1",
            Self::MusicBrainz2 => "musicbrainz-2",
            Self::MusicBrainz3 => "musicbrainz-3",
            Self::MusicBrainz4 => "musicbrainz-4",
            Self::MusicBrainz5 => "musicbrainz-5",
        }
    }
}
