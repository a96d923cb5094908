use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A comparable property. Each metric scores exactly one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Label,
    Type,
    Geo,
    Artist,
    Album,
    Year,
    Length,
    Language,
    Number,
}

/// Per-property similarity scores of one compared pair.
///
/// A property missing from the map is "absent": the metric could not compute
/// because the property is missing on at least one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyScores(BTreeMap<Property, f64>);

impl PropertyScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score; `None` leaves the property absent.
    pub fn set(&mut self, property: Property, score: Option<f64>) {
        if let Some(score) = score {
            self.0.insert(property, score);
        }
    }

    pub fn get(&self, property: Property) -> Option<f64> {
        self.0.get(&property).copied()
    }

    pub fn is_present(&self, property: Property) -> bool {
        self.0.contains_key(&property)
    }

    /// Number of present scores.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.0.iter().map(|(p, s)| (*p, *s))
    }
}

impl FromIterator<(Property, f64)> for PropertyScores {
    fn from_iter<I: IntoIterator<Item = (Property, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A pair of clusters proposed for merging. Transient within one round.
///
/// `source` is always the smaller cluster id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePair {
    pub source: EntityId,
    pub target: EntityId,
    pub scores: PropertyScores,
    pub similarity: f64,
}

impl CandidatePair {
    /// An unscored pair, normalized so the smaller id is the source side.
    pub fn new(a: EntityId, b: EntityId) -> Self {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        Self {
            source,
            target,
            scores: PropertyScores::new(),
            similarity: 0.0,
        }
    }

    pub fn ids(&self) -> (EntityId, EntityId) {
        (self.source, self.target)
    }
}
