//! Entity, cluster, and candidate-pair model.

mod attributes;
mod candidate;
mod cluster;
mod metrics;
mod record;

pub use attributes::{Attributes, Domain, GeoAttributes, GeoPoint, MusicAttributes};
pub use candidate::{CandidatePair, Property, PropertyScores};
pub use cluster::ClusterEntity;
pub use metrics::{RoundStats, SizeDistribution};
pub use record::EntityRecord;

/// Identifier of an entity record or cluster.
pub type EntityId = u64;
