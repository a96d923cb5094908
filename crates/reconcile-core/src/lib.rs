//! # reconcile-core
//!
//! Foundation crate for the reconcile entity-clustering engine.
//! Defines source/type tag encoding, the entity and cluster model, shared traits,
//! errors, configuration, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod encoding;
pub mod errors;
pub mod model;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ReconcileConfig;
pub use encoding::{EntityType, SourceSet, SourceTag, Tag, TagSet, TypeSet};
pub use errors::{ReconcileError, ReconcileResult};
pub use model::{
    Attributes, CandidatePair, ClusterEntity, Domain, EntityId, EntityRecord, GeoAttributes,
    GeoPoint, MusicAttributes, Property, PropertyScores, RoundStats, SizeDistribution,
};
pub use traits::{Clustered, PairScorer};
