//! Source and type tag encoding.
//!
//! Provenance (which datasets contributed to an entity) and type tags are stored as
//! bitsets over a fixed, closed tag universe. All operations are pure and total.

mod entity_type;
mod source;
mod tag_set;

pub use entity_type::EntityType;
pub use source::SourceTag;
pub use tag_set::{Tag, TagSet};

/// Bitset of originating datasets.
pub type SourceSet = TagSet<SourceTag>;

/// Bitset of entity types.
pub type TypeSet = TagSet<EntityType>;
