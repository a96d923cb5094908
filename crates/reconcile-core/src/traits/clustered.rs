use crate::encoding::{SourceSet, TypeSet};
use crate::model::{Attributes, ClusterEntity, EntityId, EntityRecord};

/// Shared view over raw records and clusters.
pub trait Clustered {
    fn id(&self) -> EntityId;

    fn label(&self) -> &str;

    fn sources(&self) -> SourceSet;

    fn attributes(&self) -> &Attributes;

    /// Ids of the original records this entity stands for.
    fn members(&self) -> Vec<EntityId>;

    fn types(&self) -> TypeSet {
        self.attributes().types()
    }

    /// Coarse grouping key this entity was assigned before refinement, if any.
    fn component(&self) -> Option<u64> {
        None
    }
}

impl Clustered for EntityRecord {
    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn sources(&self) -> SourceSet {
        SourceSet::of(self.source)
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn members(&self) -> Vec<EntityId> {
        vec![self.id]
    }

    fn component(&self) -> Option<u64> {
        self.component
    }
}

impl Clustered for ClusterEntity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn sources(&self) -> SourceSet {
        self.sources
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn members(&self) -> Vec<EntityId> {
        self.members.iter().copied().collect()
    }

    fn component(&self) -> Option<u64> {
        self.origin_component
    }
}

impl<T: Clustered + ?Sized> Clustered for &T {
    fn id(&self) -> EntityId {
        (**self).id()
    }

    fn label(&self) -> &str {
        (**self).label()
    }

    fn sources(&self) -> SourceSet {
        (**self).sources()
    }

    fn attributes(&self) -> &Attributes {
        (**self).attributes()
    }

    fn members(&self) -> Vec<EntityId> {
        (**self).members()
    }

    fn component(&self) -> Option<u64> {
        (**self).component()
    }
}
