use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Attributes, EntityId, EntityRecord};
use crate::encoding::{SourceSet, TypeSet};

/// A cluster of records believed to describe the same real-world entity.
///
/// Never mutated in place by the merge engine: each merge yields a new cluster that
/// supersedes its two inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEntity {
    pub id: EntityId,
    pub label: String,
    #[serde(flatten)]
    pub attributes: Attributes,
    pub sources: SourceSet,
    pub members: BTreeSet<EntityId>,
    #[serde(default)]
    pub blocking_key: String,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Component the members were grouped under before purification.
    #[serde(default)]
    pub origin_component: Option<u64>,
}

fn default_active() -> bool {
    true
}

impl ClusterEntity {
    /// Project a single record into a singleton cluster carrying the record's id.
    pub fn from_record(record: &EntityRecord) -> Self {
        Self {
            id: record.id,
            label: record.label.clone(),
            attributes: record.attributes.clone(),
            sources: SourceSet::of(record.source),
            members: BTreeSet::from([record.id]),
            blocking_key: String::new(),
            active: true,
            origin_component: record.component,
        }
    }

    /// Number of distinct sources, the size measure the cap applies to.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn types(&self) -> TypeSet {
        self.attributes.types()
    }

    /// Whether this cluster has reached the maximum number of sources.
    pub fn is_full(&self, max_cluster_size: usize) -> bool {
        self.source_count() >= max_cluster_size
    }
}
