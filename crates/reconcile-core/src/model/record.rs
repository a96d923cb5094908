use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Attributes, EntityId};
use crate::encoding::SourceTag;

/// A single ingested record from one source dataset. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub source: SourceTag,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub attributes: Attributes,
    /// Coarse component id assigned by the external connected-components stage.
    #[serde(default)]
    pub component: Option<u64>,
    /// Genuinely dynamic extra attributes carried through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl EntityRecord {
    pub fn new(id: EntityId, source: SourceTag, label: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id,
            source,
            label: label.into(),
            attributes,
            component: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, component: u64) -> Self {
        self.component = Some(component);
        self
    }
}
