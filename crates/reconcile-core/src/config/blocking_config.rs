use serde::{Deserialize, Serialize};

use super::defaults;
use crate::encoding::SourceTag;

/// How the blocking key of an entity is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockingStrategy {
    /// First `length` characters of the normalized label.
    StandardPrefix { length: usize },
    /// Like `StandardPrefix`, after stripping leading track numbers and noise.
    MusicPrefix { length: usize },
    /// The `top` label tokens with the highest inverse document frequency.
    IdfTokens { top: usize },
    /// One block holding every entity.
    Single,
}

impl Default for BlockingStrategy {
    fn default() -> Self {
        Self::StandardPrefix {
            length: defaults::DEFAULT_PREFIX_LENGTH,
        }
    }
}

/// Candidate generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockingConfig {
    pub strategy: BlockingStrategy,
    /// Reject pairs whose sides both carry types but share none.
    pub require_type_overlap: bool,
    /// Incremental mode: only pair clusters with a singleton from this source.
    pub new_source: Option<SourceTag>,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            strategy: BlockingStrategy::default(),
            require_type_overlap: defaults::DEFAULT_REQUIRE_TYPE_OVERLAP,
            new_source: None,
        }
    }
}
