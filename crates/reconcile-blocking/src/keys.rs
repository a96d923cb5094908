//! Blocking key derivation.

use std::sync::LazyLock;

use regex::Regex;
use reconcile_core::config::BlockingStrategy;
use reconcile_core::constants::UNBLOCKED_KEY_PREFIX;
use reconcile_core::model::ClusterEntity;
use reconcile_similarity::metrics::normalize_label;

use crate::idf::IdfTable;

/// Key shared by every entity under [`BlockingStrategy::Single`].
pub const SINGLE_BLOCK_KEY: &str = "*";

/// Leading track numbers such as "01 - ", "A2. " or "3) ".
static TRACK_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[a-zA-Z]?\d{1,3})\s*[-.:)_]\s*").ok());

/// Bracketed remarks such as "(live)" or "[remastered 2009]".
static BRACKETED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[(\[][^)\]]*[)\]]").ok());

/// Maps an entity to its blocking key. Entities with equal keys are compared.
pub trait KeyFunction: Send + Sync {
    /// `None` when the entity has no usable label.
    fn key(&self, entity: &ClusterEntity) -> Option<String>;

    /// Key that never collides: entities without a usable label get a per-id key.
    fn key_or_unblocked(&self, entity: &ClusterEntity) -> String {
        self.key(entity)
            .unwrap_or_else(|| format!("{UNBLOCKED_KEY_PREFIX}{}", entity.id))
    }
}

/// [`KeyFunction`] for a configured [`BlockingStrategy`].
#[derive(Debug, Clone)]
pub struct Blocker {
    strategy: BlockingStrategy,
    idf: Option<IdfTable>,
}

impl Blocker {
    /// Build a blocker. IDF blocking computes its table over `entities`.
    pub fn new(strategy: BlockingStrategy, entities: &[ClusterEntity]) -> Self {
        let idf = match strategy {
            BlockingStrategy::IdfTokens { .. } => {
                Some(IdfTable::build(entities.iter().map(|e| e.label.as_str())))
            }
            _ => None,
        };
        Self { strategy, idf }
    }

    pub fn strategy(&self) -> &BlockingStrategy {
        &self.strategy
    }
}

impl KeyFunction for Blocker {
    fn key(&self, entity: &ClusterEntity) -> Option<String> {
        label_key(&self.strategy, &entity.label, self.idf.as_ref())
    }
}

/// Blocking key of a raw label under `strategy`.
pub fn label_key(strategy: &BlockingStrategy, label: &str, idf: Option<&IdfTable>) -> Option<String> {
    let key = match strategy {
        BlockingStrategy::Single => return Some(SINGLE_BLOCK_KEY.to_string()),
        BlockingStrategy::StandardPrefix { length } => prefix(&normalize_label(label), *length),
        BlockingStrategy::MusicPrefix { length } => {
            prefix(&normalize_label(&strip_music_noise(label)), *length)
        }
        BlockingStrategy::IdfTokens { top } => {
            let normalized = normalize_label(label);
            match idf {
                Some(table) => table.top_tokens(&normalized, *top).join(" "),
                None => normalized,
            }
        }
    };
    (!key.is_empty()).then_some(key)
}

fn prefix(normalized: &str, length: usize) -> String {
    normalized.chars().take(length).collect()
}

/// Drop leading track numbers and bracketed remarks from a track title.
pub fn strip_music_noise(label: &str) -> String {
    let mut cleaned = label.to_string();
    if let Some(re) = TRACK_NUMBER.as_ref() {
        cleaned = re.replace(&cleaned, "").into_owned();
    }
    if let Some(re) = BRACKETED.as_ref() {
        cleaned = re.replace_all(&cleaned, " ").into_owned();
    }
    cleaned.trim().to_string()
}
