/// A similarity computation that failed for one pair. Local to that pair.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimilarityError {
    #[error("non-finite coordinate on entity {id}")]
    NonFiniteCoordinate { id: u64 },

    #[error("entities {source_id} and {target_id} belong to different domains")]
    DomainMismatch { source_id: u64, target_id: u64 },
}
