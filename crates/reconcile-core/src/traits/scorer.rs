use crate::errors::SimilarityError;
use crate::model::PropertyScores;
use crate::traits::Clustered;

/// Computes per-property similarity scores for a compared pair.
///
/// Implementations must be symmetric: `score(a, b)` equals `score(b, a)`.
pub trait PairScorer: Send + Sync {
    fn score(
        &self,
        a: &dyn Clustered,
        b: &dyn Clustered,
    ) -> Result<PropertyScores, SimilarityError>;

    /// Human-readable scorer name.
    fn name(&self) -> &str;
}
