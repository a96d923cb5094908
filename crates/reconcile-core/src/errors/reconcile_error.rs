use super::{ConfigError, PreconditionError, SimilarityError};

/// Top-level error for the reconcile workspace.
///
/// Only precondition violations abort a run. Similarity failures are local to one
/// pair and are normally reported and dropped; they surface here when a caller
/// scores a single pair directly.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("precondition violated: {0}")]
    PreconditionError(#[from] PreconditionError),

    #[error("similarity error: {0}")]
    SimilarityError(#[from] SimilarityError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("merge cancelled after round {round}")]
    Cancelled { round: usize },

    #[error("merge already in progress")]
    AlreadyRunning,
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;
