mod config_error;
mod precondition_error;
mod reconcile_error;
mod similarity_error;

pub use config_error::ConfigError;
pub use precondition_error::PreconditionError;
pub use reconcile_error::{ReconcileError, ReconcileResult};
pub use similarity_error::SimilarityError;
