/// Violated preconditions. Fatal: the run is aborted.
#[derive(Debug, thiserror::Error)]
pub enum PreconditionError {
    #[error("cannot build a representative from an empty group (key {key})")]
    EmptyGroup { key: String },

    #[error("threshold {name} = {value} outside [0, 1]")]
    InvalidThreshold { name: String, value: f64 },

    #[error("invalid {name}: {value}")]
    InvalidLimit { name: String, value: f64 },

    #[error("invalid similarity weights: {reason}")]
    InvalidWeights { reason: String },

    #[error("cluster {id} not found in working set")]
    UnknownCluster { id: u64 },

    #[error("duplicate cluster id {id} in working set")]
    DuplicateCluster { id: u64 },

    #[error("mixed data domains in one group: {reason}")]
    MixedDomains { reason: String },
}
