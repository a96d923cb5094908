//! Span definitions per operation: merge run, merge round, SimSort, representative building.

/// Create a span covering one full merge run.
#[macro_export]
macro_rules! merge_span {
    ($working_set_size:expr) => {
        tracing::info_span!("reconcile.merge", working_set_size = $working_set_size)
    };
}

/// Create a span covering one merge round.
#[macro_export]
macro_rules! round_span {
    ($round:expr) => {
        tracing::debug_span!("reconcile.merge.round", round = $round)
    };
}

/// Create a SimSort span.
#[macro_export]
macro_rules! simsort_span {
    ($vertex_count:expr) => {
        tracing::info_span!("reconcile.simsort", vertex_count = $vertex_count)
    };
}

/// Create a representative-building span.
#[macro_export]
macro_rules! representative_span {
    ($group_count:expr) => {
        tracing::info_span!("reconcile.representatives", group_count = $group_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const MERGE: &str = "reconcile.merge";
    pub const ROUND: &str = "reconcile.merge.round";
    pub const SIMSORT: &str = "reconcile.simsort";
    pub const REPRESENTATIVES: &str = "reconcile.representatives";
}
