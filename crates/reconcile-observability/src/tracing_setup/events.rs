//! Structured log events for key merge operations.
//!
//! Each function emits a `tracing` event with structured fields.

use reconcile_core::model::RoundStats;

/// Log the completion of one merge round.
pub fn round_completed(stats: &RoundStats) {
    tracing::info!(
        event = "round_completed",
        round = stats.round,
        working_set_size = stats.working_set_size,
        candidates = stats.candidates,
        scored = stats.scored,
        above_threshold = stats.above_threshold,
        conflicts_dropped = stats.conflicts_dropped,
        merges = stats.merges,
        failures = stats.failures,
        "merge round completed"
    );
}

/// Log a pair whose similarity computation failed.
pub fn pair_failed(source: u64, target: u64, reason: &str) {
    tracing::warn!(
        event = "pair_failed",
        source = source,
        target = target,
        reason = %reason,
        "similarity computation failed, pair dropped"
    );
}

/// Log a pair excluded by conflict resolution. Informational.
pub fn conflict_dropped(source: u64, target: u64, similarity: f64) {
    tracing::debug!(
        event = "conflict_dropped",
        source = source,
        target = target,
        similarity = similarity,
        "conflicting pair dropped for this round"
    );
}

/// Log the end of a merge run.
pub fn merge_finished(rounds: usize, clusters: usize, fixpoint: bool) {
    if fixpoint {
        tracing::info!(
            event = "fixpoint_reached",
            rounds = rounds,
            clusters = clusters,
            "merge reached fixpoint"
        );
    } else {
        tracing::warn!(
            event = "round_cap_reached",
            rounds = rounds,
            clusters = clusters,
            "merge stopped at round cap before fixpoint"
        );
    }
}

/// Log the end of a SimSort propagation.
pub fn simsort_finished(iterations: usize, excluded: usize, converged: bool) {
    tracing::info!(
        event = "simsort_finished",
        iterations = iterations,
        excluded = excluded,
        converged = converged,
        "simsort propagation finished"
    );
}
