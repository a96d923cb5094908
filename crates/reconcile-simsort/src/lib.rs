//! # reconcile-simsort
//!
//! Purifies coarse components before representatives are built. Every vertex
//! of a component is connected to every other, edges carry aggregated pair
//! similarity, and in each superstep the weakest vertex below the threshold
//! leaves its component.

pub mod graph;
pub mod prepare;
pub mod propagation;
pub mod split;

pub use graph::{SimilarityGraph, VertexState};
pub use prepare::prepare;
pub use propagation::{SimSort, SimSortOutcome};
pub use split::{split_components, split_key};
