//! # reconcile-blocking
//!
//! Derives blocking keys for clusters and pairs clusters that share a key,
//! subject to source disjointness, the cluster size cap, and optional type and
//! incremental-source restrictions.

pub mod generator;
pub mod idf;
pub mod keys;

pub use generator::{generate_candidates, CandidateGenerator, PairRules};
pub use idf::IdfTable;
pub use keys::{Blocker, KeyFunction};
