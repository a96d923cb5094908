//! Majority-vote aggregation of a group of entities into one cluster.

mod ballot;
mod builder;

pub(crate) use builder::{combine, PointRule};
pub use builder::{build_representative, build_representatives, component_key};
