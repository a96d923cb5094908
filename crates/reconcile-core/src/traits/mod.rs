mod clustered;
mod scorer;

pub use clustered::Clustered;
pub use scorer::PairScorer;
