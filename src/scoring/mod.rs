pub mod algorithm;
pub mod weights;

pub use algorithm::ScoringAlgorithm;
pub use weights::{ComponentWeight, ScoringWeights};
