pub mod matching;
pub mod similarity;

pub use matching::SpecialtyMatchService;
pub use similarity::{best_match, EditDistanceScorer, SimilarityScorer};
