pub mod similarity;
pub mod weights;

pub use similarity::{SimilarityMatrix, check_dimensions, cosine_similarity, jaccard_similarity};
pub use weights::{ScoreWeights, WEIGHT_GENRE, WEIGHT_SEMANTIC};
