use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scoring::ScoreWeights;

/// Default location of the embedded item table.
pub const DEFAULT_DATA_PATH: &str = "data/metadata_embeddings.csv";

/// Configuration for the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// CSV file holding the item table with embeddings.
    pub data_path: PathBuf,
    /// Blend of semantic and genre similarity.
    pub weights: ScoreWeights,
    /// Build the full similarity matrix once and reuse it across queries.
    pub use_similarity_matrix: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            weights: ScoreWeights::default(),
            use_similarity_matrix: false,
        }
    }
}

impl EngineConfig {
    /// Create a new engine configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dataset path.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Set the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Enable or disable the cached similarity matrix.
    pub fn with_similarity_matrix(mut self, enabled: bool) -> Self {
        self.use_similarity_matrix = enabled;
        self
    }
}
