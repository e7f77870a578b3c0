use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during Cinesim operations.
#[derive(Debug, Error)]
pub enum CinesimError {
    /// The dataset source is missing, unreadable or structurally broken.
    #[error("failed to load dataset from {path:?}: {reason}")]
    DataLoad {
        /// Where the dataset was read from.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// A single embedding field could not be decoded into a vector.
    #[error("malformed embedding: {0}")]
    EmbeddingParse(String),

    /// Embeddings in the dataset are not uniformly shaped.
    #[error("embedding at row {index} has dimension {found}, expected {expected}")]
    InvalidEmbeddingDimension {
        /// Row whose embedding disagrees with the query.
        index: usize,
        /// Dimension of the reference embedding.
        expected: usize,
        /// Dimension actually found.
        found: usize,
    },

    /// Score weights are negative, non-finite or do not sum to 1.0.
    #[error("invalid score weights: {0}")]
    InvalidWeights(String),
}

impl CinesimError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for Cinesim operations.
pub type Result<T> = std::result::Result<T, CinesimError>;
