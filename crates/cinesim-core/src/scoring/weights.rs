use serde::{Deserialize, Serialize};

use crate::error::{CinesimError, Result};

/// Default weight of the embedding cosine similarity.
pub const WEIGHT_SEMANTIC: f32 = 0.8;
/// Default weight of the genre-set Jaccard overlap.
pub const WEIGHT_GENRE: f32 = 0.2;

/// Relative importance of semantic similarity and genre overlap in the
/// combined recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub semantic: f32,
    pub genre: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: WEIGHT_SEMANTIC,
            genre: WEIGHT_GENRE,
        }
    }
}

impl ScoreWeights {
    /// Creates a validated weight pair.
    ///
    /// # Errors
    ///
    /// Returns `CinesimError::InvalidWeights` if either weight is negative
    /// or non-finite, or if they do not sum to approximately 1.0.
    pub fn new(semantic: f32, genre: f32) -> Result<Self> {
        let weights = Self { semantic, genre };
        weights.validate()?;
        Ok(weights)
    }

    /// Returns `true` if both weights are finite, non-negative and sum to ~1.0.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, w) in [("semantic", self.semantic), ("genre", self.genre)] {
            if !w.is_finite() || w < 0.0 {
                return Err(CinesimError::InvalidWeights(format!(
                    "{name} weight must be a non-negative number, got {w}"
                )));
            }
        }
        let sum = self.semantic + self.genre;
        if (sum - 1.0).abs() >= 0.01 {
            return Err(CinesimError::InvalidWeights(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }

    /// Blends a cosine similarity and a genre overlap into one score.
    #[must_use]
    pub fn combine(&self, semantic: f32, genre: f32) -> f32 {
        self.semantic * semantic + self.genre * genre
    }
}
