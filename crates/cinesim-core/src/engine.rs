//! # Engine
//!
//! Transport-agnostic entry point: owns the dataset cache and the
//! recommender so a CLI, GUI or service only deals with titles.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::dataset::{Dataset, DatasetCache};
use crate::error::Result;
use crate::recommend::{Recommendation, Recommender};

/// Recommendation engine bound to one dataset source.
#[derive(Debug)]
pub struct Engine {
    cache: DatasetCache,
    recommender: Recommender,
}

impl Engine {
    /// Creates an engine. The dataset is not read until first use.
    ///
    /// # Errors
    ///
    /// Returns `CinesimError::InvalidWeights` if the configured weights are
    /// invalid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let recommender =
            Recommender::new(config.weights)?.with_similarity_matrix(config.use_similarity_matrix);
        Ok(Self {
            cache: DatasetCache::new(config.data_path),
            recommender,
        })
    }

    /// Returns the cached dataset, loading it on first call.
    ///
    /// # Errors
    ///
    /// Returns `CinesimError::DataLoad` if the source cannot be read.
    pub fn get_dataset(&self) -> Result<Arc<Dataset>> {
        self.cache.get_dataset()
    }

    /// Up to `top_n` titles similar to `title`, best first.
    ///
    /// # Errors
    ///
    /// Fails if the dataset cannot be loaded or is not uniformly shaped.
    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<String>> {
        let dataset = self.get_dataset()?;
        self.recommender.recommend(&dataset, title, top_n)
    }

    /// Like [`recommend`](Self::recommend) with the score breakdown.
    ///
    /// # Errors
    ///
    /// See [`recommend`](Self::recommend).
    pub fn recommend_scored(&self, title: &str, top_n: usize) -> Result<Vec<Recommendation>> {
        let dataset = self.get_dataset()?;
        self.recommender.recommend_scored(&dataset, title, top_n)
    }

    /// Forgets the loaded dataset; the next query reloads the source.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    #[must_use]
    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    #[must_use]
    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }
}
