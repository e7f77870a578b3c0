//! # Dataset
//!
//! The parsed, immutable item table shared by every query, plus the
//! loader that builds it and the cache that keeps it for the process.

pub mod cache;
pub mod loader;

pub use cache::DatasetCache;
pub use loader::{LoadReport, load_dataset, read_dataset};

use once_cell::sync::OnceCell;

use crate::error::Result;
use crate::scoring::SimilarityMatrix;
use crate::types::Item;

/// Ordered, index-addressable table of items with decoded embeddings.
///
/// A `Dataset` is never mutated after construction. The pairwise
/// similarity matrix is computed on first request and kept alongside it.
#[derive(Debug, Default)]
pub struct Dataset {
    items: Vec<Item>,
    matrix: OnceCell<SimilarityMatrix>,
}

impl Dataset {
    /// Wraps in-memory items without validating embedding shapes.
    ///
    /// Datasets read through [`load_dataset`] are guaranteed uniform;
    /// hand-built ones are checked again at query time.
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            matrix: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Embedding dimensionality of the first item, or `None` when empty.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.items.first().map(|item| item.embedding.len())
    }

    /// Index of the first item whose case-folded title contains the
    /// case-folded query.
    #[must_use]
    pub fn find_title(&self, query: &str) -> Option<usize> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .position(|item| item.title.to_lowercase().contains(&needle))
    }

    /// Pairwise cosine similarities between all items, built at most once.
    ///
    /// # Errors
    ///
    /// Returns `CinesimError::InvalidEmbeddingDimension` if the items'
    /// embeddings are not uniformly shaped. A failed build is not cached.
    pub fn similarity_matrix(&self) -> Result<&SimilarityMatrix> {
        self.matrix.get_or_try_init(|| {
            let embeddings: Vec<&[f32]> = self
                .items
                .iter()
                .map(|item| item.embedding.as_slice())
                .collect();
            tracing::debug!(items = embeddings.len(), "building similarity matrix");
            SimilarityMatrix::build(&embeddings)
        })
    }

    /// Returns `true` if the similarity matrix has already been built.
    #[must_use]
    pub fn has_similarity_matrix(&self) -> bool {
        self.matrix.get().is_some()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Item> for Dataset {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
