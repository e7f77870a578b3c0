use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::{Dataset, load_dataset};
use crate::error::Result;

/// Caller-owned, load-once holder for the parsed dataset.
///
/// The first [`get_dataset`](Self::get_dataset) call reads and parses the
/// source; every later call returns the same `Arc` without touching the
/// file. Concurrent first calls block until a single build finishes.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    dataset: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    /// Creates an empty cache for the CSV file at `path`. Nothing is read
    /// until the first access.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dataset: OnceCell::new(),
        }
    }

    /// Source file backing this cache.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the parsed dataset, loading it on first call.
    ///
    /// # Errors
    ///
    /// Returns `CinesimError::DataLoad` if the source cannot be read. A
    /// failed load is not cached; the next call tries again.
    pub fn get_dataset(&self) -> Result<Arc<Dataset>> {
        self.dataset
            .get_or_try_init(|| load_dataset(&self.path).map(Arc::new))
            .cloned()
    }

    /// Returns `true` once the dataset has been built.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    /// Drops the cached dataset so the next access reloads the source.
    /// Callers still holding the previous `Arc` keep a valid snapshot.
    pub fn invalidate(&mut self) -> Option<Arc<Dataset>> {
        let previous = self.dataset.take();
        if previous.is_some() {
            tracing::info!(path = %self.path.display(), "dataset cache invalidated");
        }
        previous
    }
}
