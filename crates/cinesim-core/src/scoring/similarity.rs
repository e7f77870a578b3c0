use crate::error::{CinesimError, Result};

/// Cosine similarity `u·v / (‖u‖‖v‖)`, or `0.0` when either vector is zero.
///
/// Both slices are expected to have the same length; callers that cannot
/// guarantee it should check dimensions first (see [`check_dimensions`]).
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    cosine_with_norms(a, l2_norm(a), b, l2_norm(b))
}

/// Jaccard index `|A∩B| / |A∪B|` over the distinct ids of each slice, or
/// `0.0` when both are empty.
///
/// Genre lists hold a handful of ids, so membership is a linear scan.
#[must_use]
pub fn jaccard_similarity(a: &[u32], b: &[u32]) -> f32 {
    let distinct_a = distinct(a);
    let distinct_b = distinct(b);
    let intersection = distinct_a.clone().filter(|id| b.contains(id)).count();
    let union = distinct_a.count() + distinct_b.count() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

fn distinct(ids: &[u32]) -> impl Iterator<Item = &u32> + Clone {
    ids.iter()
        .enumerate()
        .filter(|&(i, id)| !ids[..i].contains(id))
        .map(|(_, id)| id)
}

pub(crate) fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}

pub(crate) fn cosine_with_norms(a: &[f32], norm_a: f64, b: &[f32], norm_b: f64) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0) as f32
}

/// Verifies that every embedding has `expected` components.
///
/// # Errors
///
/// Returns `CinesimError::InvalidEmbeddingDimension` for the first row
/// whose length differs.
pub fn check_dimensions<'a>(
    embeddings: impl IntoIterator<Item = &'a [f32]>,
    expected: usize,
) -> Result<()> {
    for (index, embedding) in embeddings.into_iter().enumerate() {
        if embedding.len() != expected {
            return Err(CinesimError::InvalidEmbeddingDimension {
                index,
                expected,
                found: embedding.len(),
            });
        }
    }
    Ok(())
}

/// Dense pairwise cosine similarity matrix over a set of embeddings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds the full `N×N` matrix. Only the upper triangle is computed;
    /// the lower triangle is mirrored from it.
    ///
    /// # Errors
    ///
    /// Returns `CinesimError::InvalidEmbeddingDimension` if the embeddings
    /// are not uniformly shaped.
    pub fn build(embeddings: &[&[f32]]) -> Result<Self> {
        let size = embeddings.len();
        if let Some(first) = embeddings.first() {
            check_dimensions(embeddings.iter().copied(), first.len())?;
        }

        let norms: Vec<f64> = embeddings.iter().map(|e| l2_norm(e)).collect();
        let mut values = vec![0.0f32; size * size];

        for i in 0..size {
            for j in i..size {
                let sim = cosine_with_norms(embeddings[i], norms[i], embeddings[j], norms[j]);
                values[i * size + j] = sim;
                values[j * size + i] = sim;
            }
        }

        Ok(Self { size, values })
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarities between item `i` and every item, in table order.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Similarity between items `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }
}
