//! # Recommender
//!
//! Turns a title query into a ranked list of similar titles. Each
//! candidate is scored by blending embedding cosine similarity with
//! genre Jaccard overlap, sorted, stripped of the query item and of
//! any title sharing a substring with the query, then truncated.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::scoring::similarity::{cosine_with_norms, l2_norm};
use crate::scoring::{ScoreWeights, check_dimensions, jaccard_similarity};
use crate::types::{Item, MediaType};

/// Number of recommendations returned when the caller does not say.
pub const DEFAULT_TOP_N: usize = 15;

/// A ranked recommendation with its score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Row of the recommended item in the dataset.
    pub index: usize,
    pub title: String,
    pub media_type: MediaType,
    /// Combined score used for ranking.
    pub score: f32,
    /// Cosine similarity to the query embedding.
    pub semantic: f32,
    /// Jaccard overlap with the query's genres.
    pub genre: f32,
}

struct Candidate {
    index: usize,
    score: f32,
    semantic: f32,
    genre: f32,
}

/// Scores and ranks dataset items against a query title.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    weights: ScoreWeights,
    use_similarity_matrix: bool,
}

impl Recommender {
    /// Creates a recommender with the given score weights.
    ///
    /// # Errors
    ///
    /// Returns `CinesimError::InvalidWeights` if the weights are invalid.
    pub fn new(weights: ScoreWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            use_similarity_matrix: false,
        })
    }

    /// Read query similarities from the dataset's cached similarity matrix
    /// instead of computing one row per query. Results are identical.
    #[must_use]
    pub fn with_similarity_matrix(mut self, enabled: bool) -> Self {
        self.use_similarity_matrix = enabled;
        self
    }

    #[must_use]
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Returns up to `top_n` titles similar to `query_title`, best first.
    ///
    /// The query resolves to the first item whose title contains it
    /// (case-insensitive). An unmatched query yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `CinesimError::InvalidEmbeddingDimension` if the dataset's
    /// embeddings are not uniformly shaped.
    pub fn recommend(
        &self,
        dataset: &Dataset,
        query_title: &str,
        top_n: usize,
    ) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(dataset, query_title, top_n)?
            .into_iter()
            .map(|rec| rec.title)
            .collect())
    }

    /// Like [`recommend`](Self::recommend) but keeps the score breakdown.
    ///
    /// # Errors
    ///
    /// See [`recommend`](Self::recommend).
    pub fn recommend_scored(
        &self,
        dataset: &Dataset,
        query_title: &str,
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        let Some(query_index) = dataset.find_title(query_title) else {
            debug!(query = query_title, "no title matched query");
            return Ok(Vec::new());
        };

        let items = dataset.items();
        let query = &items[query_index];
        let similarities = self.similarities(dataset, query_index)?;

        let mut candidates: Vec<Candidate> = items
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != query_index)
            .map(|(index, item)| {
                let semantic = similarities[index];
                let genre = jaccard_similarity(&query.genre_ids, &item.genre_ids);
                Candidate {
                    index,
                    score: self.weights.combine(semantic, genre),
                    semantic,
                    genre,
                }
            })
            .collect();

        // Stable: equal scores keep table order. NaN scores sort last.
        candidates.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));

        let needle = query_title.to_lowercase();
        let results: Vec<Recommendation> = candidates
            .into_iter()
            .filter(|c| !shares_title(&items[c.index], &needle))
            .take(top_n)
            .map(|c| {
                let item = &items[c.index];
                Recommendation {
                    index: c.index,
                    title: item.title.clone(),
                    media_type: item.media_type,
                    score: c.score,
                    semantic: c.semantic,
                    genre: c.genre,
                }
            })
            .collect();

        debug!(
            query = query_title,
            matched = %query.title,
            index = query_index,
            results = results.len(),
            "ranked recommendations"
        );
        Ok(results)
    }

    fn similarities<'a>(
        &self,
        dataset: &'a Dataset,
        query_index: usize,
    ) -> Result<Cow<'a, [f32]>> {
        if self.use_similarity_matrix {
            let matrix = dataset.similarity_matrix()?;
            return Ok(Cow::Borrowed(matrix.row(query_index)));
        }

        let items = dataset.items();
        let query = &items[query_index].embedding;
        check_dimensions(items.iter().map(|item| item.embedding.as_slice()), query.len())?;

        let query_norm = l2_norm(query);
        Ok(Cow::Owned(
            items
                .iter()
                .map(|item| {
                    cosine_with_norms(query, query_norm, &item.embedding, l2_norm(&item.embedding))
                })
                .collect(),
        ))
    }
}

/// Non-finite embedding components yield NaN scores, which rank below
/// every real score.
fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Near-duplicate test: either case-folded title contains the other.
fn shares_title(item: &Item, needle: &str) -> bool {
    let title = item.title.to_lowercase();
    title.contains(needle) || needle.contains(title.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CinesimError;

    fn item(title: &str, genres: &[u32], embedding: &[f32]) -> Item {
        Item::new(
            title.to_lowercase().replace(' ', "-"),
            title,
            MediaType::Movie,
            genres.iter().copied(),
            embedding.to_vec(),
        )
    }

    fn catalogue() -> Dataset {
        Dataset::new(vec![
            item("Inception", &[878, 53], &[1.0, 0.0, 0.0]),
            item("Interstellar", &[878, 18], &[0.6, 0.8, 0.0]),
            item("Heat", &[80, 53], &[0.1, 0.1, 0.9]),
            item("Alien", &[27, 878], &[0.7, 0.1, 0.3]),
            item("Aliens", &[28, 878], &[0.7, 0.2, 0.3]),
            item("Memento", &[9648, 53], &[0.9, 0.0, 0.2]),
            item("Arrival", &[878, 18], &[0.5, 0.7, 0.1]),
        ])
    }

    #[test]
    fn two_item_reference_scenario() {
        let ds = Dataset::new(vec![
            item("Inception", &[878, 53], &[1.0, 0.0]),
            item("Interstellar", &[878, 18], &[0.6, 0.8]),
        ]);
        let rec = Recommender::default();

        assert_eq!(rec.recommend(&ds, "Inception", 1).unwrap(), ["Interstellar"]);

        let scored = rec.recommend_scored(&ds, "Inception", 1).unwrap();
        assert_eq!(scored.len(), 1);
        assert!((scored[0].semantic - 0.6).abs() < 1e-6);
        assert!((scored[0].genre - 1.0 / 3.0).abs() < 1e-6);
        let expected = 0.8 * 0.6 + 0.2 * (1.0 / 3.0);
        assert!((scored[0].score - expected).abs() < 1e-5);
        assert!((scored[0].score - 0.5467).abs() < 1e-4);
    }

    #[test]
    fn unmatched_query_is_empty_not_error() {
        let ds = catalogue();
        let titles = Recommender::default()
            .recommend(&ds, "Zzyzx Nonexistent Film", DEFAULT_TOP_N)
            .unwrap();
        assert!(titles.is_empty());
    }

    #[test]
    fn substring_family_is_excluded() {
        let ds = Dataset::new(vec![
            item("Batman", &[28, 80], &[1.0, 0.0]),
            item("Batman Begins", &[28, 80], &[1.0, 0.0]),
            item("The Batman", &[80, 9648], &[0.9, 0.1]),
            item("Heat", &[28, 80], &[0.2, 0.9]),
        ]);
        let rec = Recommender::default();

        assert_eq!(rec.recommend(&ds, "Batman", 10).unwrap(), ["Heat"]);
        // The query string contains "batman", so the shorter title goes too.
        assert_eq!(
            rec.recommend(&ds, "batman begins", 10).unwrap(),
            ["The Batman", "Heat"]
        );
    }

    #[test]
    fn top_n_zero_is_empty() {
        let ds = catalogue();
        assert!(Recommender::default().recommend(&ds, "Inception", 0).unwrap().is_empty());
    }

    #[test]
    fn query_item_never_recommended_and_length_bounded() {
        let ds = catalogue();
        let rec = Recommender::default();
        for (index, target) in ds.iter().enumerate() {
            for top_n in [1, 3, 100] {
                let scored = rec.recommend_scored(&ds, &target.title, top_n).unwrap();
                assert!(scored.len() <= top_n);
                assert!(scored.len() < ds.len());
                assert!(scored.iter().all(|r| r.index != index));
                assert!(scored.iter().all(|r| r.title != target.title));
            }
        }
    }

    #[test]
    fn fewer_survivors_than_top_n_returns_all() {
        let ds = catalogue();
        // Inception → everything except itself survives.
        let titles = Recommender::default().recommend(&ds, "Inception", 100).unwrap();
        assert_eq!(titles.len(), ds.len() - 1);
    }

    #[test]
    fn results_are_sorted_by_score_descending() {
        let ds = catalogue();
        let scored = Recommender::default()
            .recommend_scored(&ds, "Memento", DEFAULT_TOP_N)
            .unwrap();
        assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(scored[0].title, "Inception");
    }

    #[test]
    fn first_match_wins_and_family_is_dropped() {
        let ds = catalogue();
        let scored = Recommender::default()
            .recommend_scored(&ds, "ALIEN", DEFAULT_TOP_N)
            .unwrap();
        // Resolves to "Alien" (row 3); "Aliens" shares the substring.
        assert!(scored.iter().all(|r| r.index != 3 && r.index != 4));
        assert_eq!(scored.len(), ds.len() - 2);
    }

    #[test]
    fn equal_scores_keep_table_order() {
        let ds = Dataset::new(vec![
            item("Zulu", &[10752], &[1.0, 0.0]),
            item("Bravo", &[10752], &[2.0, 0.0]),
            item("Alpha", &[10752], &[1.0, 0.0]),
            item("Charlie", &[10752], &[0.5, 0.0]),
            item("Delta", &[37], &[0.0, 1.0]),
        ]);
        let titles = Recommender::default().recommend(&ds, "Zulu", 10).unwrap();
        assert_eq!(titles, ["Bravo", "Alpha", "Charlie", "Delta"]);
    }

    #[test]
    fn non_finite_embeddings_rank_last_in_table_order() {
        let ds = Dataset::new(vec![
            item("Alpha", &[18], &[1.0, 0.0]),
            item("Bravo", &[18], &[f32::NAN, 0.0]),
            item("Charlie", &[18], &[0.6, 0.8]),
            item("Delta", &[18], &[f32::INFINITY, 1.0]),
            item("Echo", &[18], &[1.0, 0.1]),
        ]);
        for rec in [
            Recommender::default(),
            Recommender::default().with_similarity_matrix(true),
        ] {
            let scored = rec.recommend_scored(&ds, "Alpha", 10).unwrap();
            let titles: Vec<_> = scored.iter().map(|r| r.title.as_str()).collect();
            assert_eq!(titles, ["Echo", "Charlie", "Bravo", "Delta"]);
            assert!(scored[..2].iter().all(|r| r.score.is_finite()));
            assert!(scored[2..].iter().all(|r| r.score.is_nan()));

            let again = rec.recommend(&ds, "Alpha", 10).unwrap();
            assert_eq!(again, titles);
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let ds = catalogue();
        let rec = Recommender::default();
        let first = rec.recommend_scored(&ds, "Arrival", 5).unwrap();
        for _ in 0..5 {
            assert_eq!(rec.recommend_scored(&ds, "Arrival", 5).unwrap(), first);
        }
    }

    #[test]
    fn query_without_genres_scores_zero_overlap() {
        let ds = Dataset::new(vec![
            item("Koyaanisqatsi", &[], &[1.0, 0.0]),
            item("Baraka", &[99], &[0.8, 0.6]),
            item("Samsara", &[], &[0.6, 0.8]),
        ]);
        let scored = Recommender::default()
            .recommend_scored(&ds, "Koyaanisqatsi", 5)
            .unwrap();
        assert_eq!(scored.len(), 2);
        assert!(scored.iter().all(|r| r.genre == 0.0));
        assert!((scored[0].score - 0.8 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn ragged_embeddings_are_rejected() {
        let ds = Dataset::new(vec![
            item("Heat", &[80], &[1.0, 0.0]),
            item("Ronin", &[28], &[1.0, 0.0, 0.0]),
        ]);
        for rec in [
            Recommender::default(),
            Recommender::default().with_similarity_matrix(true),
        ] {
            let err = rec.recommend(&ds, "Heat", 5).unwrap_err();
            assert!(matches!(
                err,
                CinesimError::InvalidEmbeddingDimension {
                    index: 1,
                    expected: 2,
                    found: 3
                }
            ));
        }
    }

    #[test]
    fn matrix_backed_ranking_matches_direct_ranking() {
        let ds = catalogue();
        let direct = Recommender::default();
        let cached = Recommender::default().with_similarity_matrix(true);
        for target in ds.iter() {
            let a = direct.recommend_scored(&ds, &target.title, DEFAULT_TOP_N).unwrap();
            let b = cached.recommend_scored(&ds, &target.title, DEFAULT_TOP_N).unwrap();
            let titles_a: Vec<_> = a.iter().map(|r| &r.title).collect();
            let titles_b: Vec<_> = b.iter().map(|r| &r.title).collect();
            assert_eq!(titles_a, titles_b);
            for (x, y) in a.iter().zip(&b) {
                assert!((x.score - y.score).abs() < 1e-6);
            }
        }
        assert!(ds.has_similarity_matrix());
    }

    #[test]
    fn custom_weights_change_the_blend() {
        let ds = Dataset::new(vec![
            item("Inception", &[878, 53], &[1.0, 0.0]),
            item("Interstellar", &[878, 18], &[0.6, 0.8]),
        ]);
        let rec = Recommender::new(ScoreWeights::new(0.5, 0.5).unwrap()).unwrap();
        let scored = rec.recommend_scored(&ds, "Inception", 1).unwrap();
        assert!((scored[0].score - (0.5 * 0.6 + 0.5 / 3.0)).abs() < 1e-5);

        let bad = ScoreWeights {
            semantic: 0.9,
            genre: 0.9,
        };
        assert!(matches!(
            Recommender::new(bad),
            Err(CinesimError::InvalidWeights(_))
        ));
    }
}
