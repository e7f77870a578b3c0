use std::fmt;

use serde::{Deserialize, Serialize};

use super::media::{MediaType, genre_names};

/// Presentation columns carried through from the source table untouched
/// by scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub original_language: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub adult: Option<bool>,
    pub video: Option<bool>,
    /// Comma-separated genre names as stored by the ingestion step.
    pub genres: Option<String>,
}

/// A single movie or TV title with its precomputed embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier from the source table.
    pub id: String,

    /// Display title. Never empty for items held by a loaded dataset.
    pub title: String,

    /// Movie or TV.
    pub media_type: MediaType,

    /// TMDB genre codes in source order, without repeats; may be empty.
    pub genre_ids: Vec<u32>,

    /// Free-text synopsis.
    pub overview: Option<String>,

    /// Semantic vector encoding `overview` and genre names.
    pub embedding: Vec<f32>,

    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl Item {
    /// Creates an item with no overview and empty metadata.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        media_type: MediaType,
        genre_ids: impl IntoIterator<Item = u32>,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            media_type,
            genre_ids: dedup_in_order(genre_ids),
            overview: None,
            embedding,
            metadata: ItemMetadata::default(),
        }
    }

    /// Sets the overview.
    #[must_use]
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    /// Human-readable genre list: the stored `genres` column when present,
    /// otherwise resolved from `genre_ids`.
    #[must_use]
    pub fn genre_label(&self) -> String {
        match self.metadata.genres.as_deref().map(str::trim) {
            Some(stored) if !stored.is_empty() => stored.to_string(),
            _ => genre_names(&self.genre_ids, self.media_type),
        }
    }

    /// The text an embedding provider is expected to encode for this item.
    ///
    /// Returns `None` when the item has no overview, since such items are
    /// never embedded upstream.
    #[must_use]
    pub fn embedding_text(&self) -> Option<String> {
        let overview = self.overview.as_deref()?;
        Some(format!("{overview}. Genres: {}", self.genre_label()))
    }
}

/// Collects ids, keeping the first occurrence of each.
pub(crate) fn dedup_in_order(ids: impl IntoIterator<Item = u32>) -> Vec<u32> {
    let mut out: Vec<u32> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.title, self.media_type)?;
        if let Some(year) = self
            .metadata
            .release_date
            .as_deref()
            .and_then(|d| d.get(..4))
        {
            write!(f, ", {year}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_label_prefers_stored_column() {
        let mut item = Item::new("1", "Alien", MediaType::Movie, [27, 878], vec![1.0]);
        assert_eq!(item.genre_label(), "Horror, Science Fiction");

        item.metadata.genres = Some("Horror, Sci-Fi".into());
        assert_eq!(item.genre_label(), "Horror, Sci-Fi");

        item.metadata.genres = Some("   ".into());
        assert_eq!(item.genre_label(), "Horror, Science Fiction");
    }

    #[test]
    fn embedding_text_requires_overview() {
        let item = Item::new("1", "Dark", MediaType::Tv, [18, 9648], vec![1.0]);
        assert_eq!(item.embedding_text(), None);

        let item = item.with_overview("A missing child sets four families on a frantic hunt");
        assert_eq!(
            item.embedding_text().as_deref(),
            Some("A missing child sets four families on a frantic hunt. Genres: Drama, Mystery")
        );
    }

    #[test]
    fn genre_names_follow_source_order() {
        let item = Item::new("27205", "Inception", MediaType::Movie, [28, 878, 53], vec![1.0])
            .with_overview("A thief steals secrets through dreams");
        assert_eq!(item.genre_label(), "Action, Science Fiction, Thriller");
        assert_eq!(
            item.embedding_text().as_deref(),
            Some("A thief steals secrets through dreams. Genres: Action, Science Fiction, Thriller")
        );
    }

    #[test]
    fn repeated_genre_ids_are_kept_once() {
        let item = Item::new("1", "Heat", MediaType::Movie, [80, 28, 80, 53, 28], vec![1.0]);
        assert_eq!(item.genre_ids, [80, 28, 53]);
        assert_eq!(item.genre_label(), "Crime, Action, Thriller");
    }

    #[test]
    fn item_display() {
        let mut item = Item::new("27205", "Inception", MediaType::Movie, [878], vec![1.0]);
        assert_eq!(item.to_string(), "Inception (movie)");
        item.metadata.release_date = Some("2010-07-15".into());
        assert_eq!(item.to_string(), "Inception (movie, 2010)");
    }
}
