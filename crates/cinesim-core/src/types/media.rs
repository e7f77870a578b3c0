use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of title an item describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature film.
    Movie,
    /// Television series.
    Tv,
}

impl MediaType {
    /// Returns the genre catalogue used for this media type.
    #[must_use]
    pub fn genres(self) -> &'static [(u32, &'static str)] {
        match self {
            Self::Movie => MOVIE_GENRES,
            Self::Tv => TV_GENRES,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Tv => write!(f, "tv"),
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => Err(format!("unknown media type {other:?}")),
        }
    }
}

/// TMDB movie genres.
pub const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// TMDB TV genres.
pub const TV_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

/// Looks up the display name of a genre id for the given media type.
#[must_use]
pub fn genre_name(id: u32, media_type: MediaType) -> Option<&'static str> {
    media_type
        .genres()
        .iter()
        .find(|(gid, _)| *gid == id)
        .map(|(_, name)| *name)
}

/// Joins the names of known genre ids with `", "`, skipping unknown ids.
#[must_use]
pub fn genre_names<'a>(ids: impl IntoIterator<Item = &'a u32>, media_type: MediaType) -> String {
    ids.into_iter()
        .filter_map(|id| genre_name(*id, media_type))
        .collect::<Vec<_>>()
        .join(", ")
}
