pub mod item;
pub mod media;

pub use item::{Item, ItemMetadata};
pub use media::{MOVIE_GENRES, MediaType, TV_GENRES, genre_name, genre_names};
