//! # Cinesim Core
//!
//! Recommends movies and TV titles similar to a queried title by blending
//! cosine similarity over precomputed text embeddings with genre overlap.
//! Provides the dataset loader and cache, the scoring primitives, and the
//! ranking policy.
//!
//! ## Quick Start
//!
//! ```rust
//! use cinesim_core::{Dataset, Item, MediaType, Recommender};
//!
//! let dataset = Dataset::new(vec![
//!     Item::new("27205", "Inception", MediaType::Movie, [878, 53], vec![1.0, 0.0]),
//!     Item::new("157336", "Interstellar", MediaType::Movie, [878, 18], vec![0.6, 0.8]),
//! ]);
//!
//! let titles = Recommender::default().recommend(&dataset, "inception", 15).unwrap();
//! assert_eq!(titles, ["Interstellar"]);
//! ```
pub mod codec;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod recommend;
pub mod scoring;
pub mod types;

// Re-export primary API
pub use codec::{decode_embedding, encode_embedding};
pub use config::{DEFAULT_DATA_PATH, EngineConfig};
pub use dataset::{Dataset, DatasetCache, LoadReport, load_dataset, read_dataset};
pub use engine::Engine;
pub use error::{CinesimError, Result};
pub use recommend::{DEFAULT_TOP_N, Recommendation, Recommender};
pub use scoring::{
    ScoreWeights, SimilarityMatrix, WEIGHT_GENRE, WEIGHT_SEMANTIC, cosine_similarity,
    jaccard_similarity,
};
pub use types::{Item, ItemMetadata, MediaType, genre_name, genre_names};
