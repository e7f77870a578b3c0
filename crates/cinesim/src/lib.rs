//! # Cinesim
//!
//! Movie and TV recommendations from precomputed text embeddings and
//! genre overlap. This crate re-exports the public API of
//! [`cinesim_core`].
//!
//! ```no_run
//! use cinesim::{Engine, EngineConfig, DEFAULT_TOP_N};
//!
//! let engine = Engine::new(EngineConfig::new().with_data_path("data/metadata_embeddings.csv"))?;
//! for title in engine.recommend("Inception", DEFAULT_TOP_N)? {
//!     println!("- {title}");
//! }
//! # Ok::<(), cinesim::CinesimError>(())
//! ```

pub use cinesim_core::*;
