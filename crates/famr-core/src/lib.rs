//! # famr-core
//!
//! Fuzzy ARTMAP with Relevance factor (FAMR): an incremental supervised
//! classifier of the Adaptive Resonance Theory family. Categories are fuzzy
//! min-max boxes in the unit hypercube; each carries class votes that form
//! the map field. Learning is one pattern at a time and never retrains from
//! scratch.
//!
//! ## Architecture
//!
//! ```text
//!   Pattern ──► InputScaling ([i_min, i_max] → [0, 1])
//!                    │
//!                    ▼
//!             ┌──────────────┐      ┌──────────────┐
//!             │  Resonance   │◄────►│ MatchEngine  │  choice + vigilance
//!             │  Search      │      └──────────────┘
//!             └──────┬───────┘
//!                    │ resonant / create new / best match
//!                    ▼
//!             ┌──────────────┐
//!             │CategoryStore │  boxes + class votes, creation order
//!             └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use famr_core::{Famr, FamrConfig, Pattern};
//!
//! let config = FamrConfig {
//!     i_min: 0.0,
//!     i_max: 10.0,
//!     ..FamrConfig::for_classes(2)
//! };
//! let mut famr = Famr::new(config)?;
//! famr.train(&[
//!     Pattern::new(vec![1.0, 1.0], 0),
//!     Pattern::new(vec![1.1, 1.1], 0),
//!     Pattern::new(vec![9.0, 9.0], 1),
//! ])?;
//!
//! assert_eq!(famr.category_count(), 2);
//! assert_eq!(famr.classify(&Pattern::query(vec![9.0, 9.0]))?, 1);
//! # Ok::<(), famr_core::FamrError>(())
//! ```

#![deny(unsafe_code)]

pub mod category;
pub mod config;
pub mod engine;
pub mod error;
pub mod matching;
pub mod pattern;
pub mod persistence;
pub mod resonance;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use category::{Category, CategoryStore, ClassVote};
pub use config::{
    FamrConfig, RelevanceInit, DEFAULT_BETA_A, DEFAULT_CHOICE_ALPHA, DEFAULT_EPOCHS,
    DEFAULT_I_MAX, DEFAULT_I_MIN, DEFAULT_MATCH_TRACKING_EPSILON, DEFAULT_RHO_AB,
    DEFAULT_RHO_INIT_A,
};
pub use engine::{Famr, FamrSnapshot, TrainingSummary};
pub use error::{FamrError, FamrResult};
pub use matching::{MatchEngine, MatchScores};
pub use pattern::{InputScaling, Pattern};
pub use persistence::{write_atomic, InMemoryModel, JsonFileModel, ModelPersistence};
pub use resonance::{Candidate, ResonanceSearch, SearchOutcome, SearchParams, SearchReport};
