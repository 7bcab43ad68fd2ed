//! Match Point - Match confirmation and Elo rating engine for tennis ladders
//!
//! This crate validates reported set scores, enforces a two-party
//! confirmation protocol on match results, and applies deterministic Elo
//! rating deltas when both participants agree a result occurred.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod rating;
pub mod score;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use lifecycle::MatchLifecycleManager;
pub use rating::{EloConfig, EloRatingCalculator, RatingCalculator};
pub use score::{format_score, is_tiebreak, match_winner, validate_set};
pub use store::{memory::InMemoryLadderStore, LadderStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
