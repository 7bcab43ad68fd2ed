//! Elo rating system for confirmed match results
//!
//! This module provides the rating calculator interface and the Elo
//! implementation that converts one confirmed result into symmetric
//! integer rating deltas.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::{EloConfig, EloRatingCalculator};
