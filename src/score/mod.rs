//! Score validation for tennis sets and matches
//!
//! This module decides whether a submitted set-by-set score is a legal
//! tennis result, derives the match winner, and renders the canonical
//! score string.

pub mod validator;

// Re-export commonly used functions
pub use validator::{format_score, is_tiebreak, match_winner, played_sets, validate_set};
