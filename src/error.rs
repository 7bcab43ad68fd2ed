//! Error types for the match ledger engine
//!
//! This module defines all error types using anyhow for consistent error
//! handling throughout the crate.

use crate::types::{MatchId, MatchStatus};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for the match confirmation and rating workflow
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Invalid set score: {reason}")]
    InvalidScore { reason: String },

    #[error("Invalid match proposal: {reason}")]
    InvalidProposal { reason: String },

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: MatchId },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Match {match_id} is not pending (current status: {status})")]
    InvalidState {
        match_id: MatchId,
        status: MatchStatus,
    },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Persistence conflict: {reason}")]
    PersistenceConflict { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
