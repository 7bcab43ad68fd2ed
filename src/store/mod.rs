//! Persistence interfaces for players and match records
//!
//! All durable state lives behind the [`LadderStore`] trait. The engine
//! ships an in-memory implementation; a database-backed implementation
//! supplies the same trait, including the atomic confirmation write.

pub mod memory;

use crate::error::Result;
use crate::types::{MatchId, MatchRecord, MatchStatus, Player, PlayerId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The atomic write applied when a pending match is confirmed.
///
/// Carries the precomputed per-slot rating changes plus the ratings both
/// players had when the deltas were computed. The store rejects the write
/// with `PersistenceConflict` if the match left `Pending` or either rating
/// moved since that read, closing the lost-update race.
#[derive(Debug, Clone)]
pub struct ConfirmationUpdate {
    /// The responder whose confirmation finalizes the match
    pub confirmed_by_id: PlayerId,
    pub confirmed_at: DateTime<Utc>,
    /// Signed rating change for the player1 slot
    pub player1_rating_change: i32,
    /// Signed rating change for the player2 slot
    pub player2_rating_change: i32,
    /// Rating player1 had when the delta was computed
    pub expected_player1_rating: i32,
    /// Rating player2 had when the delta was computed
    pub expected_player2_rating: i32,
}

/// Storage operations for the match confirmation workflow
#[async_trait]
pub trait LadderStore: Send + Sync {
    /// Look up a player record
    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>>;

    /// Insert or replace a player record (player creation belongs to the
    /// identity layer; the engine itself never mutates players this way)
    async fn upsert_player(&self, player: Player) -> Result<()>;

    /// List all player records (leaderboard surface)
    async fn list_players(&self) -> Result<Vec<Player>>;

    /// Persist a new match record, returning its id
    async fn create_match(&self, record: MatchRecord) -> Result<MatchId>;

    /// Look up a match record
    async fn get_match(&self, id: MatchId) -> Result<Option<MatchRecord>>;

    /// List match records with the given status
    async fn list_matches_by_status(&self, status: MatchStatus) -> Result<Vec<MatchRecord>>;

    /// List match records where the given player is a participant
    async fn list_matches_for_player(&self, player_id: &PlayerId) -> Result<Vec<MatchRecord>>;

    /// Transition a pending match to `Rejected`.
    ///
    /// Fails with `PersistenceConflict` if the match is no longer pending.
    async fn mark_rejected(&self, id: MatchId) -> Result<MatchRecord>;

    /// Atomically apply a confirmation: both players' ratings and
    /// win/loss/played counters, the match's rating-change fields, and the
    /// `Confirmed` status with its timestamp. All effects apply or none do.
    async fn apply_confirmation(
        &self,
        id: MatchId,
        update: ConfirmationUpdate,
    ) -> Result<MatchRecord>;
}
