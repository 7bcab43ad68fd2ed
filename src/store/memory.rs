//! In-memory ladder store
//!
//! A single `RwLock` over both tables makes every multi-record write
//! naturally atomic, which is exactly the transaction boundary the confirm
//! operation requires.

use crate::error::{LadderError, Result};
use crate::store::{ConfirmationUpdate, LadderStore};
use crate::types::{MatchId, MatchRecord, MatchStatus, Player, PlayerId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct StoreInner {
    players: HashMap<PlayerId, Player>,
    matches: HashMap<MatchId, MatchRecord>,
}

/// In-memory implementation of [`LadderStore`]
#[derive(Debug, Default)]
pub struct InMemoryLadderStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryLadderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read_inner(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| {
            LadderError::InternalError {
                message: "Failed to acquire store read lock".to_string(),
            }
            .into()
        })
    }

    fn write_inner(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| {
            LadderError::InternalError {
                message: "Failed to acquire store write lock".to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl LadderStore for InMemoryLadderStore {
    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>> {
        let inner = self.read_inner()?;
        Ok(inner.players.get(id).cloned())
    }

    async fn upsert_player(&self, player: Player) -> Result<()> {
        let mut inner = self.write_inner()?;
        inner.players.insert(player.id.clone(), player);
        Ok(())
    }

    async fn list_players(&self) -> Result<Vec<Player>> {
        let inner = self.read_inner()?;
        Ok(inner.players.values().cloned().collect())
    }

    async fn create_match(&self, record: MatchRecord) -> Result<MatchId> {
        let mut inner = self.write_inner()?;
        let id = record.id;
        inner.matches.insert(id, record);
        Ok(id)
    }

    async fn get_match(&self, id: MatchId) -> Result<Option<MatchRecord>> {
        let inner = self.read_inner()?;
        Ok(inner.matches.get(&id).cloned())
    }

    async fn list_matches_by_status(&self, status: MatchStatus) -> Result<Vec<MatchRecord>> {
        let inner = self.read_inner()?;
        let mut records: Vec<MatchRecord> = inner
            .matches
            .values()
            .filter(|m| m.status == status)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn list_matches_for_player(&self, player_id: &PlayerId) -> Result<Vec<MatchRecord>> {
        let inner = self.read_inner()?;
        let mut records: Vec<MatchRecord> = inner
            .matches
            .values()
            .filter(|m| m.is_participant(player_id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn mark_rejected(&self, id: MatchId) -> Result<MatchRecord> {
        let mut inner = self.write_inner()?;

        let record = inner
            .matches
            .get_mut(&id)
            .ok_or(LadderError::MatchNotFound { match_id: id })?;

        if record.status != MatchStatus::Pending {
            return Err(LadderError::PersistenceConflict {
                reason: format!("match {} already left pending ({})", id, record.status),
            }
            .into());
        }

        record.status = MatchStatus::Rejected;
        Ok(record.clone())
    }

    async fn apply_confirmation(
        &self,
        id: MatchId,
        update: ConfirmationUpdate,
    ) -> Result<MatchRecord> {
        let mut inner = self.write_inner()?;

        let record = inner
            .matches
            .get(&id)
            .ok_or(LadderError::MatchNotFound { match_id: id })?
            .clone();

        if record.status != MatchStatus::Pending {
            return Err(LadderError::PersistenceConflict {
                reason: format!("match {} already left pending ({})", id, record.status),
            }
            .into());
        }

        let mut player1 = inner
            .players
            .get(&record.player1_id)
            .ok_or_else(|| LadderError::PlayerNotFound {
                player_id: record.player1_id.clone(),
            })?
            .clone();
        let mut player2 = inner
            .players
            .get(&record.player2_id)
            .ok_or_else(|| LadderError::PlayerNotFound {
                player_id: record.player2_id.clone(),
            })?
            .clone();

        // Optimistic check: the deltas were computed from these ratings
        if player1.rating != update.expected_player1_rating
            || player2.rating != update.expected_player2_rating
        {
            return Err(LadderError::PersistenceConflict {
                reason: format!(
                    "ratings moved since read for match {} ({} vs {}, {} vs {})",
                    id,
                    player1.rating,
                    update.expected_player1_rating,
                    player2.rating,
                    update.expected_player2_rating
                ),
            }
            .into());
        }

        player1.rating += update.player1_rating_change;
        player2.rating += update.player2_rating_change;
        if record.winner_id == player1.id {
            player1.wins += 1;
            player2.losses += 1;
        } else {
            player2.wins += 1;
            player1.losses += 1;
        }
        player1.matches_played += 1;
        player2.matches_played += 1;
        player1.updated_at = update.confirmed_at;
        player2.updated_at = update.confirmed_at;

        let mut confirmed = record;
        confirmed.status = MatchStatus::Confirmed;
        confirmed.player1_rating_change = Some(update.player1_rating_change);
        confirmed.player2_rating_change = Some(update.player2_rating_change);
        confirmed.confirmed_by_id = Some(update.confirmed_by_id);
        confirmed.confirmed_at = Some(update.confirmed_at);

        // Same write lock for all five effects, so they land together
        inner.players.insert(player1.id.clone(), player1);
        inner.players.insert(player2.id.clone(), player2);
        inner.matches.insert(id, confirmed.clone());

        Ok(confirmed)
    }
}
