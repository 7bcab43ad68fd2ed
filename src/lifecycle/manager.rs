//! Match lifecycle manager
//!
//! This module owns the state machine for reported matches: a reporter
//! proposes a result, the counterparty confirms or rejects it, and a
//! confirmation applies the Elo deltas to both player records in one
//! atomic store write. A reported result has zero effect on anyone's
//! standing until the counterparty confirms.

use crate::error::{LadderError, Result};
use crate::metrics::MetricsCollector;
use crate::rating::calculator::RatingCalculator;
use crate::rating::elo::{EloConfig, EloRatingCalculator};
use crate::score::validator::{format_score, match_winner, played_sets, validate_set};
use crate::store::{ConfirmationUpdate, LadderStore};
use crate::types::{
    MatchId, MatchProposal, MatchRecord, MatchStatus, Player, PlayerId, RespondDecision, SetScore,
    Side,
};
use crate::utils::{current_timestamp, generate_match_id, rating_difference};
use std::sync::{Arc, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Counters describing lifecycle activity since startup
#[derive(Debug, Clone, Default)]
pub struct LifecycleStats {
    /// Total matches proposed (persisted as pending)
    pub matches_proposed: u64,
    /// Total matches confirmed
    pub matches_confirmed: u64,
    /// Total matches rejected by the counterparty
    pub matches_rejected: u64,
    /// Proposals refused before any write
    pub validation_failures: u64,
}

/// The match confirmation and rating-update engine
#[derive(Clone)]
pub struct MatchLifecycleManager {
    /// Durable state: player and match records
    store: Arc<dyn LadderStore>,
    /// Delta computation for confirmed results
    rating_calculator: Arc<dyn RatingCalculator>,
    /// Manager statistics
    stats: Arc<RwLock<LifecycleStats>>,
    /// Metrics collector
    metrics: Arc<MetricsCollector>,
}

impl MatchLifecycleManager {
    /// Create a manager with the default Elo calculator
    pub fn new(store: Arc<dyn LadderStore>) -> Result<Self> {
        let calculator = Arc::new(EloRatingCalculator::new(EloConfig::default())?);
        Self::with_calculator(store, calculator)
    }

    /// Create a manager with a custom rating calculator
    pub fn with_calculator(
        store: Arc<dyn LadderStore>,
        rating_calculator: Arc<dyn RatingCalculator>,
    ) -> Result<Self> {
        let metrics = Arc::new(MetricsCollector::new()?);
        Ok(Self::with_metrics(store, rating_calculator, metrics))
    }

    /// Create a manager with a custom calculator and metrics collector
    pub fn with_metrics(
        store: Arc<dyn LadderStore>,
        rating_calculator: Arc<dyn RatingCalculator>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            store,
            rating_calculator,
            stats: Arc::new(RwLock::new(LifecycleStats::default())),
            metrics,
        }
    }

    /// The metrics collector backing this manager
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        Arc::clone(&self.metrics)
    }

    /// Report a match result, persisting it in `Pending` state.
    ///
    /// All validation happens before any write: a failed proposal leaves
    /// no partial state, and no rating moves until the counterparty
    /// confirms.
    pub async fn propose_match(&self, proposal: MatchProposal) -> Result<MatchRecord> {
        let (sets, winner_side) = match self.validate_proposal(&proposal) {
            Ok(validated) => validated,
            Err(e) => {
                self.metrics.record_validation_failure();
                self.update_stats(|stats| stats.validation_failures += 1)?;
                return Err(e);
            }
        };

        // Both participants must exist before anything is written
        self.require_player(&proposal.reporter_id).await?;
        self.require_player(&proposal.opponent_id).await?;

        let score = format_score(&sets, winner_side);
        let record = MatchRecord {
            id: generate_match_id(),
            player1_id: proposal.reporter_id.clone(),
            player2_id: proposal.opponent_id.clone(),
            winner_id: proposal.winner_id.clone(),
            score,
            status: MatchStatus::Pending,
            reported_by_id: proposal.reporter_id.clone(),
            player1_rating_change: None,
            player2_rating_change: None,
            created_at: current_timestamp(),
            confirmed_by_id: None,
            confirmed_at: None,
        };

        let id = self.store.create_match(record.clone()).await?;
        self.update_stats(|stats| stats.matches_proposed += 1)?;
        self.metrics.record_proposal();

        info!(
            "Match {} proposed by '{}' against '{}' (winner: '{}', score: \"{}\")",
            id, proposal.reporter_id, proposal.opponent_id, proposal.winner_id, record.score
        );

        Ok(record)
    }

    /// Confirm or reject a pending match as the counterparty.
    ///
    /// Confirmation atomically applies the rating deltas to both player
    /// records, increments their win/loss/played counters, and finalizes
    /// the match record. A repeated call on a decided match fails with
    /// `InvalidState` and never reapplies the delta.
    pub async fn respond_to_match(
        &self,
        match_id: MatchId,
        responder_id: &PlayerId,
        decision: RespondDecision,
    ) -> Result<MatchRecord> {
        let start = Instant::now();

        let record = self
            .store
            .get_match(match_id)
            .await?
            .ok_or(LadderError::MatchNotFound { match_id })?;

        if record.status.is_terminal() {
            debug!(
                "Stale response to match {} from '{}' (status: {})",
                match_id, responder_id, record.status
            );
            return Err(LadderError::InvalidState {
                match_id,
                status: record.status,
            }
            .into());
        }

        if !record.is_participant(responder_id) {
            warn!(
                "Non-participant '{}' attempted to respond to match {}",
                responder_id, match_id
            );
            self.metrics.record_forbidden();
            return Err(LadderError::Forbidden {
                reason: format!("'{}' is not a participant of match {}", responder_id, match_id),
            }
            .into());
        }

        // A reporter finalizing their own claim would make rating changes
        // unilateral; this guard is structural, not a UI filter.
        if responder_id == &record.reported_by_id {
            warn!(
                "Reporter '{}' attempted to respond to their own match {}",
                responder_id, match_id
            );
            self.metrics.record_forbidden();
            return Err(LadderError::Forbidden {
                reason: format!(
                    "reporter '{}' cannot respond to their own match {}",
                    responder_id, match_id
                ),
            }
            .into());
        }

        match decision {
            RespondDecision::Reject => {
                let rejected = self.store.mark_rejected(match_id).await?;
                self.update_stats(|stats| stats.matches_rejected += 1)?;
                self.metrics.record_rejection();

                info!("Match {} rejected by '{}'", match_id, responder_id);
                Ok(rejected)
            }
            RespondDecision::Confirm => {
                let confirmed = self.confirm_match(&record, responder_id).await?;
                self.update_stats(|stats| stats.matches_confirmed += 1)?;

                let winner_change = if confirmed.winner_id == confirmed.player1_id {
                    confirmed.player1_rating_change.unwrap_or_default()
                } else {
                    confirmed.player2_rating_change.unwrap_or_default()
                };
                self.metrics
                    .record_confirmation(winner_change, start.elapsed());

                info!(
                    "Match {} confirmed by '{}' (winner: '{}', delta: {:+})",
                    match_id, responder_id, confirmed.winner_id, winner_change
                );
                Ok(confirmed)
            }
        }
    }

    /// Look up a single match record
    pub async fn get_match(&self, match_id: MatchId) -> Result<MatchRecord> {
        self.store
            .get_match(match_id)
            .await?
            .ok_or_else(|| LadderError::MatchNotFound { match_id }.into())
    }

    /// Pending matches awaiting the given player's response
    pub async fn pending_matches_for(&self, player_id: &PlayerId) -> Result<Vec<MatchRecord>> {
        let pending = self.store.list_matches_by_status(MatchStatus::Pending).await?;
        Ok(pending
            .into_iter()
            .filter(|m| m.is_participant(player_id) && m.counterparty() == player_id)
            .collect())
    }

    /// Confirmed match history for the given player, newest first
    pub async fn match_history_for(&self, player_id: &PlayerId) -> Result<Vec<MatchRecord>> {
        let matches = self.store.list_matches_for_player(player_id).await?;
        Ok(matches
            .into_iter()
            .filter(|m| m.status == MatchStatus::Confirmed)
            .collect())
    }

    /// All players ordered by rating, highest first
    pub async fn leaderboard(&self) -> Result<Vec<Player>> {
        let mut players = self.store.list_players().await?;
        players.sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then_with(|| b.wins.cmp(&a.wins))
                .then_with(|| a.display_name.cmp(&b.display_name))
        });
        Ok(players)
    }

    /// Current lifecycle statistics
    pub fn get_stats(&self) -> Result<LifecycleStats> {
        let stats = self.stats.read().map_err(|_| LadderError::InternalError {
            message: "Failed to acquire stats lock".to_string(),
        })?;
        Ok(stats.clone())
    }

    /// Validate a proposal, returning the played sets and the derived winner
    fn validate_proposal(&self, proposal: &MatchProposal) -> Result<(Vec<SetScore>, Side)> {
        if proposal.reporter_id == proposal.opponent_id {
            return Err(LadderError::InvalidProposal {
                reason: "a player cannot report a match against themselves".to_string(),
            }
            .into());
        }

        if proposal.winner_id != proposal.reporter_id
            && proposal.winner_id != proposal.opponent_id
        {
            return Err(LadderError::InvalidProposal {
                reason: format!("winner '{}' is not a participant", proposal.winner_id),
            }
            .into());
        }

        let sets = played_sets(&proposal.sets);
        if sets.is_empty() {
            return Err(LadderError::InvalidScore {
                reason: "submission contains no played sets".to_string(),
            }
            .into());
        }

        for set in &sets {
            if !validate_set(set.player1, set.player2) {
                return Err(LadderError::InvalidScore {
                    reason: format!("{}-{} is not a legal set", set.player1, set.player2),
                }
                .into());
            }
        }

        let winner_side = match_winner(&sets).ok_or_else(|| LadderError::InvalidProposal {
            reason: "sets produce no winner; a tie is not a valid match result".to_string(),
        })?;

        // The reporter submits as player1
        let derived_winner_id = match winner_side {
            Side::Player1 => &proposal.reporter_id,
            Side::Player2 => &proposal.opponent_id,
        };
        if derived_winner_id != &proposal.winner_id {
            return Err(LadderError::InvalidProposal {
                reason: format!(
                    "declared winner '{}' does not match the submitted sets",
                    proposal.winner_id
                ),
            }
            .into());
        }

        Ok((sets, winner_side))
    }

    /// Compute deltas from current ratings and apply them atomically
    async fn confirm_match(
        &self,
        record: &MatchRecord,
        responder_id: &PlayerId,
    ) -> Result<MatchRecord> {
        let winner = self.require_player(&record.winner_id).await?;
        let loser = self.require_player(record.loser_id()).await?;

        let delta = self.rating_calculator.rating_delta(winner.rating, loser.rating);

        debug!(
            "Computed delta for match {} (gap {}): winner '{}' ({}) {:+}, loser '{}' ({}) {:+}",
            record.id,
            rating_difference(winner.rating, loser.rating),
            winner.id,
            winner.rating,
            delta.winner_change,
            loser.id,
            loser.rating,
            delta.loser_change
        );

        let winner_is_player1 = record.winner_id == record.player1_id;
        let (player1_change, player2_change) = if winner_is_player1 {
            (delta.winner_change, delta.loser_change)
        } else {
            (delta.loser_change, delta.winner_change)
        };
        let (expected_player1_rating, expected_player2_rating) = if winner_is_player1 {
            (winner.rating, loser.rating)
        } else {
            (loser.rating, winner.rating)
        };

        let update = ConfirmationUpdate {
            confirmed_by_id: responder_id.clone(),
            confirmed_at: current_timestamp(),
            player1_rating_change: player1_change,
            player2_rating_change: player2_change,
            expected_player1_rating,
            expected_player2_rating,
        };

        self.store.apply_confirmation(record.id, update).await
    }

    async fn require_player(&self, player_id: &PlayerId) -> Result<Player> {
        self.store.get_player(player_id).await?.ok_or_else(|| {
            LadderError::PlayerNotFound {
                player_id: player_id.clone(),
            }
            .into()
        })
    }

    fn update_stats(&self, f: impl FnOnce(&mut LifecycleStats)) -> Result<()> {
        let mut stats = self.stats.write().map_err(|_| LadderError::InternalError {
            message: "Failed to acquire stats lock".to_string(),
        })?;
        f(&mut stats);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryLadderStore;

    async fn create_test_manager() -> (MatchLifecycleManager, Arc<InMemoryLadderStore>) {
        let store = Arc::new(InMemoryLadderStore::new());
        store
            .upsert_player(Player::new("alice".to_string(), "Alice", 1200))
            .await
            .unwrap();
        store
            .upsert_player(Player::new("bob".to_string(), "Bob", 1200))
            .await
            .unwrap();

        let manager = MatchLifecycleManager::new(store.clone() as Arc<dyn LadderStore>).unwrap();
        (manager, store)
    }

    fn straight_sets_proposal(winner: &str) -> MatchProposal {
        let (reporter, opponent) = ("alice".to_string(), "bob".to_string());
        let sets = if winner == "alice" {
            vec![SetScore::new(6, 4), SetScore::new(7, 5)]
        } else {
            vec![SetScore::new(4, 6), SetScore::new(5, 7)]
        };
        MatchProposal {
            reporter_id: reporter,
            opponent_id: opponent,
            winner_id: winner.to_string(),
            sets,
        }
    }

    #[tokio::test]
    async fn test_propose_creates_pending_match() {
        let (manager, store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();

        assert_eq!(record.status, MatchStatus::Pending);
        assert_eq!(record.score, "6-4, 7-5");
        assert_eq!(record.reported_by_id, "alice");
        assert!(record.player1_rating_change.is_none());

        // No rating moves on propose
        let alice = store.get_player(&"alice".to_string()).await.unwrap().unwrap();
        let bob = store.get_player(&"bob".to_string()).await.unwrap().unwrap();
        assert_eq!(alice.rating, 1200);
        assert_eq!(bob.rating, 1200);
        assert_eq!(alice.matches_played, 0);
    }

    #[tokio::test]
    async fn test_propose_rejects_self_match() {
        let (manager, _store) = create_test_manager().await;

        let proposal = MatchProposal {
            reporter_id: "alice".to_string(),
            opponent_id: "alice".to_string(),
            winner_id: "alice".to_string(),
            sets: vec![SetScore::new(6, 4)],
        };
        let err = manager.propose_match(proposal).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidProposal { .. })
        ));
    }

    #[tokio::test]
    async fn test_propose_rejects_outsider_winner() {
        let (manager, _store) = create_test_manager().await;

        let mut proposal = straight_sets_proposal("alice");
        proposal.winner_id = "mallory".to_string();
        let err = manager.propose_match(proposal).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidProposal { .. })
        ));
    }

    #[tokio::test]
    async fn test_propose_rejects_illegal_set() {
        let (manager, _store) = create_test_manager().await;

        let mut proposal = straight_sets_proposal("alice");
        proposal.sets = vec![SetScore::new(6, 5)];
        let err = manager.propose_match(proposal).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidScore { .. })
        ));

        let stats = manager.get_stats().unwrap();
        assert_eq!(stats.validation_failures, 1);
        assert_eq!(stats.matches_proposed, 0);
    }

    #[tokio::test]
    async fn test_propose_rejects_tied_outcome() {
        let (manager, _store) = create_test_manager().await;

        let mut proposal = straight_sets_proposal("alice");
        proposal.sets = vec![SetScore::new(6, 4), SetScore::new(4, 6)];
        let err = manager.propose_match(proposal).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidProposal { .. })
        ));
    }

    #[tokio::test]
    async fn test_propose_rejects_all_placeholder_sets() {
        let (manager, _store) = create_test_manager().await;

        let mut proposal = straight_sets_proposal("alice");
        proposal.sets = vec![SetScore::new(0, 0), SetScore::new(0, 0)];
        let err = manager.propose_match(proposal).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidScore { .. })
        ));
    }

    #[tokio::test]
    async fn test_propose_rejects_winner_contradicting_sets() {
        let (manager, _store) = create_test_manager().await;

        // Sets say alice won but bob is declared the winner
        let mut proposal = straight_sets_proposal("alice");
        proposal.winner_id = "bob".to_string();
        let err = manager.propose_match(proposal).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidProposal { .. })
        ));
    }

    #[tokio::test]
    async fn test_propose_unknown_player() {
        let (manager, _store) = create_test_manager().await;

        let proposal = MatchProposal {
            reporter_id: "alice".to_string(),
            opponent_id: "charlie".to_string(),
            winner_id: "alice".to_string(),
            sets: vec![SetScore::new(6, 4)],
        };
        let err = manager.propose_match(proposal).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::PlayerNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_confirm_applies_deltas_atomically() {
        let (manager, store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        let confirmed = manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap();

        assert_eq!(confirmed.status, MatchStatus::Confirmed);
        assert_eq!(confirmed.player1_rating_change, Some(16));
        assert_eq!(confirmed.player2_rating_change, Some(-16));
        assert_eq!(confirmed.confirmed_by_id.as_deref(), Some("bob"));
        assert!(confirmed.confirmed_at.is_some());

        let alice = store.get_player(&"alice".to_string()).await.unwrap().unwrap();
        let bob = store.get_player(&"bob".to_string()).await.unwrap().unwrap();
        assert_eq!(alice.rating, 1216);
        assert_eq!(alice.wins, 1);
        assert_eq!(alice.matches_played, 1);
        assert_eq!(bob.rating, 1184);
        assert_eq!(bob.losses, 1);
        assert_eq!(bob.matches_played, 1);
        assert_eq!(alice.matches_played, alice.wins + alice.losses);
    }

    #[tokio::test]
    async fn test_confirm_when_opponent_won() {
        let (manager, store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("bob"))
            .await
            .unwrap();
        let confirmed = manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap();

        // bob is the player2 slot, so his change sits in player2_rating_change
        assert_eq!(confirmed.player1_rating_change, Some(-16));
        assert_eq!(confirmed.player2_rating_change, Some(16));
        assert_eq!(confirmed.score, "6-4, 7-5");

        let bob = store.get_player(&"bob".to_string()).await.unwrap().unwrap();
        assert_eq!(bob.rating, 1216);
        assert_eq!(bob.wins, 1);
    }

    #[tokio::test]
    async fn test_repeated_respond_is_invalid_state() {
        let (manager, store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap();

        let err = manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidState { .. })
        ));

        // No double application
        let alice = store.get_player(&"alice".to_string()).await.unwrap().unwrap();
        assert_eq!(alice.rating, 1216);
        assert_eq!(alice.matches_played, 1);
    }

    #[tokio::test]
    async fn test_reporter_cannot_confirm_own_match() {
        let (manager, store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        let err = manager
            .respond_to_match(record.id, &"alice".to_string(), RespondDecision::Confirm)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::Forbidden { .. })
        ));

        // Still pending, no rating effect
        let current = manager.get_match(record.id).await.unwrap();
        assert_eq!(current.status, MatchStatus::Pending);
        let alice = store.get_player(&"alice".to_string()).await.unwrap().unwrap();
        assert_eq!(alice.rating, 1200);
    }

    #[tokio::test]
    async fn test_non_participant_is_forbidden() {
        let (manager, store) = create_test_manager().await;
        store
            .upsert_player(Player::new("mallory".to_string(), "Mallory", 1200))
            .await
            .unwrap();

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        let err = manager
            .respond_to_match(record.id, &"mallory".to_string(), RespondDecision::Confirm)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_reject_leaves_ratings_untouched() {
        let (manager, store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        let rejected = manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Reject)
            .await
            .unwrap();

        assert_eq!(rejected.status, MatchStatus::Rejected);
        assert!(rejected.player1_rating_change.is_none());

        let alice = store.get_player(&"alice".to_string()).await.unwrap().unwrap();
        assert_eq!(alice.rating, 1200);
        assert_eq!(alice.matches_played, 0);

        // Terminal: confirming afterwards fails
        let err = manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::InvalidState { .. })
        ));
    }

    #[tokio::test]
    async fn test_respond_unknown_match() {
        let (manager, _store) = create_test_manager().await;

        let err = manager
            .respond_to_match(
                generate_match_id(),
                &"bob".to_string(),
                RespondDecision::Confirm,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LadderError>(),
            Some(LadderError::MatchNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_pending_matches_for_counterparty_only() {
        let (manager, _store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();

        // The reporter has nothing to respond to; the opponent does
        let for_alice = manager.pending_matches_for(&"alice".to_string()).await.unwrap();
        assert!(for_alice.is_empty());

        let for_bob = manager.pending_matches_for(&"bob".to_string()).await.unwrap();
        assert_eq!(for_bob.len(), 1);
        assert_eq!(for_bob[0].id, record.id);
    }

    #[tokio::test]
    async fn test_match_history_only_confirmed() {
        let (manager, _store) = create_test_manager().await;

        let first = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        manager
            .respond_to_match(first.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap();

        let second = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        manager
            .respond_to_match(second.id, &"bob".to_string(), RespondDecision::Reject)
            .await
            .unwrap();

        let history = manager.match_history_for(&"alice".to_string()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, first.id);
    }

    #[tokio::test]
    async fn test_leaderboard_orders_by_rating() {
        let (manager, _store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap();

        let leaderboard = manager.leaderboard().await.unwrap();
        assert_eq!(leaderboard.len(), 2);
        assert_eq!(leaderboard[0].id, "alice");
        assert_eq!(leaderboard[1].id, "bob");
    }

    #[tokio::test]
    async fn test_stats_track_lifecycle() {
        let (manager, _store) = create_test_manager().await;

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap();

        let stats = manager.get_stats().unwrap();
        assert_eq!(stats.matches_proposed, 1);
        assert_eq!(stats.matches_confirmed, 1);
        assert_eq!(stats.matches_rejected, 0);
    }

    #[tokio::test]
    async fn test_custom_calculator_is_used() {
        use crate::rating::calculator::FixedRatingCalculator;

        let store = Arc::new(InMemoryLadderStore::new());
        store
            .upsert_player(Player::new("alice".to_string(), "Alice", 1200))
            .await
            .unwrap();
        store
            .upsert_player(Player::new("bob".to_string(), "Bob", 1200))
            .await
            .unwrap();

        let manager = MatchLifecycleManager::with_calculator(
            store.clone() as Arc<dyn LadderStore>,
            Arc::new(FixedRatingCalculator::new(10, -9)),
        )
        .unwrap();

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        let confirmed = manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap();

        assert_eq!(confirmed.player1_rating_change, Some(10));
        assert_eq!(confirmed.player2_rating_change, Some(-9));

        let alice = store.get_player(&"alice".to_string()).await.unwrap().unwrap();
        let bob = store.get_player(&"bob".to_string()).await.unwrap().unwrap();
        assert_eq!(alice.rating, 1210);
        assert_eq!(bob.rating, 1191);
    }

    #[tokio::test]
    async fn test_stored_changes_match_calculator_output() {
        let (manager, _store) = create_test_manager().await;
        let calculator = EloRatingCalculator::default();

        let record = manager
            .propose_match(straight_sets_proposal("alice"))
            .await
            .unwrap();
        let confirmed = manager
            .respond_to_match(record.id, &"bob".to_string(), RespondDecision::Confirm)
            .await
            .unwrap();

        let delta = calculator.rating_delta(1200, 1200);
        assert_eq!(confirmed.player1_rating_change, Some(delta.winner_change));
        assert_eq!(confirmed.player2_rating_change, Some(delta.loser_change));
    }
}
