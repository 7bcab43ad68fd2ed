//! Common types used throughout the match ledger engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players, supplied by the external identity context
pub type PlayerId = String;

/// Unique identifier for match records
pub type MatchId = Uuid;

/// Which side of a match a value refers to (player1 is always the reporter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    /// The opposite side
    pub fn other(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player1 => write!(f, "Player1"),
            Side::Player2 => write!(f, "Player2"),
        }
    }
}

/// Lifecycle state of a reported match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Reported by one participant, awaiting the counterparty's response
    Pending,
    /// Counterparty confirmed; ratings have been applied (terminal)
    Confirmed,
    /// Counterparty rejected; no rating effect (terminal)
    Rejected,
}

impl MatchStatus {
    /// Whether this state admits no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Confirmed | MatchStatus::Rejected)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Confirmed => write!(f, "confirmed"),
            MatchStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Games won by each side in one set, as submitted by the reporter
///
/// Scores are unsigned by construction. A `0-0` entry is treated as an
/// unfilled placeholder and dropped during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub player1: u32,
    pub player2: u32,
    /// Points scored by the set loser in the tiebreak, when one was played
    pub tiebreak_loser_points: Option<u32>,
}

impl SetScore {
    /// Create a set score without tiebreak detail
    pub fn new(player1: u32, player2: u32) -> Self {
        Self {
            player1,
            player2,
            tiebreak_loser_points: None,
        }
    }

    /// Create a set score with the loser's tiebreak points
    pub fn with_tiebreak(player1: u32, player2: u32, loser_points: u32) -> Self {
        Self {
            player1,
            player2,
            tiebreak_loser_points: Some(loser_points),
        }
    }

    /// Whether this entry is an unfilled `0-0` placeholder
    pub fn is_placeholder(&self) -> bool {
        self.player1 == 0 && self.player2 == 0
    }

    /// Games won by the given side in this set
    pub fn games_for(self, side: Side) -> u32 {
        match side {
            Side::Player1 => self.player1,
            Side::Player2 => self.player2,
        }
    }
}

/// A ladder participant with rating and aggregate record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    /// Elo rating; mutated only by confirmed-match application
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub matches_played: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player with the given initial rating
    pub fn new(id: PlayerId, display_name: impl Into<String>, initial_rating: i32) -> Self {
        let now = crate::utils::current_timestamp();
        Self {
            id,
            display_name: display_name.into(),
            rating: initial_rating,
            wins: 0,
            losses: 0,
            matches_played: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One reported contest between two players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    /// The reporting participant
    pub player1_id: PlayerId,
    /// The declared opponent
    pub player2_id: PlayerId,
    /// Must equal one of the two participant ids
    pub winner_id: PlayerId,
    /// Canonical score string, winner-perspective (e.g. "6-4, 7-6(5)")
    pub score: String,
    pub status: MatchStatus,
    pub reported_by_id: PlayerId,
    /// Populated only once the match is confirmed
    pub player1_rating_change: Option<i32>,
    pub player2_rating_change: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub confirmed_by_id: Option<PlayerId>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    /// Whether the given player is one of the two participants
    pub fn is_participant(&self, player_id: &PlayerId) -> bool {
        &self.player1_id == player_id || &self.player2_id == player_id
    }

    /// The participant who did not report the match
    pub fn counterparty(&self) -> &PlayerId {
        if self.reported_by_id == self.player1_id {
            &self.player2_id
        } else {
            &self.player1_id
        }
    }

    /// The participant who lost, per the recorded winner
    pub fn loser_id(&self) -> &PlayerId {
        if self.winner_id == self.player1_id {
            &self.player2_id
        } else {
            &self.player1_id
        }
    }
}

/// A raw match submission from the reporting participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchProposal {
    pub reporter_id: PlayerId,
    pub opponent_id: PlayerId,
    /// Declared winner; must agree with the winner derived from `sets`
    pub winner_id: PlayerId,
    pub sets: Vec<SetScore>,
}

/// Counterparty decision on a pending match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespondDecision {
    Confirm,
    Reject,
}

/// Symmetric rating changes produced by one confirmed match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDelta {
    /// Always positive
    pub winner_change: i32,
    /// Always negative
    pub loser_change: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_other() {
        assert_eq!(Side::Player1.other(), Side::Player2);
        assert_eq!(Side::Player2.other(), Side::Player1);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!MatchStatus::Pending.is_terminal());
        assert!(MatchStatus::Confirmed.is_terminal());
        assert!(MatchStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_set_score_placeholder() {
        assert!(SetScore::new(0, 0).is_placeholder());
        assert!(!SetScore::new(6, 0).is_placeholder());
        assert!(!SetScore::new(0, 6).is_placeholder());
    }

    #[test]
    fn test_set_score_games_for() {
        let set = SetScore::new(6, 4);
        assert_eq!(set.games_for(Side::Player1), 6);
        assert_eq!(set.games_for(Side::Player2), 4);
    }

    fn pending_record() -> MatchRecord {
        MatchRecord {
            id: crate::utils::generate_match_id(),
            player1_id: "alice".to_string(),
            player2_id: "bob".to_string(),
            winner_id: "bob".to_string(),
            score: "6-4".to_string(),
            status: MatchStatus::Pending,
            reported_by_id: "alice".to_string(),
            player1_rating_change: None,
            player2_rating_change: None,
            created_at: crate::utils::current_timestamp(),
            confirmed_by_id: None,
            confirmed_at: None,
        }
    }

    #[test]
    fn test_match_record_helpers() {
        let record = pending_record();

        assert!(record.is_participant(&"alice".to_string()));
        assert!(record.is_participant(&"bob".to_string()));
        assert!(!record.is_participant(&"mallory".to_string()));
        assert_eq!(record.counterparty(), "bob");
        assert_eq!(record.loser_id(), "alice");
    }

    #[test]
    fn test_match_record_json_round_trip() {
        let record = pending_record();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], "Pending");
        assert_eq!(value["score"], "6-4");
        assert!(value["player1_rating_change"].is_null());
        assert!(value["confirmed_by_id"].is_null());
        assert!(value["confirmed_at"].is_null());

        let back: MatchRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.winner_id, record.winner_id);
        assert_eq!(back.status, record.status);
        assert_eq!(back.created_at, record.created_at);
    }

    #[test]
    fn test_new_player_record_is_empty() {
        let player = Player::new("p1".to_string(), "Alice", 1200);
        assert_eq!(player.rating, 1200);
        assert_eq!(player.wins, 0);
        assert_eq!(player.losses, 0);
        assert_eq!(player.matches_played, 0);
    }
}
