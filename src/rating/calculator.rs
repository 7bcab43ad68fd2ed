//! Rating calculator trait
//!
//! The lifecycle manager computes deltas through this seam so tests can
//! substitute a fixed-delta implementation.

use crate::types::RatingDelta;

/// Trait for converting a confirmed result into rating changes
pub trait RatingCalculator: Send + Sync {
    /// Compute the symmetric rating changes for one confirmed match.
    ///
    /// Pure: identical inputs must produce identical integer output across
    /// invocations and implementations.
    fn rating_delta(&self, winner_rating: i32, loser_rating: i32) -> RatingDelta;

    /// Rating assigned to players before their first confirmed match
    fn initial_rating(&self) -> i32;
}

/// Fixed-delta calculator for testing
#[derive(Debug, Clone)]
pub struct FixedRatingCalculator {
    delta: RatingDelta,
    initial_rating: i32,
}

impl FixedRatingCalculator {
    pub fn new(winner_change: i32, loser_change: i32) -> Self {
        Self {
            delta: RatingDelta {
                winner_change,
                loser_change,
            },
            initial_rating: 1200,
        }
    }
}

impl RatingCalculator for FixedRatingCalculator {
    fn rating_delta(&self, _winner_rating: i32, _loser_rating: i32) -> RatingDelta {
        self.delta
    }

    fn initial_rating(&self) -> i32 {
        self.initial_rating
    }
}
