//! Elo rating calculator
//!
//! The logistic expected-score model comes from the skillratings crate;
//! rounding to integer deltas happens here so the output is
//! integer-for-integer reproducible across implementations.

use crate::rating::calculator::RatingCalculator;
use crate::types::RatingDelta;
use serde::{Deserialize, Serialize};
use skillratings::elo::{expected_score, EloRating};

/// Configuration for the Elo rating calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloConfig {
    /// K factor: maximum rating movement per match
    pub k_factor: f64,
    /// Rating assigned to new players
    pub default_rating: i32,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            default_rating: 1200,
        }
    }
}

impl EloConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.k_factor <= 0.0 || !self.k_factor.is_finite() {
            return Err(crate::error::LadderError::ConfigurationError {
                message: "K factor must be positive and finite".to_string(),
            }
            .into());
        }

        if self.default_rating <= 0 {
            return Err(crate::error::LadderError::ConfigurationError {
                message: "Default rating must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Elo rating calculator implementation
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: EloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo calculator with the given configuration
    pub fn new(config: EloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Probability that the winner-rated player beats the loser-rated one:
    /// `1 / (1 + 10^((loser - winner) / 400))`
    pub fn expected_winner_score(&self, winner_rating: i32, loser_rating: i32) -> f64 {
        let winner = EloRating {
            rating: winner_rating as f64,
        };
        let loser = EloRating {
            rating: loser_rating as f64,
        };
        let (expected_winner, _expected_loser) = expected_score(&winner, &loser);
        expected_winner
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: EloConfig::default(),
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn rating_delta(&self, winner_rating: i32, loser_rating: i32) -> RatingDelta {
        let expected_winner = self.expected_winner_score(winner_rating, loser_rating);
        let expected_loser = 1.0 - expected_winner;

        let winner_change = (self.config.k_factor * (1.0 - expected_winner)).round() as i32;
        let loser_change = (self.config.k_factor * (0.0 - expected_loser)).round() as i32;

        RatingDelta {
            winner_change,
            loser_change,
        }
    }

    fn initial_rating(&self) -> i32 {
        self.config.default_rating
    }
}
