//! Rating system configuration

use serde::{Deserialize, Serialize};

/// Elo parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// K factor: maximum rating movement per match
    pub k_factor: f64,
    /// Rating assigned to new players
    pub default_rating: i32,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            default_rating: 1200,
        }
    }
}
