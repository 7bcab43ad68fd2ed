//! Match lifecycle management
//!
//! Owns the pending/confirmed/rejected state machine for reported matches
//! and applies rating changes when a counterparty confirms.

pub mod manager;

pub use manager::{LifecycleStats, MatchLifecycleManager};
