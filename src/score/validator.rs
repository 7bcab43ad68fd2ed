//! Set and match score validation
//!
//! Two scoring regimes are supported simultaneously, distinguished only by
//! the winning game count: standard sets (first to 6) and pro sets (first
//! to 8). Everything here is pure; the lifecycle manager decides what to do
//! with an invalid submission.

use crate::types::{SetScore, Side};

/// Check whether a pair of game counts is a legal completed set.
///
/// Legal patterns, in either order:
/// - Standard set: 6-0 .. 6-4, 7-5 (extended), 7-6 (tiebreak)
/// - Pro set: 8-0 .. 8-6, 9-7 (extended), 9-8 (tiebreak)
///
/// Equal scores never have a winner, and no high score above 9 is valid.
pub fn validate_set(a: u32, b: u32) -> bool {
    let high = a.max(b);
    let low = a.min(b);

    match high {
        // Standard set: two-game lead, no further play
        6 => low <= 4,
        // Extended 7-5 or tiebreak 7-6
        7 => low == 5 || low == 6,
        // Pro set: two-game lead, no further play
        8 => low <= 6,
        // Extended 9-7 or tiebreak 9-8
        9 => low == 7 || low == 8,
        _ => false,
    }
}

/// True exactly when the pair is a tiebreak set: 7-6, 6-7, 9-8, or 8-9.
pub fn is_tiebreak(a: u32, b: u32) -> bool {
    let high = a.max(b);
    let low = a.min(b);
    (high == 7 && low == 6) || (high == 9 && low == 8)
}

/// Drop unfilled `0-0` placeholder entries from a submission.
pub fn played_sets(sets: &[SetScore]) -> Vec<SetScore> {
    sets.iter()
        .copied()
        .filter(|s| !s.is_placeholder())
        .collect()
}

/// Determine the match winner by counting sets won with strict comparison.
///
/// Returns `None` when the set counts are equal, including the empty
/// submission and an all-ties submission. A tie is never a valid match
/// result; the caller rejects `None`.
pub fn match_winner(sets: &[SetScore]) -> Option<Side> {
    let mut player1_sets = 0u32;
    let mut player2_sets = 0u32;

    for set in sets {
        if set.player1 > set.player2 {
            player1_sets += 1;
        } else if set.player2 > set.player1 {
            player2_sets += 1;
        }
    }

    match player1_sets.cmp(&player2_sets) {
        std::cmp::Ordering::Greater => Some(Side::Player1),
        std::cmp::Ordering::Less => Some(Side::Player2),
        std::cmp::Ordering::Equal => None,
    }
}

/// Render the canonical score string from the winner's perspective.
///
/// Sets are rendered in submission order as `winnerGames-loserGames`,
/// joined with ", ". A tiebreak set carries the loser's tiebreak points in
/// parentheses when they were recorded, e.g. `"6-4, 7-6(5)"`. Placeholder
/// `0-0` sets are skipped.
pub fn format_score(sets: &[SetScore], winner: Side) -> String {
    sets.iter()
        .filter(|s| !s.is_placeholder())
        .map(|s| {
            let (won, lost) = (s.games_for(winner), s.games_for(winner.other()));
            match s.tiebreak_loser_points {
                Some(points) if is_tiebreak(s.player1, s.player2) => {
                    format!("{}-{}({})", won, lost, points)
                }
                _ => format!("{}-{}", won, lost),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
