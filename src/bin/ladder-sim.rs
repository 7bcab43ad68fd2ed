//! Ladder simulator for exercising the match confirmation engine
//!
//! Seeds a set of players into the in-memory store, plays a deterministic
//! round-robin schedule through the full propose/respond workflow, and
//! prints the resulting leaderboard. Useful for eyeballing rating drift
//! and for smoke-testing the engine end to end.

use anyhow::Result;
use clap::Parser;
use match_point::config::AppConfig;
use match_point::lifecycle::MatchLifecycleManager;
use match_point::rating::{EloConfig, EloRatingCalculator};
use match_point::store::memory::InMemoryLadderStore;
use match_point::store::LadderStore;
use match_point::types::{MatchProposal, Player, RespondDecision, SetScore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Ladder simulator - deterministic round-robin over the match engine
#[derive(Parser)]
#[command(
    name = "ladder-sim",
    version,
    about = "Simulate a tennis ladder against the match confirmation engine"
)]
struct Args {
    /// Number of players to seed
    #[arg(short, long, default_value_t = 8)]
    players: usize,

    /// Number of round-robin rounds to play
    #[arg(short, long, default_value_t = 3)]
    rounds: usize,

    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Emit the final leaderboard as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Print Prometheus metrics after the simulation
    #[arg(long)]
    show_metrics: bool,
}

fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// A plausible set line for the scheduled winner, varied by match index
fn sets_for(match_index: usize, reporter_wins: bool) -> Vec<SetScore> {
    let lines: [Vec<SetScore>; 4] = [
        vec![SetScore::new(6, 4), SetScore::new(6, 3)],
        vec![
            SetScore::with_tiebreak(7, 6, 5),
            SetScore::new(4, 6),
            SetScore::new(6, 2),
        ],
        vec![SetScore::new(7, 5), SetScore::new(6, 4)],
        vec![SetScore::new(8, 6)],
    ];
    let line = &lines[match_index % lines.len()];

    if reporter_wins {
        line.clone()
    } else {
        line.iter()
            .map(|s| SetScore {
                player1: s.player2,
                player2: s.player1,
                tiebreak_loser_points: s.tiebreak_loser_points,
            })
            .collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    if let Some(level) = &args.log_level {
        config.service.log_level = level.clone();
    }
    init_logging(&config.service.log_level)?;

    if args.players < 2 {
        anyhow::bail!("At least two players are required");
    }

    let store = Arc::new(InMemoryLadderStore::new());
    let calculator = Arc::new(EloRatingCalculator::new(EloConfig {
        k_factor: config.rating.k_factor,
        default_rating: config.rating.default_rating,
    })?);

    for i in 0..args.players {
        let id = format!("player-{}", i + 1);
        let name = format!("Player {}", i + 1);
        store
            .upsert_player(Player::new(id, name, config.rating.default_rating))
            .await?;
    }

    let manager =
        MatchLifecycleManager::with_calculator(store.clone() as Arc<dyn LadderStore>, calculator)?;

    info!(
        "Simulating {} rounds of round-robin over {} players",
        args.rounds, args.players
    );

    let mut match_index = 0usize;
    for round in 0..args.rounds {
        for i in 0..args.players {
            for j in (i + 1)..args.players {
                let reporter = format!("player-{}", i + 1);
                let opponent = format!("player-{}", j + 1);

                // Deterministic schedule: alternate winners across pairs
                // and rounds so ratings spread out
                let reporter_wins = (i + j + round) % 2 == 0;
                let winner = if reporter_wins {
                    reporter.clone()
                } else {
                    opponent.clone()
                };

                let record = manager
                    .propose_match(MatchProposal {
                        reporter_id: reporter.clone(),
                        opponent_id: opponent.clone(),
                        winner_id: winner,
                        sets: sets_for(match_index, reporter_wins),
                    })
                    .await?;

                // Every seventh report gets disputed
                let decision = if match_index % 7 == 6 {
                    RespondDecision::Reject
                } else {
                    RespondDecision::Confirm
                };
                manager
                    .respond_to_match(record.id, &opponent, decision)
                    .await?;

                match_index += 1;
            }
        }
    }

    let stats = manager.get_stats()?;
    let leaderboard = manager.leaderboard().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&leaderboard)?);
    } else {
        println!(
            "Played {} matches: {} confirmed, {} rejected",
            stats.matches_proposed, stats.matches_confirmed, stats.matches_rejected
        );
        println!();
        println!("{:<4} {:<12} {:>6} {:>5} {:>6} {:>7}", "#", "Player", "Elo", "W", "L", "Played");

        for (position, player) in leaderboard.iter().enumerate() {
            println!(
                "{:<4} {:<12} {:>6} {:>5} {:>6} {:>7}",
                position + 1,
                player.display_name,
                player.rating,
                player.wins,
                player.losses,
                player.matches_played
            );
        }
    }

    if args.show_metrics {
        println!();
        println!("{}", manager.metrics().export_text()?);
    }

    Ok(())
}
