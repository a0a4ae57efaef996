//! Headless computer-vs-computer match
//!
//! Plays one match between two computer opponents, logging every move,
//! and prints the final board and result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use mill::{Difficulty, GameOutcome, GameState, MatchConfig};

/// Hard stop for matches that neither side can finish
const MAX_PLIES: usize = 1000;

#[derive(Debug, Parser)]
#[command(name = "mill", version, about = "Nine men's morris computer-vs-computer match")]
struct Args {
    /// White opponent: random, easy, medium or strong
    #[arg(long, default_value = "medium")]
    white: Difficulty,

    /// Black opponent: random, easy, medium or strong
    #[arg(long, default_value = "medium")]
    black: Difficulty,

    /// Time budget per computer move in milliseconds
    #[arg(long, default_value_t = mill::search::DEFAULT_DECISION_TIME_MS)]
    decision_time_ms: u64,

    /// Alpha-beta search depth in plies
    #[arg(long, default_value_t = mill::search::DEFAULT_DEPTH)]
    depth: u8,

    /// Seed for a reproducible match
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> MatchConfig {
        MatchConfig {
            decision_time_ms: self.decision_time_ms,
            search_depth: self.depth,
            seed: self.seed,
            ..MatchConfig::computer_match(self.white, self.black)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().into_config();
    let mut state = GameState::new(config).context("invalid match configuration")?;
    info!(
        "White ({:?}) vs Black ({:?}), depth {}, {}ms per move",
        state.config().white,
        state.config().black,
        state.config().search_depth,
        state.config().decision_time_ms
    );

    while !state.is_over() && state.move_history().len() < MAX_PLIES {
        let mover = state.board().current_player();
        if !state.play_ai_turn() {
            bail!("{mover:?} could not make a move\n{}", state.board());
        }
        if let (Some(mv), Some(result)) = (state.move_history().last(), state.last_ai_result()) {
            info!(
                "{mover:?}: {mv} ({:?}, score {}, {} nodes, {}ms)",
                result.search_type, result.score, result.nodes, result.time_ms
            );
        }
    }

    println!("{}", state.board());
    match state.outcome() {
        Some(GameOutcome::Winner(color)) => println!("{color:?} wins"),
        Some(GameOutcome::Draw(reason)) => println!("Draw ({reason:?})"),
        None => println!("No result after {MAX_PLIES} moves"),
    }
    Ok(())
}
