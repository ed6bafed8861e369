//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- checkers 10 4 2`
//!
//! Positional arguments: game, games, player 1 depth, player 2 depth.
//! Set `RUST_LOG=info` to see per-game progress.

use tracing_subscriber::EnvFilter;

use plum_minimax::checkers::checkers_board::CheckersBoard;
use plum_minimax::engines::engine_minimax::MinimaxEngine;
use plum_minimax::engines::engine_trait::Engine;
use plum_minimax::game::game_board::GameBoard;
use plum_minimax::othello::othello_board::OthelloBoard;
use plum_minimax::utils::match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig, MatchSeriesStats,
};

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let game = args.first().map(String::as_str).unwrap_or("othello");
    let games = parse_arg(&args, 1, 10)?;
    let depth1 = parse_arg(&args, 2, 4)?;
    let depth2 = parse_arg(&args, 3, 2)?;

    let config = MatchSeriesConfig {
        games: u16::try_from(games).map_err(|_| format!("too many games: {games}"))?,
        base_seed: 1234,
        per_game: MatchConfig {
            max_plies: 200,
            opening_min_plies: 2,
            opening_max_plies: 6,
            ..MatchConfig::default()
        },
    };

    let stats = match game {
        "checkers" => run_series::<CheckersBoard>(depth1, depth2, &config)?,
        "othello" => run_series::<OthelloBoard>(depth1, depth2, &config)?,
        other => return Err(format!("unknown game '{other}'")),
    };

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}

fn run_series<B: GameBoard + 'static>(
    depth1: u32,
    depth2: u32,
    config: &MatchSeriesConfig,
) -> Result<MatchSeriesStats, String> {
    play_engine_match_series(
        || Box::new(MinimaxEngine::<B>::with_depth(depth1)) as Box<dyn Engine<B>>,
        || Box::new(MinimaxEngine::<B>::with_depth(depth2)) as Box<dyn Engine<B>>,
        config,
    )
}

fn parse_arg(args: &[String], idx: usize, default: u32) -> Result<u32, String> {
    match args.get(idx) {
        None => Ok(default),
        Some(text) => text
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| format!("argument {idx} must be a positive integer, got '{text}'")),
    }
}
