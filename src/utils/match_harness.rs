//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on any game, with an
//! optional seeded random opening prefix so repeated games diverge.

use std::time::Instant;

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::game::color::Color;
use crate::game::game_board::GameBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    BlackWin,
    WhiteWin,
    Draw,
    DrawMaxPlies,
}

impl MatchOutcome {
    /// Outcome of a finished game from its terminal evaluation.
    pub fn from_terminal_value(value: i64) -> Self {
        match value.signum() {
            1 => Self::BlackWin,
            -1 => Self::WhiteWin,
            _ => Self::Draw,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Self::BlackWin => Some(Color::Black),
            Self::WhiteWin => Some(Color::White),
            Self::Draw | Self::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, color: Color },
    Draw,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 0,
            opening_max_plies: 4,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult<B: GameBoard> {
    pub outcome: MatchOutcome,
    pub started_at: DateTime<Utc>,
    pub final_board: B,
    pub opening_moves: Vec<String>,
    pub played_moves: Vec<String>,
    pub black_move_count: u32,
    pub white_move_count: u32,
    pub black_total_time_ns: u128,
    pub white_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms
        )
    }
}

/// Play one seeded match from the game's starting position.
pub fn play_engine_match<B: GameBoard>(
    engine_black: &mut dyn Engine<B>,
    engine_white: &mut dyn Engine<B>,
    seed: u64,
    config: &MatchConfig,
) -> Result<MatchResult<B>, String> {
    let mut board = B::new_game();
    let opening_moves = apply_seeded_random_opening(
        &mut board,
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;
    play_engine_match_from_board(engine_black, engine_white, board, opening_moves, config)
}

/// Play a match from a caller-provided position, without a random opening.
pub fn play_engine_match_from_board<B: GameBoard>(
    engine_black: &mut dyn Engine<B>,
    engine_white: &mut dyn Engine<B>,
    mut board: B,
    opening_moves: Vec<String>,
    config: &MatchConfig,
) -> Result<MatchResult<B>, String> {
    let started_at = Utc::now();
    engine_black.new_game();
    engine_white.new_game();

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        started_at,
        final_board: board.clone(),
        opening_moves,
        played_moves: Vec::new(),
        black_move_count: 0,
        white_move_count: 0,
        black_total_time_ns: 0,
        white_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        let legal_moves = board.all_moves();
        if legal_moves.is_empty() {
            result.outcome = MatchOutcome::from_terminal_value(board.value());
            break;
        }

        let mover = board.whose_move();
        let started = Instant::now();
        let out = match mover {
            Color::Black => engine_black.choose_move(&board, &config.go_params)?,
            Color::White => engine_white.choose_move(&board, &config.go_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::Black => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::White => {
                result.white_move_count = result.white_move_count.saturating_add(1);
                result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = match out.best_move {
            Some(mv) if legal_moves.contains(&mv) => mv,
            Some(mv) => return Err(format!("engine returned illegal move {mv}")),
            None => legal_moves[0].clone(),
        };
        result.played_moves.push(chosen.to_string());
        board.apply_move(chosen).map_err(|e| e.to_string())?;
    }

    if result.outcome == MatchOutcome::DrawMaxPlies && board.all_moves().is_empty() {
        result.outcome = MatchOutcome::from_terminal_value(board.value());
    }
    result.final_board = board;

    info!(
        outcome = ?result.outcome,
        started_at = %result.started_at,
        plies = result.played_moves.len(),
        black_ms = result.black_total_time_ns / 1_000_000,
        white_ms = result.white_total_time_ns / 1_000_000,
        "match finished"
    );
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<B, F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> Result<MatchSeriesStats, String>
where
    B: GameBoard,
    F1: Fn() -> Box<dyn Engine<B>>,
    F2: Fn() -> Box<dyn Engine<B>>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_black = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();

        let result = if player1_is_black {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, &config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, &config.per_game)?
        };

        let (p1_moves, p1_ns, p2_moves, p2_ns) = if player1_is_black {
            (
                result.black_move_count,
                result.black_total_time_ns,
                result.white_move_count,
                result.white_total_time_ns,
            )
        } else {
            (
                result.white_move_count,
                result.white_total_time_ns,
                result.black_move_count,
                result.black_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let mapped = match result.outcome.winner() {
            Some(color) => {
                let player1_won = (color == Color::Black) == player1_is_black;
                let player = if player1_won {
                    stats.player1_wins += 1;
                    PlayerId::Player1
                } else {
                    stats.player2_wins += 1;
                    PlayerId::Player2
                };
                SeriesOutcome::PlayerWin { player, color }
            }
            None => {
                stats.draws += 1;
                if result.outcome == MatchOutcome::DrawMaxPlies {
                    SeriesOutcome::DrawMaxPlies
                } else {
                    SeriesOutcome::Draw
                }
            }
        };
        stats.outcomes.push(mapped);

        info!(
            game = i + 1,
            games = config.games,
            seed,
            player1_is_black,
            result = ?mapped,
            p1_wins = stats.player1_wins,
            p2_wins = stats.player2_wins,
            draws = stats.draws,
            "series progress"
        );
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    Ok(stats)
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        (total_ns as f64) / (moves as f64) / 1_000_000.0
    }
}

/// Play a seeded number of uniformly random plies, returning their text.
fn apply_seeded_random_opening<B: GameBoard>(
    board: &mut B,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> Result<Vec<String>, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut opening_moves = Vec::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        let mut legal_moves = board.all_moves();
        if legal_moves.is_empty() {
            break;
        }
        let idx = rng.random_range(0..legal_moves.len());
        let chosen = legal_moves.swap_remove(idx);
        opening_moves.push(chosen.to_string());
        board.apply_move(chosen).map_err(|e| e.to_string())?;
    }

    Ok(opening_moves)
}
