//! The capability set every game variant provides to the search engine.
//!
//! A board is one full configuration plus whose turn it is and an undo stack.
//! The search mutates a single board in place through `apply_move` and
//! `undo_last_move`, so implementations must reverse every mutation exactly
//! using only what they recorded while applying.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::game::board_errors::BoardError;
use crate::game::color::Color;

/// Magnitude of a decided game. Black wins score `+WIN_VALUE`, White wins
/// score `-WIN_VALUE`; static evaluations stay strictly inside this range.
pub const WIN_VALUE: i64 = 1_000_000;

/// Tunable evaluation weights exchanged with a configuration front-end.
pub trait GameRules: Clone + fmt::Debug + Default + PartialEq + Send {
    /// Set one named weight from its textual value.
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String>;

    /// `(name, value)` pairs of every option, in display order.
    fn options(&self) -> Vec<(&'static str, i64)>;
}

pub trait GameBoard: Clone + fmt::Debug + fmt::Display + Send {
    type Move: Clone + fmt::Debug + fmt::Display + PartialEq + FromStr<Err = BoardError> + Send;
    type Key: Clone + Eq + Hash + fmt::Debug + Send;
    type Rules: GameRules;

    /// Canonical starting configuration with default rules.
    fn new_game() -> Self;

    /// Start a new game and replay `moves`, rebuilding the undo history so
    /// the restored board can be unwound move by move.
    fn from_history<I>(moves: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = Self::Move>,
    {
        let mut board = Self::new_game();
        for mv in moves {
            board.apply_move(mv)?;
        }
        Ok(board)
    }

    /// Apply `mv` for the side to move and push it on the undo stack.
    ///
    /// The move is validated before anything changes; on error the board is
    /// left exactly as it was.
    fn apply_move(&mut self, mv: Self::Move) -> Result<(), BoardError>;

    /// Reverse the most recent move and hand it back to the caller.
    fn undo_last_move(&mut self) -> Result<Self::Move, BoardError>;

    /// Every legal move for the side to move. Empty means the game is over.
    fn all_moves(&self) -> Vec<Self::Move>;

    /// Static evaluation, positive favoring Black. Terminal positions return
    /// `+WIN_VALUE`, `-WIN_VALUE` or `0`.
    fn value(&self) -> i64;

    fn key(&self) -> Self::Key;

    fn whose_move(&self) -> Color;

    fn history_len(&self) -> usize;

    fn last_move(&self) -> Option<&Self::Move>;

    fn rules(&self) -> Self::Rules;

    /// Replace the evaluation weights, recomputing any cached accumulator.
    fn set_rules(&mut self, rules: Self::Rules);
}

/// Push one rules record to every live board sharing that configuration.
pub fn apply_rules_to_all<'a, B, I>(boards: I, rules: &B::Rules)
where
    B: GameBoard + 'a,
    I: IntoIterator<Item = &'a mut B>,
{
    for board in boards {
        board.set_rules(rules.clone());
    }
}

pub(crate) fn parse_weight(name: &str, value: &str) -> Result<i32, String> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid value for {name}: {value}"))
}
