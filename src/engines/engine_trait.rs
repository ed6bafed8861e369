//! Engine abstraction shared by the text protocol and the match harness.
//!
//! An engine picks a move for the side to move on any `GameBoard`; the
//! driver owns the board and applies whatever the engine returns.

use crate::game::game_board::GameBoard;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Overrides the engine's configured search depth for one decision.
    pub depth: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput<M> {
    pub best_move: Option<M>,
    /// Search value behind `best_move`, positive favoring Black.
    pub value: Option<i64>,
    pub info_lines: Vec<String>,
}

impl<M> Default for EngineOutput<M> {
    fn default() -> Self {
        Self {
            best_move: None,
            value: None,
            info_lines: Vec::new(),
        }
    }
}

pub trait Engine<B: GameBoard>: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// The board's evaluation weights changed; drop anything scored under
    /// the old ones.
    fn rules_changed(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), String> {
        Err(format!("unknown option '{name}'"))
    }

    fn choose_move(&mut self, board: &B, params: &GoParams)
        -> Result<EngineOutput<B::Move>, String>;
}

/// Parse an on/off style option value.
pub(crate) fn parse_switch(name: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid {name} value '{value}'")),
    }
}
