//! Error taxonomy for board mutation and notation parsing.
//!
//! Every variant other than the parse errors is a contract violation: the
//! caller (or a move generator bug) tried to apply something that is not a
//! legal move. Boards validate a move completely before mutating, so a
//! rejected move always leaves the position untouched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("destination {0} is already occupied")]
    OccupiedDestination(String),
    #[error("no piece of the side to move on {0}")]
    MissingPiece(String),
    #[error("uncrowned piece cannot move from {from} to {to}")]
    WrongDirection { from: String, to: String },
    #[error("step from {from} to {to} is neither a single step nor a jump")]
    InvalidStep { from: String, to: String },
    #[error("jump to {0} does not hop over an opponent piece")]
    MissingCapture(String),
    #[error("piece crowned on {0} must stop there")]
    PromotionMidChain(String),
    #[error("malformed move: {0}")]
    MalformedMove(String),
    #[error("placing on {0} flips no opponent pieces")]
    NoFlips(String),
    #[error("location {0} is off the board")]
    OutOfBounds(String),
    #[error("no move to undo")]
    EmptyHistory,
    #[error("cannot parse move {0:?}")]
    InvalidMoveText(String),
    #[error("cannot parse board diagram: {0}")]
    InvalidDiagram(String),
}
