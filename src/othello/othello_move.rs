use std::fmt;
use std::str::FromStr;

use crate::game::board_errors::BoardError;
use crate::othello::othello_rules::{square, Square, DIM};

/// One Othello ply: a disc placed on `(row, col)`, or a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OthelloMove {
    Place { row: u8, col: u8 },
    Pass,
}

impl OthelloMove {
    #[inline]
    pub const fn place(row: u8, col: u8) -> Self {
        OthelloMove::Place { row, col }
    }

    #[inline]
    pub const fn is_pass(self) -> bool {
        matches!(self, OthelloMove::Pass)
    }

    pub fn square(self) -> Option<Square> {
        match self {
            OthelloMove::Place { row, col } => Some(square(row as usize, col as usize)),
            OthelloMove::Pass => None,
        }
    }
}

impl fmt::Display for OthelloMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OthelloMove::Place { row, col } => write!(f, "[{row}, {col}]"),
            OthelloMove::Pass => f.write_str("Pass"),
        }
    }
}

/// Accepts `pass`, `[r, c]`, `r,c` and `r c`.
impl FromStr for OthelloMove {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.eq_ignore_ascii_case("pass") {
            return Ok(OthelloMove::Pass);
        }

        let inner = text.trim_start_matches('[').trim_end_matches(']');
        let coords: Vec<u8> = inner
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| BoardError::InvalidMoveText(s.to_owned()))?;

        match coords.as_slice() {
            [row, col] if (*row as usize) < DIM && (*col as usize) < DIM => {
                Ok(OthelloMove::place(*row, *col))
            }
            [_, _] => Err(BoardError::OutOfBounds(text.to_owned())),
            _ => Err(BoardError::InvalidMoveText(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OthelloMove;
    use crate::game::board_errors::BoardError;

    #[test]
    fn notation_round_trips_through_display() {
        let mv = OthelloMove::place(2, 3);
        assert_eq!(mv.to_string(), "[2, 3]");
        assert_eq!("[2, 3]".parse::<OthelloMove>(), Ok(mv));
        assert_eq!("2,3".parse::<OthelloMove>(), Ok(mv));
        assert_eq!("2 3".parse::<OthelloMove>(), Ok(mv));
        assert_eq!("PASS".parse::<OthelloMove>(), Ok(OthelloMove::Pass));
        assert_eq!(OthelloMove::Pass.to_string(), "Pass");
    }

    #[test]
    fn bad_text_is_rejected() {
        assert!(matches!(
            "[9, 0]".parse::<OthelloMove>(),
            Err(BoardError::OutOfBounds(_))
        ));
        assert!(matches!(
            "a1".parse::<OthelloMove>(),
            Err(BoardError::InvalidMoveText(_))
        ));
        assert!(matches!(
            "1".parse::<OthelloMove>(),
            Err(BoardError::InvalidMoveText(_))
        ));
    }
}
