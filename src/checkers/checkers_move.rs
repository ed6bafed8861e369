//! Checkers move representation and notation.
//!
//! A move is the ordered list of cells the moving piece visits: origin plus
//! one destination for a simple step, or origin plus every landing cell for a
//! jump chain. Whether a move is a jump is decided when it is built and never
//! changes afterwards.

use std::fmt;
use std::str::FromStr;

use crate::checkers::checkers_rules::{Cell, BOARD_WIDTH};
use crate::game::board_errors::BoardError;

/// Zero-based `(row, col)` coordinate. Row 0 prints as `A`, column 0 as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub row: u8,
    pub col: u8,
}

impl Location {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn from_cell(cell: Cell) -> Self {
        let row = cell / 4;
        Self {
            row,
            col: (cell % 4) * 2 + row % 2,
        }
    }

    /// Playable cell index, or `None` for an off-board or light square.
    #[inline]
    pub const fn cell(self) -> Option<Cell> {
        if self.row >= BOARD_WIDTH || self.col >= BOARD_WIDTH || (self.row + self.col) % 2 != 0 {
            None
        } else {
            Some(self.row * 4 + self.col / 2)
        }
    }

    /// Row and column distance to `other`, signed.
    #[inline]
    pub fn delta_to(self, other: Location) -> (i8, i8) {
        (
            other.row as i8 - self.row as i8,
            other.col as i8 - self.col as i8,
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'A' + self.row), self.col + 1)
    }
}

impl FromStr for Location {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(BoardError::InvalidMoveText(s.to_owned()));
        }
        let row = bytes[0].to_ascii_uppercase();
        let col = bytes[1];
        if !(b'A'..=b'H').contains(&row) || !(b'1'..=b'8').contains(&col) {
            return Err(BoardError::InvalidMoveText(s.to_owned()));
        }
        Ok(Location::new(row - b'A', col - b'1'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckersMove {
    locs: Vec<Location>,
    is_jump: bool,
}

impl CheckersMove {
    /// Single diagonal step.
    pub fn step(from: Location, to: Location) -> Self {
        Self {
            locs: vec![from, to],
            is_jump: false,
        }
    }

    /// Jump chain through `locs` (origin first).
    pub fn jump(locs: Vec<Location>) -> Self {
        Self {
            locs,
            is_jump: true,
        }
    }

    /// Build a move from a location list, classifying it by its first step.
    pub fn from_locations(locs: Vec<Location>) -> Result<Self, BoardError> {
        if locs.len() < 2 {
            return Err(BoardError::MalformedMove(format!(
                "a move needs at least two locations, got {}",
                locs.len()
            )));
        }
        let (dr, dc) = locs[0].delta_to(locs[1]);
        match (dr.abs(), dc.abs()) {
            (1, 1) if locs.len() == 2 => Ok(Self::step(locs[0], locs[1])),
            (1, 1) => Err(BoardError::MalformedMove(
                "a simple step cannot be continued".to_owned(),
            )),
            (2, 2) => Ok(Self::jump(locs)),
            _ => Err(BoardError::InvalidStep {
                from: locs[0].to_string(),
                to: locs[1].to_string(),
            }),
        }
    }

    #[inline]
    pub fn locations(&self) -> &[Location] {
        &self.locs
    }

    #[inline]
    pub fn is_jump(&self) -> bool {
        self.is_jump
    }

    #[inline]
    pub fn origin(&self) -> Location {
        self.locs[0]
    }

    #[inline]
    pub fn destination(&self) -> Location {
        self.locs[self.locs.len() - 1]
    }
}

impl fmt::Display for CheckersMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, loc) in self.locs.iter().enumerate() {
            if idx > 0 {
                f.write_str("->")?;
            }
            write!(f, "{loc}")?;
        }
        Ok(())
    }
}

impl FromStr for CheckersMove {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let locs = s
            .split("->")
            .map(str::parse::<Location>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| BoardError::InvalidMoveText(s.to_owned()))?;
        CheckersMove::from_locations(locs)
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckersMove, Location};
    use crate::game::board_errors::BoardError;

    #[test]
    fn location_notation_matches_cell_layout() {
        let c3 = Location::new(2, 2);
        assert_eq!(c3.to_string(), "C3");
        assert_eq!("c3".parse::<Location>(), Ok(c3));
        assert_eq!(c3.cell(), Some(9));
        assert_eq!(Location::from_cell(9), c3);
        // B1 is a light square.
        assert_eq!(Location::new(1, 0).cell(), None);
    }

    #[test]
    fn move_text_parses_steps_and_chains() {
        let step: CheckersMove = "C3->D4".parse().expect("step should parse");
        assert!(!step.is_jump());
        assert_eq!(step.to_string(), "C3->D4");

        let chain: CheckersMove = "C3->E5->G3".parse().expect("chain should parse");
        assert!(chain.is_jump());
        assert_eq!(chain.locations().len(), 3);
        assert_eq!(chain.destination(), Location::new(6, 2));
    }

    #[test]
    fn malformed_moves_are_rejected() {
        assert!(matches!(
            "C3".parse::<CheckersMove>(),
            Err(BoardError::MalformedMove(_))
        ));
        assert!(matches!(
            "C3->F6".parse::<CheckersMove>(),
            Err(BoardError::InvalidStep { .. })
        ));
        assert!(matches!(
            "C3->D4->E5".parse::<CheckersMove>(),
            Err(BoardError::MalformedMove(_))
        ));
        assert!(matches!(
            "Z9->D4".parse::<CheckersMove>(),
            Err(BoardError::InvalidMoveText(_))
        ));
    }
}
