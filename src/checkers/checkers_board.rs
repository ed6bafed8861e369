//! Incremental checkers position with make/undo support.
//!
//! Occupancy is kept as three 32-bit cell sets (Black, White, crowned) plus
//! per-side piece/king/home-row counters that are updated on every take and
//! put, so evaluation never rescans the board.

use std::fmt;

use crate::checkers::checkers_move::{CheckersMove, Location};
use crate::checkers::checkers_move_generator::generate_moves;
use crate::checkers::checkers_rules::*;
use crate::game::board_errors::BoardError;
use crate::game::color::Color;
use crate::game::game_board::{GameBoard, WIN_VALUE};
use crate::utils::diagram::render_checkers;

/// Incrementally maintained tallies for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideCounts {
    pub pieces: u8,
    pub kings: u8,
    /// Pieces standing on their own home row.
    pub home: u8,
}

/// Everything `undo_last_move` needs to reverse one applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckersUndoState {
    pub mv: CheckersMove,
    /// Captured cells in capture order, with their crowned flag.
    pub captured: Vec<(Cell, bool)>,
    pub was_king: bool,
    pub promoted: bool,
}

/// Transposition key: occupancy, crowns and side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckersKey {
    pub black: CellSet,
    pub white: CellSet,
    pub kings: CellSet,
    pub whose_move: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckersBoard {
    pub(crate) black: CellSet,
    pub(crate) white: CellSet,
    pub(crate) kings: CellSet,
    whose_move: Color,
    counts: [SideCounts; 2],
    rules: CheckersRules,
    undo_stack: Vec<CheckersUndoState>,
}

/// Result of validating a move against the current position.
struct MovePlan {
    origin: Cell,
    destination: Cell,
    captured: Vec<Cell>,
    is_king: bool,
    crowned: bool,
}

impl Default for CheckersBoard {
    fn default() -> Self {
        Self::new_game()
    }
}

impl CheckersBoard {
    /// Build a position from raw cell sets, deriving every counter.
    pub fn from_parts(
        black: CellSet,
        white: CellSet,
        kings: CellSet,
        whose_move: Color,
    ) -> Result<Self, BoardError> {
        if black & white != 0 {
            return Err(BoardError::InvalidDiagram(
                "a cell cannot hold both colors".to_owned(),
            ));
        }
        if kings & !(black | white) != 0 {
            return Err(BoardError::InvalidDiagram(
                "crowned cells must be occupied".to_owned(),
            ));
        }
        let counts = [
            derive_counts(black, kings, Color::Black),
            derive_counts(white, kings, Color::White),
        ];
        Ok(Self {
            black,
            white,
            kings,
            whose_move,
            counts,
            rules: CheckersRules::default(),
            undo_stack: Vec::new(),
        })
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> CellSet {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    #[inline]
    pub fn kings(&self) -> CellSet {
        self.kings
    }

    #[inline]
    pub fn counts(&self, color: Color) -> SideCounts {
        self.counts[color.index()]
    }

    /// Color and crowned flag of the piece on `cell`, if any.
    pub fn piece_at(&self, cell: Cell) -> Option<(Color, bool)> {
        let m = mask(cell);
        let king = self.kings & m != 0;
        if self.black & m != 0 {
            Some((Color::Black, king))
        } else if self.white & m != 0 {
            Some((Color::White, king))
        } else {
            None
        }
    }

    pub fn move_history(&self) -> impl Iterator<Item = &CheckersMove> {
        self.undo_stack.iter().map(|undo| &undo.mv)
    }

    #[inline]
    fn occupancy_mut(&mut self, color: Color) -> &mut CellSet {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    /// Remove the `color` piece on `cell`, returning whether it was crowned.
    fn half_take(&mut self, cell: Cell, color: Color) -> bool {
        let m = mask(cell);
        let was_king = self.kings & m != 0;
        *self.occupancy_mut(color) &= !m;
        self.kings &= !m;

        let counts = &mut self.counts[color.index()];
        counts.pieces -= 1;
        if was_king {
            counts.kings -= 1;
        }
        if home_row(color) & m != 0 {
            counts.home -= 1;
        }
        was_king
    }

    fn half_put(&mut self, cell: Cell, color: Color, king: bool) {
        let m = mask(cell);
        *self.occupancy_mut(color) |= m;

        let counts = &mut self.counts[color.index()];
        counts.pieces += 1;
        if king {
            self.kings |= m;
            counts.kings += 1;
        }
        if home_row(color) & m != 0 {
            counts.home += 1;
        }
    }

    fn plan_move(&self, mv: &CheckersMove) -> Result<MovePlan, BoardError> {
        let mover = self.whose_move;
        let locs = mv.locations();
        if locs.len() < 2 || (!mv.is_jump() && locs.len() != 2) {
            return Err(BoardError::MalformedMove(mv.to_string()));
        }

        let origin = cell_of(locs[0])?;
        if self.occupancy(mover) & mask(origin) == 0 {
            return Err(BoardError::MissingPiece(locs[0].to_string()));
        }
        let is_king = self.kings & mask(origin) != 0;

        // The mover leaves its origin, so a king's chain may pass back over it.
        let mut occupied = (self.black | self.white) & !mask(origin);
        let mut opponents = self.occupancy(mover.opposite());
        let mut captured = Vec::new();
        let mut crowned = false;

        for pair in locs.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if crowned {
                return Err(BoardError::PromotionMidChain(from.to_string()));
            }
            let cell = cell_of(to)?;
            if occupied & mask(cell) != 0 {
                return Err(BoardError::OccupiedDestination(to.to_string()));
            }

            let (dr, dc) = from.delta_to(to);
            if !is_king {
                let forward = match mover {
                    Color::Black => dr > 0,
                    Color::White => dr < 0,
                };
                if !forward {
                    return Err(BoardError::WrongDirection {
                        from: from.to_string(),
                        to: to.to_string(),
                    });
                }
            }

            let expected = if mv.is_jump() { 2 } else { 1 };
            if dr.abs() != expected || dc.abs() != expected {
                return Err(BoardError::InvalidStep {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }

            if mv.is_jump() {
                let over = Location::new(
                    (from.row as i8 + dr / 2) as u8,
                    (from.col as i8 + dc / 2) as u8,
                );
                let over = cell_of(over)?;
                if opponents & mask(over) == 0 {
                    return Err(BoardError::MissingCapture(to.to_string()));
                }
                opponents &= !mask(over);
                occupied &= !mask(over);
                captured.push(over);
            }

            if !is_king && crowning_row(mover) & mask(cell) != 0 {
                crowned = true;
            }
        }

        Ok(MovePlan {
            origin,
            destination: cell_of(mv.destination())?,
            captured,
            is_king,
            crowned,
        })
    }
}

#[inline]
fn cell_of(loc: Location) -> Result<Cell, BoardError> {
    loc.cell()
        .ok_or_else(|| BoardError::OutOfBounds(loc.to_string()))
}

fn derive_counts(pieces: CellSet, kings: CellSet, color: Color) -> SideCounts {
    SideCounts {
        pieces: pieces.count_ones() as u8,
        kings: (pieces & kings).count_ones() as u8,
        home: (pieces & home_row(color)).count_ones() as u8,
    }
}

impl GameBoard for CheckersBoard {
    type Move = CheckersMove;
    type Key = CheckersKey;
    type Rules = CheckersRules;

    fn new_game() -> Self {
        let start = SideCounts {
            pieces: STARTING_PIECES,
            kings: 0,
            home: STARTING_HOME_PIECES,
        };
        Self {
            black: BLACK_START,
            white: WHITE_START,
            kings: 0,
            whose_move: Color::Black,
            counts: [start, start],
            rules: CheckersRules::default(),
            undo_stack: Vec::new(),
        }
    }

    fn apply_move(&mut self, mv: CheckersMove) -> Result<(), BoardError> {
        let plan = self.plan_move(&mv)?;
        let mover = self.whose_move;
        let opponent = mover.opposite();

        self.half_take(plan.origin, mover);
        let captured = plan
            .captured
            .iter()
            .map(|&cell| (cell, self.half_take(cell, opponent)))
            .collect();
        self.half_put(plan.destination, mover, plan.is_king || plan.crowned);

        self.undo_stack.push(CheckersUndoState {
            mv,
            captured,
            was_king: plan.is_king,
            promoted: plan.crowned,
        });
        self.whose_move = opponent;

        debug_assert_eq!(self.black & self.white, 0);
        Ok(())
    }

    fn undo_last_move(&mut self) -> Result<CheckersMove, BoardError> {
        let undo = self.undo_stack.pop().ok_or(BoardError::EmptyHistory)?;
        let mover = self.whose_move.opposite();
        let opponent = self.whose_move;

        self.half_take(cell_of(undo.mv.destination())?, mover);
        for &(cell, was_king) in undo.captured.iter().rev() {
            self.half_put(cell, opponent, was_king);
        }
        self.half_put(cell_of(undo.mv.origin())?, mover, undo.was_king);
        self.whose_move = mover;

        Ok(undo.mv)
    }

    fn all_moves(&self) -> Vec<CheckersMove> {
        generate_moves(self)
    }

    fn value(&self) -> i64 {
        let black = self.counts[Color::Black.index()];
        let white = self.counts[Color::White.index()];
        match (black.pieces, white.pieces) {
            (0, 0) => 0,
            (_, 0) => WIN_VALUE,
            (0, _) => -WIN_VALUE,
            _ => {
                let diff = |f: fn(&SideCounts) -> u8| i64::from(f(&black)) - i64::from(f(&white));
                i64::from(self.rules.piece_weight) * diff(|c| c.pieces)
                    + i64::from(self.rules.king_weight) * diff(|c| c.kings)
                    + i64::from(self.rules.back_row_weight) * diff(|c| c.home)
            }
        }
    }

    fn key(&self) -> CheckersKey {
        CheckersKey {
            black: self.black,
            white: self.white,
            kings: self.kings,
            whose_move: self.whose_move,
        }
    }

    #[inline]
    fn whose_move(&self) -> Color {
        self.whose_move
    }

    fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    fn last_move(&self) -> Option<&CheckersMove> {
        self.undo_stack.last().map(|undo| &undo.mv)
    }

    fn rules(&self) -> CheckersRules {
        self.rules
    }

    fn set_rules(&mut self, rules: CheckersRules) {
        // Evaluation reads the counters directly; nothing cached to rebuild.
        self.rules = rules;
    }
}

impl fmt::Display for CheckersBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_checkers(self))
    }
}
