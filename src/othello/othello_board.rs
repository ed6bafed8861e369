//! Incremental Othello position with make/undo support.
//!
//! Besides the discs, the board keeps a running positional weight (the sum of
//! each disc's square weight, signed by owner) so evaluation is O(1). Every
//! placement and flip adjusts that sum, and undo replays the recorded flip
//! run lengths in reverse without rescanning the board.

use std::fmt;

use crate::game::board_errors::BoardError;
use crate::game::color::Color;
use crate::game::game_board::{GameBoard, WIN_VALUE};
use crate::othello::othello_move::OthelloMove;
use crate::othello::othello_move_generator::generate_moves;
use crate::othello::othello_rules::*;
use crate::utils::diagram::render_othello;

/// Everything `undo_last_move` needs to reverse one applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OthelloUndoState {
    pub mv: OthelloMove,
    /// Discs flipped in each of the eight `DIRECTIONS`.
    pub flips: [u8; 8],
    pub prev_pass_count: u8,
}

/// Transposition key: two bits per square, side to move and pass counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OthelloKey {
    pub cells: u128,
    pub whose_move: Color,
    pub pass_count: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OthelloBoard {
    cells: [Option<Color>; NUM_SQUARES],
    whose_move: Color,
    pass_count: u8,
    weight: i64,
    rules: OthelloRules,
    weights: [i32; NUM_SQUARES],
    undo_stack: Vec<OthelloUndoState>,
}

impl Default for OthelloBoard {
    fn default() -> Self {
        Self::new_game()
    }
}

impl OthelloBoard {
    /// Build a position from raw square contents, deriving the weight sum.
    pub fn from_parts(
        cells: [Option<Color>; NUM_SQUARES],
        whose_move: Color,
        pass_count: u8,
    ) -> Self {
        let rules = OthelloRules::default();
        let mut board = Self {
            cells,
            whose_move,
            pass_count,
            weight: 0,
            rules,
            weights: rules.weight_table(),
            undo_stack: Vec::new(),
        };
        board.recalc_weight();
        board
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<Color> {
        self.cells[square(row, col) as usize]
    }

    pub fn disc_count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    /// Consecutive passes leading up to this position.
    #[inline]
    pub fn pass_count(&self) -> u8 {
        self.pass_count
    }

    /// Running positional weight, positive favoring Black.
    #[inline]
    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn move_history(&self) -> impl Iterator<Item = &OthelloMove> {
        self.undo_stack.iter().map(|undo| &undo.mv)
    }

    /// Rebuild the positional weight sum from scratch in O(board size).
    pub fn recalc_weight(&mut self) {
        self.weight = self
            .cells
            .iter()
            .zip(self.weights.iter())
            .filter_map(|(cell, weight)| cell.map(|color| color.sign() * i64::from(*weight)))
            .sum();
    }

    /// Length of the opponent run `mover` would flip from `(row, col)` in
    /// each direction; zero where the run is not capped by a `mover` disc.
    pub fn flip_runs(&self, row: usize, col: usize, mover: Color) -> [u8; 8] {
        let opponent = Some(mover.opposite());
        let mut runs = [0u8; 8];
        for (run, &dir) in runs.iter_mut().zip(DIRECTIONS.iter()) {
            let mut count = 0u8;
            let mut at = step(row, col, dir);
            while let Some((r, c)) = at {
                if self.cell(r, c) != opponent {
                    break;
                }
                count += 1;
                at = step(r, c, dir);
            }
            if let Some((r, c)) = at {
                if self.cell(r, c) == Some(mover) {
                    *run = count;
                }
            }
        }
        runs
    }

    #[inline]
    fn set_cell(&mut self, row: usize, col: usize, color: Option<Color>) {
        self.cells[square(row, col) as usize] = color;
    }

    #[inline]
    fn square_weight(&self, row: usize, col: usize) -> i64 {
        i64::from(self.weights[square(row, col) as usize])
    }

    /// Walk `runs` outward from `(row, col)`, giving every disc to `owner`
    /// and shifting the weight sum by twice its square weight.
    fn flip(&mut self, row: usize, col: usize, runs: &[u8; 8], owner: Color) {
        for (&count, &dir) in runs.iter().zip(DIRECTIONS.iter()) {
            let mut at = (row, col);
            for _ in 0..count {
                // The run was measured on this board, so it stays in bounds.
                let Some(next) = step(at.0, at.1, dir) else {
                    break;
                };
                at = next;
                self.set_cell(at.0, at.1, Some(owner));
                self.weight += 2 * owner.sign() * self.square_weight(at.0, at.1);
            }
        }
    }
}

impl GameBoard for OthelloBoard {
    type Move = OthelloMove;
    type Key = OthelloKey;
    type Rules = OthelloRules;

    fn new_game() -> Self {
        let mut cells = [None; NUM_SQUARES];
        let mid = DIM / 2;
        cells[square(mid - 1, mid - 1) as usize] = Some(Color::White);
        cells[square(mid, mid) as usize] = Some(Color::White);
        cells[square(mid - 1, mid) as usize] = Some(Color::Black);
        cells[square(mid, mid - 1) as usize] = Some(Color::Black);
        Self::from_parts(cells, Color::Black, 0)
    }

    fn apply_move(&mut self, mv: OthelloMove) -> Result<(), BoardError> {
        let mover = self.whose_move;
        let prev_pass_count = self.pass_count;
        let mut flips = [0u8; 8];

        match mv {
            OthelloMove::Pass => {
                self.pass_count = self.pass_count.saturating_add(1);
            }
            OthelloMove::Place { row, col } => {
                let (row, col) = (row as usize, col as usize);
                if row >= DIM || col >= DIM {
                    return Err(BoardError::OutOfBounds(mv.to_string()));
                }
                if self.cell(row, col).is_some() {
                    return Err(BoardError::OccupiedDestination(mv.to_string()));
                }
                flips = self.flip_runs(row, col, mover);
                if flips.iter().all(|&count| count == 0) {
                    return Err(BoardError::NoFlips(mv.to_string()));
                }

                self.set_cell(row, col, Some(mover));
                self.weight += mover.sign() * self.square_weight(row, col);
                self.flip(row, col, &flips, mover);
                self.pass_count = 0;
            }
        }

        self.undo_stack.push(OthelloUndoState {
            mv,
            flips,
            prev_pass_count,
        });
        self.whose_move = mover.opposite();
        Ok(())
    }

    fn undo_last_move(&mut self) -> Result<OthelloMove, BoardError> {
        let undo = self.undo_stack.pop().ok_or(BoardError::EmptyHistory)?;
        let mover = self.whose_move.opposite();

        if let OthelloMove::Place { row, col } = undo.mv {
            let (row, col) = (row as usize, col as usize);
            self.set_cell(row, col, None);
            self.weight -= mover.sign() * self.square_weight(row, col);
            self.flip(row, col, &undo.flips, self.whose_move);
        }

        self.pass_count = undo.prev_pass_count;
        self.whose_move = mover;
        Ok(undo.mv)
    }

    fn all_moves(&self) -> Vec<OthelloMove> {
        generate_moves(self)
    }

    fn value(&self) -> i64 {
        if self.pass_count < 2 {
            return self.weight;
        }
        let total: i64 = self.cells.iter().flatten().map(|color| color.sign()).sum();
        WIN_VALUE * total.signum()
    }

    fn key(&self) -> OthelloKey {
        let cells = self.cells.iter().fold(0u128, |acc, cell| {
            let bits = match cell {
                None => 0,
                Some(Color::Black) => 1,
                Some(Color::White) => 2,
            };
            acc << 2 | bits
        });
        OthelloKey {
            cells,
            whose_move: self.whose_move,
            pass_count: self.pass_count,
        }
    }

    #[inline]
    fn whose_move(&self) -> Color {
        self.whose_move
    }

    fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    fn last_move(&self) -> Option<&OthelloMove> {
        self.undo_stack.last().map(|undo| &undo.mv)
    }

    fn rules(&self) -> OthelloRules {
        self.rules
    }

    fn set_rules(&mut self, rules: OthelloRules) {
        self.rules = rules;
        self.weights = rules.weight_table();
        self.recalc_weight();
    }
}

impl fmt::Display for OthelloBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_othello(self))
    }
}
