//! Checkers board geometry and evaluation weights.
//!
//! Only the 32 dark cells are playable. Rows run `A` (Black's home row) to
//! `H` (White's home row); row `r` holds the 1-based columns `(r % 2) + 1`,
//! `+2`, ... so `A1`, `A3`, `B2`, ... are the playable cells. Cell indices run
//! in board order, `index = row * 4 + col / 2`.

use crate::game::color::Color;
use crate::game::game_board::{parse_weight, GameRules};

pub const NUM_CELLS: usize = 32;
pub const BOARD_WIDTH: u8 = 8;
pub const STARTING_PIECES: u8 = 12;
pub const STARTING_HOME_PIECES: u8 = 4;

/// Playable cell index (`0..32`).
pub type Cell = u8;

/// Bit set over the 32 playable cells.
pub type CellSet = u32;

/// Home row of Black (row `A`); White men crown here.
pub const BLACK_HOME_ROW: CellSet = 0x0000_000F;
/// Home row of White (row `H`); Black men crown here.
pub const WHITE_HOME_ROW: CellSet = 0xF000_0000;

pub const BLACK_START: CellSet = 0x0000_0FFF;
pub const WHITE_START: CellSet = 0xFFF0_0000;

/// Diagonal direction, "up" meaning toward row `H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    DownLeft,
    DownRight,
    UpLeft,
    UpRight,
}

impl Diagonal {
    #[inline]
    const fn index(self) -> usize {
        match self {
            Diagonal::DownLeft => 0,
            Diagonal::DownRight => 1,
            Diagonal::UpLeft => 2,
            Diagonal::UpRight => 3,
        }
    }

    const fn delta(self) -> (i8, i8) {
        match self {
            Diagonal::DownLeft => (-1, -1),
            Diagonal::DownRight => (-1, 1),
            Diagonal::UpLeft => (1, -1),
            Diagonal::UpRight => (1, 1),
        }
    }
}

const KING_DIRECTIONS: [Diagonal; 4] = [
    Diagonal::DownLeft,
    Diagonal::DownRight,
    Diagonal::UpLeft,
    Diagonal::UpRight,
];
const BLACK_DIRECTIONS: [Diagonal; 2] = [Diagonal::UpLeft, Diagonal::UpRight];
const WHITE_DIRECTIONS: [Diagonal; 2] = [Diagonal::DownLeft, Diagonal::DownRight];

/// Directions a piece may travel: kings go all four ways, men only forward.
#[inline]
pub fn piece_directions(color: Color, is_king: bool) -> &'static [Diagonal] {
    if is_king {
        &KING_DIRECTIONS
    } else {
        match color {
            Color::Black => &BLACK_DIRECTIONS,
            Color::White => &WHITE_DIRECTIONS,
        }
    }
}

const fn build_neighbors() -> [[Option<Cell>; 4]; NUM_CELLS] {
    let mut table = [[None; 4]; NUM_CELLS];
    let dirs = KING_DIRECTIONS;
    let mut cell = 0;
    while cell < NUM_CELLS {
        let row = (cell / 4) as i8;
        let col = ((cell % 4) * 2 + (cell / 4) % 2) as i8;
        let mut d = 0;
        while d < 4 {
            let (dr, dc) = dirs[d].delta();
            let r = row + dr;
            let c = col + dc;
            if r >= 0 && r < BOARD_WIDTH as i8 && c >= 0 && c < BOARD_WIDTH as i8 {
                table[cell][dirs[d].index()] = Some((r as usize * 4 + c as usize / 2) as Cell);
            }
            d += 1;
        }
        cell += 1;
    }
    table
}

static NEIGHBORS: [[Option<Cell>; 4]; NUM_CELLS] = build_neighbors();

/// Adjacent playable cell in `dir`, or `None` off the board.
#[inline]
pub fn neighbor(cell: Cell, dir: Diagonal) -> Option<Cell> {
    NEIGHBORS[cell as usize][dir.index()]
}

#[inline]
pub const fn mask(cell: Cell) -> CellSet {
    1 << cell
}

/// Row on which a man of `color` is crowned.
#[inline]
pub const fn crowning_row(color: Color) -> CellSet {
    match color {
        Color::Black => WHITE_HOME_ROW,
        Color::White => BLACK_HOME_ROW,
    }
}

#[inline]
pub const fn home_row(color: Color) -> CellSet {
    match color {
        Color::Black => BLACK_HOME_ROW,
        Color::White => WHITE_HOME_ROW,
    }
}

/// Evaluation weights for checkers, all from Black's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckersRules {
    /// Value of every piece on the board.
    pub piece_weight: i32,
    /// Bonus on top of `piece_weight` for a crowned piece.
    pub king_weight: i32,
    /// Bonus for each piece still guarding its own home row.
    pub back_row_weight: i32,
}

impl Default for CheckersRules {
    fn default() -> Self {
        Self {
            piece_weight: 100,
            king_weight: 60,
            back_row_weight: 10,
        }
    }
}

impl GameRules for CheckersRules {
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        let weight = parse_weight(name, value)?;
        match name.to_ascii_lowercase().as_str() {
            "pieceweight" => self.piece_weight = weight,
            "kingweight" => self.king_weight = weight,
            "backrowweight" => self.back_row_weight = weight,
            _ => return Err(format!("unknown checkers option: {name}")),
        }
        Ok(())
    }

    fn options(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("PieceWeight", i64::from(self.piece_weight)),
            ("KingWeight", i64::from(self.king_weight)),
            ("BackRowWeight", i64::from(self.back_row_weight)),
        ]
    }
}
