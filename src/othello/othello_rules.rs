//! Othello board geometry and positional weights.

use crate::game::game_board::{parse_weight, GameRules};

pub const DIM: usize = 8;
pub const NUM_SQUARES: usize = DIM * DIM;

/// Row-major square index (`0..64`).
pub type Square = u8;

/// Row/column step of one of the eight scan directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

/// Scan order used for move application and undo records.
pub const DIRECTIONS: [Direction; 8] = [
    Direction { dr: 0, dc: 1 },
    Direction { dr: -1, dc: 1 },
    Direction { dr: -1, dc: 0 },
    Direction { dr: -1, dc: -1 },
    Direction { dr: 0, dc: -1 },
    Direction { dr: 1, dc: -1 },
    Direction { dr: 1, dc: 0 },
    Direction { dr: 1, dc: 1 },
];

#[inline]
pub const fn square(row: usize, col: usize) -> Square {
    (row * DIM + col) as Square
}

/// Neighbor of `(row, col)` in `dir`, or `None` off the board.
#[inline]
pub fn step(row: usize, col: usize, dir: Direction) -> Option<(usize, usize)> {
    let r = row as i8 + dir.dr;
    let c = col as i8 + dir.dc;
    let bounds = 0..DIM as i8;
    if bounds.contains(&r) && bounds.contains(&c) {
        Some((r as usize, c as usize))
    } else {
        None
    }
}

/// Static square weights, expanded into a per-square table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OthelloRules {
    pub corner_weight: i32,
    pub side_weight: i32,
    /// Squares on the second ring from the edge.
    pub near_side_weight: i32,
    pub inner_weight: i32,
}

impl Default for OthelloRules {
    fn default() -> Self {
        Self {
            corner_weight: 16,
            side_weight: 8,
            near_side_weight: 0,
            inner_weight: 1,
        }
    }
}

impl OthelloRules {
    /// Per-square weight table. The near-side ring takes precedence over the
    /// edges it crosses; corners are set last.
    pub fn weight_table(&self) -> [i32; NUM_SQUARES] {
        let mut table = [0; NUM_SQUARES];
        for row in 0..DIM {
            for col in 0..DIM {
                table[square(row, col) as usize] =
                    if row == 1 || col == 1 || row == DIM - 2 || col == DIM - 2 {
                        self.near_side_weight
                    } else if row == 0 || col == 0 || row == DIM - 1 || col == DIM - 1 {
                        self.side_weight
                    } else {
                        self.inner_weight
                    };
            }
        }
        for (row, col) in [(0, 0), (0, DIM - 1), (DIM - 1, 0), (DIM - 1, DIM - 1)] {
            table[square(row, col) as usize] = self.corner_weight;
        }
        table
    }
}

impl GameRules for OthelloRules {
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        let weight = parse_weight(name, value)?;
        match name.to_ascii_lowercase().as_str() {
            "cornerweight" => self.corner_weight = weight,
            "sideweight" => self.side_weight = weight,
            "nearsideweight" => self.near_side_weight = weight,
            "innerweight" => self.inner_weight = weight,
            _ => return Err(format!("unknown othello option: {name}")),
        }
        Ok(())
    }

    fn options(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("CornerWeight", i64::from(self.corner_weight)),
            ("SideWeight", i64::from(self.side_weight)),
            ("NearSideWeight", i64::from(self.near_side_weight)),
            ("InnerWeight", i64::from(self.inner_weight)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_classic_layout() {
        let table = OthelloRules::default().weight_table();
        let expected_rows: [[i32; DIM]; DIM] = [
            [16, 0, 8, 8, 8, 8, 0, 16],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [8, 0, 1, 1, 1, 1, 0, 8],
            [8, 0, 1, 1, 1, 1, 0, 8],
            [8, 0, 1, 1, 1, 1, 0, 8],
            [8, 0, 1, 1, 1, 1, 0, 8],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [16, 0, 8, 8, 8, 8, 0, 16],
        ];
        for (row, weights) in expected_rows.iter().enumerate() {
            for (col, weight) in weights.iter().enumerate() {
                assert_eq!(table[square(row, col) as usize], *weight, "({row}, {col})");
            }
        }
    }

    #[test]
    fn step_stops_at_the_edge() {
        assert_eq!(step(0, 0, DIRECTIONS[2]), None);
        assert_eq!(step(0, 0, DIRECTIONS[0]), Some((0, 1)));
        assert_eq!(step(7, 7, DIRECTIONS[7]), None);
    }

    #[test]
    fn set_option_rebuilds_weights() {
        let mut rules = OthelloRules::default();
        rules.set_option("CornerWeight", "40").expect("known option");
        assert_eq!(rules.weight_table()[0], 40);
        assert!(rules.set_option("EdgeWeight", "1").is_err());
    }
}
