//! Plain-text board diagrams for terminals, tests and saved positions.
//!
//! Othello: eight lines of `B`, `W` or `.` from row 0 down, then a line with
//! the side to move (`B` or `W`), followed by the pending pass count when it
//! is not zero (`W 1`).
//!
//! Checkers: eight lines from row `H` down to row `A`, with `b`/`w` for men,
//! `B`/`W` for kings and `.` for empty playable cells; unplayable squares are
//! drawn as `-`. The last line holds the side to move.
//!
//! Parsing rebuilds every incremental counter, so a rendered board parses
//! back to an identical position. Move history is not part of a diagram;
//! `GameBoard::from_history` restores it by replaying the moves.

use crate::checkers::checkers_board::CheckersBoard;
use crate::checkers::checkers_move::Location;
use crate::checkers::checkers_rules::{mask, CellSet, BOARD_WIDTH};
use crate::game::board_errors::BoardError;
use crate::game::color::Color;
use crate::game::game_board::GameBoard;
use crate::othello::othello_board::OthelloBoard;
use crate::othello::othello_rules::{square, DIM, NUM_SQUARES};

pub fn render_checkers(board: &CheckersBoard) -> String {
    let mut out = String::new();
    for row in (0..BOARD_WIDTH).rev() {
        for col in 0..BOARD_WIDTH {
            let ch = match Location::new(row, col).cell() {
                None => '-',
                Some(cell) => match board.piece_at(cell) {
                    None => '.',
                    Some((Color::Black, false)) => 'b',
                    Some((Color::Black, true)) => 'B',
                    Some((Color::White, false)) => 'w',
                    Some((Color::White, true)) => 'W',
                },
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out.push(board.whose_move().to_char());
    out
}

pub fn parse_checkers(text: &str) -> Result<CheckersBoard, BoardError> {
    let (rows, whose_move, counter) = split_diagram(text)?;
    if !counter.is_empty() {
        return Err(BoardError::InvalidDiagram(format!(
            "unexpected {counter:?} after side to move"
        )));
    }
    let (mut black, mut white, mut kings): (CellSet, CellSet, CellSet) = (0, 0, 0);

    for (line_idx, line) in rows.iter().enumerate() {
        let row = BOARD_WIDTH - 1 - line_idx as u8;
        for (col, ch) in line.chars().enumerate() {
            let loc = Location::new(row, col as u8);
            let Some(cell) = loc.cell() else {
                continue;
            };
            let m = mask(cell);
            match ch {
                '.' => {}
                'b' => black |= m,
                'w' => white |= m,
                'B' => {
                    black |= m;
                    kings |= m;
                }
                'W' => {
                    white |= m;
                    kings |= m;
                }
                other => {
                    return Err(BoardError::InvalidDiagram(format!(
                        "unexpected {other:?} on {loc}"
                    )))
                }
            }
        }
    }

    CheckersBoard::from_parts(black, white, kings, whose_move)
}

pub fn render_othello(board: &OthelloBoard) -> String {
    let mut out = String::new();
    for row in 0..DIM {
        for col in 0..DIM {
            out.push(match board.cell(row, col) {
                Some(color) => color.to_char(),
                None => '.',
            });
        }
        out.push('\n');
    }
    out.push(board.whose_move().to_char());
    if board.pass_count() > 0 {
        out.push_str(&format!(" {}", board.pass_count()));
    }
    out
}

pub fn parse_othello(text: &str) -> Result<OthelloBoard, BoardError> {
    let (rows, whose_move, counter) = split_diagram(text)?;
    let pass_count = match counter {
        "" => 0,
        text => text
            .parse::<u8>()
            .ok()
            .filter(|count| *count <= 2)
            .ok_or_else(|| BoardError::InvalidDiagram(format!("bad pass count {text:?}")))?,
    };
    let mut cells = [None; NUM_SQUARES];

    for (row, line) in rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            cells[square(row, col) as usize] = match ch {
                '.' => None,
                other => Some(Color::from_char(other).ok_or_else(|| {
                    BoardError::InvalidDiagram(format!("unexpected {other:?} at ({row}, {col})"))
                })?),
            };
        }
    }

    Ok(OthelloBoard::from_parts(cells, whose_move, pass_count))
}

/// Eight 8-character board lines plus the side-to-move line. Returns the
/// board lines, the side to move and whatever follows it on that line.
fn split_diagram(text: &str) -> Result<(Vec<&str>, Color, &str), BoardError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() != DIM + 1 {
        return Err(BoardError::InvalidDiagram(format!(
            "expected {} lines, found {}",
            DIM + 1,
            lines.len()
        )));
    }
    if let Some(bad) = lines[..DIM].iter().find(|line| line.chars().count() != DIM) {
        return Err(BoardError::InvalidDiagram(format!(
            "board line {bad:?} is not {DIM} wide"
        )));
    }

    let side_line = lines[DIM];
    let (side, counter) = side_line
        .split_once(char::is_whitespace)
        .unwrap_or((side_line, ""));
    let mut side_chars = side.chars();
    let whose_move = match (side_chars.next().and_then(Color::from_char), side_chars.next()) {
        (Some(color), None) => color,
        _ => {
            return Err(BoardError::InvalidDiagram(format!(
                "bad side-to-move line {side_line:?}"
            )))
        }
    };

    Ok((lines[..DIM].to_vec(), whose_move, counter.trim()))
}
