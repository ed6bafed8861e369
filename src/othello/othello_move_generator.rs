//! Othello legal move scan.
//!
//! An empty square is legal when, in at least one direction, a run of one or
//! more opponent discs is capped by a disc of the side to move. With no legal
//! square the only move is a pass, unless both sides have already passed in
//! a row, in which case the game is over.

use crate::game::color::Color;
use crate::game::game_board::GameBoard;
use crate::othello::othello_board::OthelloBoard;
use crate::othello::othello_move::OthelloMove;
use crate::othello::othello_rules::{step, DIM, DIRECTIONS};

pub fn generate_moves(board: &OthelloBoard) -> Vec<OthelloMove> {
    if board.pass_count() >= 2 {
        return Vec::new();
    }

    let mover = board.whose_move();
    let mut moves = Vec::new();
    for row in 0..DIM {
        for col in 0..DIM {
            if board.cell(row, col).is_none() && is_legal_square(board, row, col, mover) {
                moves.push(OthelloMove::place(row as u8, col as u8));
            }
        }
    }

    if moves.is_empty() {
        moves.push(OthelloMove::Pass);
    }
    moves
}

/// Whether `mover` may place on the empty square `(row, col)`. Stops at the
/// first qualifying direction.
pub fn is_legal_square(board: &OthelloBoard, row: usize, col: usize, mover: Color) -> bool {
    let opponent = Some(mover.opposite());
    DIRECTIONS.iter().any(|&dir| {
        let mut steps = 0;
        let mut at = step(row, col, dir);
        while let Some((r, c)) = at {
            steps += 1;
            if board.cell(r, c) != opponent {
                return steps >= 2 && board.cell(r, c) == Some(mover);
            }
            at = step(r, c, dir);
        }
        false
    })
}

#[cfg(test)]
mod tests {
    use super::{generate_moves, is_legal_square};
    use crate::game::color::Color;
    use crate::game::game_board::GameBoard;
    use crate::othello::othello_board::OthelloBoard;
    use crate::othello::othello_move::OthelloMove;
    use crate::utils::diagram::parse_othello;

    #[test]
    fn adjacent_own_disc_does_not_qualify() {
        let board = OthelloBoard::new_game();
        // (3, 5) touches a Black disc directly to the west: no run to flip.
        assert!(!is_legal_square(&board, 3, 5, Color::Black));
        assert!(is_legal_square(&board, 4, 5, Color::Black));
    }

    #[test]
    fn generated_moves_agree_with_flip_runs() {
        let mut board = OthelloBoard::new_game();
        for mv in [OthelloMove::place(2, 3), OthelloMove::place(2, 2), OthelloMove::place(3, 2)] {
            board.apply_move(mv).expect("legal");
        }
        for mv in generate_moves(&board) {
            let OthelloMove::Place { row, col } = mv else {
                panic!("position has placements available");
            };
            let runs = board.flip_runs(row as usize, col as usize, board.whose_move());
            assert!(runs.iter().any(|&n| n > 0), "{mv} flips nothing");
        }
    }

    #[test]
    fn full_board_passes_then_ends() {
        let mut board = parse_othello(
            "\
BBBBBBBB
BBBBBBBB
BBBBBBBB
BBBBBBBB
WWWWWWWW
WWWWWWWW
WWWWWWWW
WWWWWWWW
B",
        )
        .expect("diagram should parse");
        assert_eq!(generate_moves(&board), vec![OthelloMove::Pass]);
        board.apply_move(OthelloMove::Pass).expect("pass");
        board.apply_move(OthelloMove::Pass).expect("pass");
        assert!(generate_moves(&board).is_empty());
        assert_eq!(board.value(), 0);
    }
}
