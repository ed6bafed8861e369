//! Leaf counting over apply/undo, for validating move generation.

use crate::game::board_errors::BoardError;
use crate::game::game_board::GameBoard;

/// Number of leaf positions `depth` plies below `board`. Terminal positions
/// reached early count as one leaf.
pub fn perft<B: GameBoard>(board: &mut B, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = board.all_moves();
    if moves.is_empty() {
        return Ok(1);
    }
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in moves {
        board.apply_move(mv)?;
        let sub = perft(board, depth - 1);
        board.undo_last_move()?;
        nodes += sub?;
    }
    Ok(nodes)
}

/// Per-root-move leaf counts, in generation order.
pub fn perft_divide<B: GameBoard>(
    board: &mut B,
    depth: u32,
) -> Result<Vec<(B::Move, u64)>, BoardError> {
    let mut out = Vec::new();
    for mv in board.all_moves() {
        board.apply_move(mv)?;
        let sub = perft(board, depth.saturating_sub(1));
        let mv = board.undo_last_move()?;
        out.push((mv, sub?));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::checkers_board::CheckersBoard;
    use crate::othello::othello_board::OthelloBoard;

    #[test]
    fn checkers_start_counts() {
        let mut board = CheckersBoard::new_game();
        let counts: Vec<u64> = (1..=5)
            .map(|d| perft(&mut board, d).expect("perft runs"))
            .collect();
        assert_eq!(counts, vec![7, 49, 302, 1469, 7361]);
        assert_eq!(board, CheckersBoard::new_game());
    }

    #[test]
    fn othello_start_counts() {
        let mut board = OthelloBoard::new_game();
        let counts: Vec<u64> = (1..=5)
            .map(|d| perft(&mut board, d).expect("perft runs"))
            .collect();
        assert_eq!(counts, vec![4, 12, 56, 244, 1396]);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = CheckersBoard::new_game();
        let divided = perft_divide(&mut board, 3).expect("perft runs");
        assert_eq!(divided.len(), 7);
        let total: u64 = divided.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&mut board, 3).expect("perft runs"));
    }
}
