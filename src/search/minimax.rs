//! Depth-bounded minimax over a floor/ceiling window with an optional book.
//!
//! One board is mutated in place for the whole search: every child is
//! reached with `apply_move` and left with `undo_last_move`, including on the
//! error path. Black is the maximizer in every game, so the side to move
//! *after* a ply decides whether its value raises the floor or lowers the
//! ceiling.

use thiserror::Error;
use tracing::trace;

use crate::game::board_errors::BoardError;
use crate::game::game_board::{GameBoard, WIN_VALUE};
use crate::search::best_move::BestMove;
use crate::search::book::{Book, DEFAULT_SAVE_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search depth must be at least 1, got {0}")]
    InvalidDepth(u32),
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u32,
    pub save_depth: u32,
    pub use_book: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            save_depth: DEFAULT_SAVE_DEPTH,
            use_book: true,
        }
    }
}

/// Search from the root with the full window.
pub fn search_best_move<B: GameBoard>(
    board: &mut B,
    depth: u32,
    book: Option<&mut Book<B::Key, B::Move>>,
) -> Result<BestMove<B::Move>, SearchError> {
    minimax(board, depth, -WIN_VALUE, WIN_VALUE, book)
}

pub fn minimax<B: GameBoard>(
    board: &mut B,
    depth: u32,
    mut floor: i64,
    mut ceiling: i64,
    mut book: Option<&mut Book<B::Key, B::Move>>,
) -> Result<BestMove<B::Move>, SearchError> {
    if depth < 1 {
        return Err(SearchError::InvalidDepth(depth));
    }

    let key = book.as_ref().map(|_| board.key());
    if let (Some(book), Some(key)) = (book.as_deref_mut(), key.as_ref()) {
        if let Some(mut hit) = book.probe(key, depth) {
            hit.boards_explored = 1;
            return Ok(hit);
        }
    }

    let moves = board.all_moves();
    let value = if moves.is_empty() {
        board.value()
    } else if board.whose_move().is_maximizer() {
        -WIN_VALUE + 1
    } else {
        WIN_VALUE - 1
    };
    let mut best = BestMove {
        value,
        best_move: None,
        best_reply: None,
        depth,
        boards_explored: 1,
        window_collision: false,
    };
    // True once some child moved the window; fallback picks don't count.
    let mut improved = false;

    for mv in moves {
        if floor >= ceiling {
            break;
        }

        board.apply_move(mv)?;
        let sub = if depth == 1 {
            BestMove::leaf(board.value())
        } else {
            match minimax(board, depth - 1, floor, ceiling, book.as_deref_mut()) {
                Ok(sub) => sub,
                Err(err) => {
                    board.undo_last_move()?;
                    return Err(err);
                }
            }
        };
        let maximizer_moved = !board.whose_move().is_maximizer();
        let mv = board.undo_last_move()?;
        best.boards_explored += sub.boards_explored;

        trace!(
            depth,
            value = sub.value,
            floor,
            ceiling,
            "move {mv} nets {}",
            sub.value
        );

        let raises = if maximizer_moved {
            sub.value > floor
        } else {
            sub.value < ceiling
        };
        if raises {
            if maximizer_moved {
                floor = sub.value;
            } else {
                ceiling = sub.value;
            }
            improved = true;
            best.value = sub.value;
            best.best_move = Some(mv);
            best.best_reply = sub.best_move;
        } else if best.best_move.is_none() {
            // Keep a real move even when nothing beats the window.
            best.value = sub.value;
            best.best_move = Some(mv);
            best.best_reply = sub.best_move;
        }
    }

    best.window_collision = floor >= ceiling;

    if let (Some(book), Some(key)) = (book, key) {
        if improved && !best.window_collision && best.best_move.is_some() {
            book.store(key, &best);
        }
    }

    Ok(best)
}
