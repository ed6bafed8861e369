//! Crate root module declarations for the Plum Minimax game engine.
//!
//! A generic two-player minimax search with a transposition book, plus the
//! two games it plays (checkers and Othello), engines built on top of the
//! search, a text protocol front-end and utility helpers.

pub mod game {
    pub mod board_errors;
    pub mod color;
    pub mod game_board;
}

pub mod checkers {
    pub mod checkers_board;
    pub mod checkers_move;
    pub mod checkers_move_generator;
    pub mod checkers_rules;
}

pub mod othello {
    pub mod othello_board;
    pub mod othello_move;
    pub mod othello_move_generator;
    pub mod othello_rules;
}

pub mod search {
    pub mod best_move;
    pub mod book;
    pub mod minimax;
    pub mod perft;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod protocol {
    pub mod text_loop;
}

pub mod utils {
    pub mod diagram;
    pub mod match_harness;
}
