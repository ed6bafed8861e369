//! Checkers move generation with mandatory captures.
//!
//! Cells are scanned in board order. Simple steps are collected until the
//! first jump anywhere on the board is found; from then on the collected
//! steps are discarded and only jump chains are kept. Each jump chain is
//! discovered by a depth-first search that tentatively performs every hop on
//! a scratch copy of the occupancy masks and restores it before trying the
//! next direction.

use crate::checkers::checkers_board::CheckersBoard;
use crate::checkers::checkers_move::{CheckersMove, Location};
use crate::checkers::checkers_rules::*;
use crate::game::color::Color;
use crate::game::game_board::GameBoard;

/// Occupancy the jump search is allowed to mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JumpScratch {
    own: CellSet,
    opponents: CellSet,
}

impl JumpScratch {
    #[inline]
    fn occupied(&self) -> CellSet {
        self.own | self.opponents
    }

    /// Jumped cell and landing cell for a hop from `cell` in `dir`.
    #[inline]
    fn jump_target(&self, cell: Cell, dir: Diagonal) -> Option<(Cell, Cell)> {
        let over = neighbor(cell, dir)?;
        if self.opponents & mask(over) == 0 {
            return None;
        }
        let landing = neighbor(over, dir)?;
        (self.occupied() & mask(landing) == 0).then_some((over, landing))
    }

    #[inline]
    fn hop(&mut self, from: Cell, over: Cell, landing: Cell) {
        self.own &= !mask(from);
        self.opponents &= !mask(over);
        self.own |= mask(landing);
    }

    #[inline]
    fn unhop(&mut self, from: Cell, over: Cell, landing: Cell) {
        self.own &= !mask(landing);
        self.opponents |= mask(over);
        self.own |= mask(from);
    }
}

struct MoveCollector {
    steps: Vec<CheckersMove>,
    jumps: Vec<CheckersMove>,
}

/// Every legal move for the side to move on `board`.
pub fn generate_moves(board: &CheckersBoard) -> Vec<CheckersMove> {
    let mover = board.whose_move();
    if board.counts(Color::Black).pieces == 0 || board.counts(Color::White).pieces == 0 {
        return Vec::new();
    }

    let mut scratch = JumpScratch {
        own: board.occupancy(mover),
        opponents: board.occupancy(mover.opposite()),
    };
    let mut collector = MoveCollector {
        steps: Vec::new(),
        jumps: Vec::new(),
    };

    let mut pieces = scratch.own;
    while pieces != 0 {
        let cell = pieces.trailing_zeros() as Cell;
        pieces &= pieces - 1;

        let is_king = board.kings() & mask(cell) != 0;
        for &dir in piece_directions(mover, is_king) {
            add_moves_for_direction(&mut scratch, &mut collector, cell, dir, mover, is_king);
        }
    }

    debug_assert_eq!(scratch.own, board.occupancy(mover));
    debug_assert_eq!(scratch.opponents, board.occupancy(mover.opposite()));

    if collector.jumps.is_empty() {
        collector.steps
    } else {
        collector.jumps
    }
}

fn add_moves_for_direction(
    scratch: &mut JumpScratch,
    collector: &mut MoveCollector,
    origin: Cell,
    dir: Diagonal,
    mover: Color,
    is_king: bool,
) {
    let Some(adjacent) = neighbor(origin, dir) else {
        return;
    };

    if scratch.occupied() & mask(adjacent) == 0 {
        if collector.jumps.is_empty() {
            collector.steps.push(CheckersMove::step(
                Location::from_cell(origin),
                Location::from_cell(adjacent),
            ));
        }
        return;
    }

    let Some((over, landing)) = scratch.jump_target(origin, dir) else {
        return;
    };
    if collector.jumps.is_empty() {
        collector.steps.clear();
    }

    let mut locs = vec![Location::from_cell(origin), Location::from_cell(landing)];
    scratch.hop(origin, over, landing);
    extend_jump_chain(scratch, &mut locs, landing, mover, is_king, &mut collector.jumps);
    scratch.unhop(origin, over, landing);
}

/// Depth-first search over continuations of a jump chain ending on `cell`.
///
/// `scratch` must come back exactly as it was handed in.
fn extend_jump_chain(
    scratch: &mut JumpScratch,
    locs: &mut Vec<Location>,
    cell: Cell,
    mover: Color,
    is_king: bool,
    jumps: &mut Vec<CheckersMove>,
) {
    // A man reaching the far row is crowned and its turn ends there.
    if !is_king && crowning_row(mover) & mask(cell) != 0 {
        jumps.push(CheckersMove::jump(locs.clone()));
        return;
    }

    let mut extended = false;
    for &dir in piece_directions(mover, is_king) {
        let Some((over, landing)) = scratch.jump_target(cell, dir) else {
            continue;
        };
        extended = true;

        scratch.hop(cell, over, landing);
        locs.push(Location::from_cell(landing));
        extend_jump_chain(scratch, locs, landing, mover, is_king, jumps);
        locs.pop();
        scratch.unhop(cell, over, landing);
    }

    if !extended {
        jumps.push(CheckersMove::jump(locs.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_moves;
    use crate::checkers::checkers_board::CheckersBoard;
    use crate::checkers::checkers_rules::mask;
    use crate::game::color::Color;
    use crate::game::game_board::GameBoard;
    use crate::utils::diagram::parse_checkers;

    fn texts(board: &CheckersBoard) -> Vec<String> {
        let mut out: Vec<String> = generate_moves(board).iter().map(ToString::to_string).collect();
        out.sort();
        out
    }

    #[test]
    fn steps_are_dropped_once_any_jump_exists() {
        // Black men on A1 and C3; a White man on D4 can be jumped from C3.
        let board = parse_checkers(
            "\
-.-.-.-.
.-.-.-.-
-.-.-.-w
.-.-.-.-
-.-w-.-.
.-b-.-.-
-.-.-.-.
b-.-.-.-
B",
        )
        .expect("diagram should parse");
        let moves = generate_moves(&board);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_jump());
        assert_eq!(moves[0].to_string(), "C3->E5");
    }

    #[test]
    fn chains_follow_every_branch() {
        // C3 jumps D4 to E5, then may take F4 (landing G3) or F6 (landing G7).
        let board = parse_checkers(
            "\
-.-.-.-.
.-.-.-.-
-.-w-w-.
.-.-.-.-
-.-w-.-.
.-b-.-.-
-.-.-.-.
.-.-.-.-
B",
        )
        .expect("diagram should parse");
        assert_eq!(texts(&board), vec!["C3->E5->G3", "C3->E5->G7"]);
    }

    #[test]
    fn crowning_ends_the_chain() {
        // Black man F2 jumps G3 into H4 and must stop despite G5 being open.
        let board = CheckersBoard::from_parts(mask(20), mask(25) | mask(26), 0, Color::Black)
            .expect("valid position");
        assert_eq!(texts(&board), vec!["F2->H4"]);
    }

    #[test]
    fn king_chains_may_return_to_their_origin() {
        // White king on D2 with Black men on C3, C5, E3 and E5: the chain
        // D2 -> F4 -> D6 -> B4 -> D2 (and its mirror) returns to the origin.
        let board = parse_checkers(
            "\
-.-.-.-.
.-.-.-.-
-.-.-.-.
.-b-b-.-
-W-.-.-.
.-b-b-.-
-.-.-.-.
.-.-.-.-
W",
        )
        .expect("diagram should parse");
        let moves = generate_moves(&board);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.is_jump()));
        assert!(moves.iter().all(|m| m.locations().len() == 5));
        assert!(moves.iter().any(|m| m.destination() == m.origin()));

        let mut scratch = board.clone();
        for mv in moves {
            scratch.apply_move(mv).expect("generated chain should apply");
            assert_eq!(scratch.counts(Color::Black).pieces, 0);
            scratch.undo_last_move().expect("undo should succeed");
            assert_eq!(scratch, board);
        }
    }

    #[test]
    fn blocked_side_has_no_moves() {
        // Black man on A1 blocked by a White man on B2 with C3 occupied.
        let board = CheckersBoard::from_parts(mask(0) | mask(9), mask(4), 0, Color::White)
            .expect("valid position");
        let white_moves = generate_moves(&board);
        assert!(white_moves.iter().all(|m| !m.is_jump()));

        let stuck = CheckersBoard::from_parts(mask(0), mask(4) | mask(9), 0, Color::Black)
            .expect("valid position");
        assert!(generate_moves(&stuck).is_empty());
    }
}
