//! Uniform random mover, used as a sparring partner and for smoke tests.

use std::marker::PhantomData;

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game::game_board::GameBoard;

pub struct RandomEngine<B> {
    rng: StdRng,
    _board: PhantomData<fn() -> B>,
}

impl<B: GameBoard> RandomEngine<B> {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            _board: PhantomData,
        }
    }
}

impl<B: GameBoard> Default for RandomEngine<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: GameBoard> Engine<B> for RandomEngine<B> {
    fn name(&self) -> &str {
        "Plum Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Seed") {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("invalid Seed value '{value}'"))?;
            self.rng = StdRng::seed_from_u64(seed);
            return Ok(());
        }
        Err(format!("unknown option '{name}'"))
    }

    fn choose_move(
        &mut self,
        board: &B,
        _params: &GoParams,
    ) -> Result<EngineOutput<B::Move>, String> {
        let moves = board.all_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            moves.len()
        ));
        out.best_move = moves.choose(&mut self.rng).cloned();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::checkers::checkers_board::CheckersBoard;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game::game_board::GameBoard;
    use crate::othello::othello_board::OthelloBoard;

    #[test]
    fn picks_a_legal_move() {
        let board = CheckersBoard::new_game();
        let mut engine = RandomEngine::<CheckersBoard>::with_seed(7);
        let out = engine
            .choose_move(&board, &GoParams::default())
            .expect("engine runs");
        let mv = out.best_move.expect("start position has moves");
        assert!(board.all_moves().contains(&mv));
    }

    #[test]
    fn same_seed_same_choices() {
        let board = OthelloBoard::new_game();
        let mut a = RandomEngine::<OthelloBoard>::with_seed(11);
        let mut b = RandomEngine::<OthelloBoard>::with_seed(11);
        for _ in 0..5 {
            let pa = a.choose_move(&board, &GoParams::default()).expect("runs");
            let pb = b.choose_move(&board, &GoParams::default()).expect("runs");
            assert_eq!(pa.best_move, pb.best_move);
        }
    }

    #[test]
    fn seed_option_is_parsed() {
        let mut engine = RandomEngine::<OthelloBoard>::with_seed(1);
        assert!(engine.set_option("seed", "99").is_ok());
        assert!(engine.set_option("Seed", "x").is_err());
        assert!(engine.set_option("Depth", "3").is_err());
    }
}
