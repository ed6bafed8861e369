//! Book-backed fixed-depth minimax engine.
//!
//! The book survives across moves and games unless cleared, so repeated or
//! transposed positions are answered without re-searching.

use tracing::debug;

use crate::engines::engine_trait::{parse_switch, Engine, EngineOutput, GoParams};
use crate::game::game_board::GameBoard;
use crate::search::book::Book;
use crate::search::minimax::{search_best_move, SearchConfig};

pub struct MinimaxEngine<B: GameBoard> {
    config: SearchConfig,
    book: Book<B::Key, B::Move>,
}

impl<B: GameBoard> MinimaxEngine<B> {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            book: Book::new(config.save_depth),
        }
    }

    pub fn with_depth(depth: u32) -> Self {
        Self::new(SearchConfig {
            depth,
            ..SearchConfig::default()
        })
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    #[inline]
    pub fn book(&self) -> &Book<B::Key, B::Move> {
        &self.book
    }
}

impl<B: GameBoard> Default for MinimaxEngine<B> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<B: GameBoard> Engine<B> for MinimaxEngine<B> {
    fn name(&self) -> &str {
        "Plum Minimax"
    }

    fn rules_changed(&mut self) {
        debug!(entries = self.book.len(), "rules changed, clearing book");
        self.book.clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            let depth = value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|d| *d >= 1)
                .ok_or_else(|| format!("invalid Depth value '{value}'"))?;
            self.config.depth = depth;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("SaveDepth") {
            let save_depth = value
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid SaveDepth value '{value}'"))?;
            self.config.save_depth = save_depth;
            self.book.set_save_depth(save_depth);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("OwnBook") {
            self.config.use_book = parse_switch(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("ClearBook") {
            self.book.clear();
            return Ok(());
        }
        Err(format!("unknown option '{name}'"))
    }

    fn choose_move(
        &mut self,
        board: &B,
        params: &GoParams,
    ) -> Result<EngineOutput<B::Move>, String> {
        let depth = params.depth.unwrap_or(self.config.depth).max(1);
        let mut probe = board.clone();
        let book = self.config.use_book.then_some(&mut self.book);
        let result = search_best_move(&mut probe, depth, book).map_err(|e| e.to_string())?;

        let stats = self.book.stats();
        debug!(
            depth,
            value = result.value,
            boards = result.boards_explored,
            book_entries = self.book.len(),
            book_hits = stats.hits,
            "minimax decision"
        );

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string minimax_engine depth {} value {} boards {}",
            depth, result.value, result.boards_explored
        ));
        if self.config.use_book {
            out.info_lines.push(format!(
                "info string minimax_engine book entries {} probes {} hits {} stores {}",
                self.book.len(),
                stats.probes,
                stats.hits,
                stats.stores
            ));
        }
        if let Some(reply) = &result.best_reply {
            out.info_lines
                .push(format!("info string minimax_engine expected_reply {reply}"));
        }

        out.value = Some(result.value);
        out.best_move = result.best_move;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::MinimaxEngine;
    use crate::checkers::checkers_board::CheckersBoard;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game::game_board::{GameBoard, GameRules};
    use crate::othello::othello_board::OthelloBoard;
    use crate::utils::diagram::parse_checkers;

    #[test]
    fn jump_is_forced() {
        let board = parse_checkers(
            "\
            -w-.-.-.
            .-.-.-.-
            -.-.-.-.
            .-.-.-.-
            -.-w-.-.
            b-b-.-.-
            -.-.-.-.
            .-.-.-.-
            B",
        )
        .expect("valid diagram");
        let mut engine = MinimaxEngine::<CheckersBoard>::with_depth(3);
        let out = engine
            .choose_move(&board, &GoParams::default())
            .expect("engine runs");
        let mv = out.best_move.expect("a move exists");
        assert_eq!(mv.to_string(), "C3->E5");
    }

    #[test]
    fn book_fills_and_clears() {
        let board = OthelloBoard::new_game();
        let mut engine = MinimaxEngine::<OthelloBoard>::with_depth(3);
        let out = engine
            .choose_move(&board, &GoParams::default())
            .expect("engine runs");
        assert!(out.best_move.is_some());
        assert!(!engine.book().is_empty());
        assert!(out.info_lines.iter().any(|l| l.contains("book entries")));

        engine.set_option("ClearBook", "").expect("option exists");
        assert!(engine.book().is_empty());
    }

    #[test]
    fn weight_change_discards_book_values() {
        let mut board = OthelloBoard::new_game();
        let mut engine = MinimaxEngine::<OthelloBoard>::with_depth(3);
        engine
            .choose_move(&board, &GoParams::default())
            .expect("engine runs");
        assert!(!engine.book().is_empty());

        let mut rules = board.rules();
        rules.set_option("CornerWeight", "500").expect("known weight");
        rules.set_option("InnerWeight", "50").expect("known weight");
        board.set_rules(rules);
        engine.rules_changed();
        assert!(engine.book().is_empty());

        let reweighted = engine
            .choose_move(&board, &GoParams::default())
            .expect("engine runs");
        let fresh = MinimaxEngine::<OthelloBoard>::with_depth(3)
            .choose_move(&board, &GoParams::default())
            .expect("engine runs");
        assert_eq!(reweighted.value, fresh.value);
    }

    #[test]
    fn options_are_validated() {
        let mut engine = MinimaxEngine::<OthelloBoard>::default();
        engine.set_option("depth", "5").expect("valid depth");
        assert_eq!(engine.config().depth, 5);
        assert!(engine.set_option("Depth", "0").is_err());
        assert!(engine.set_option("Depth", "deep").is_err());
        engine.set_option("SaveDepth", "3").expect("valid save depth");
        assert_eq!(engine.book().save_depth(), 3);
        engine.set_option("OwnBook", "off").expect("valid switch");
        assert!(!engine.config().use_book);
        assert!(engine.set_option("OwnBook", "maybe").is_err());
        assert!(engine.set_option("Hash", "16").is_err());
    }

    #[test]
    fn search_without_book_leaves_it_empty() {
        let mut engine = MinimaxEngine::<OthelloBoard>::with_depth(2);
        engine.set_option("OwnBook", "false").expect("valid switch");
        let out = engine
            .choose_move(&OthelloBoard::new_game(), &GoParams { depth: Some(3) })
            .expect("engine runs");
        assert!(out.best_move.is_some());
        assert!(engine.book().is_empty());
        assert!(out.info_lines[0].contains("depth 3"));
    }
}
