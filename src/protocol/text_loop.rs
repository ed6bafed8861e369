//! Line-oriented text protocol for playing and analysing either game.
//!
//! Commands:
//! `new [checkers|othello]`, `show`, `moves`, `play <move>`, `undo`,
//! `go [depth N]`, `value`, `perft N`, `options`,
//! `setoption name <N> value <V>`, `isready`, `quit`.
//!
//! Errors are reported as `info string <command> error: ...` lines and never
//! end the session.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::checkers::checkers_board::CheckersBoard;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game::game_board::{GameBoard, GameRules};
use crate::othello::othello_board::OthelloBoard;
use crate::search::perft::perft;

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut state = TextState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = state.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Checkers,
    Othello,
}

impl GameKind {
    fn parse(text: &str) -> Result<Self, String> {
        match text.to_ascii_lowercase().as_str() {
            "checkers" | "draughts" => Ok(Self::Checkers),
            "othello" | "reversi" => Ok(Self::Othello),
            other => Err(format!("unknown game '{other}'")),
        }
    }
}

/// One game in progress together with the engine that analyses it.
struct Session<B: GameBoard> {
    board: B,
    engine: Box<dyn Engine<B>>,
}

impl<B: GameBoard + 'static> Session<B> {
    fn new(engine_options: &[(String, String)]) -> Self {
        let mut engine: Box<dyn Engine<B>> = Box::new(MinimaxEngine::<B>::default());
        for (name, value) in engine_options {
            if let Err(err) = engine.set_option(name, value) {
                warn!(option = %name, value = %value, "engine option not replayed: {err}");
            }
        }
        engine.new_game();
        Self {
            board: B::new_game(),
            engine,
        }
    }

    fn is_rules_option(&self, name: &str) -> bool {
        self.board
            .rules()
            .options()
            .iter()
            .any(|(option, _)| option.eq_ignore_ascii_case(name))
    }

    fn set_rules_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        let mut rules = self.board.rules();
        rules.set_option(name, value)?;
        self.board.set_rules(rules);
        self.engine.rules_changed();
        Ok(())
    }

    fn handle(&mut self, cmd: &str, args: &str, out: &mut impl Write) -> Result<(), String> {
        match cmd {
            "show" => {
                writeln!(out, "{}", self.board).map_err(|e| e.to_string())?;
                writeln!(out, "side {}", self.board.whose_move()).map_err(|e| e.to_string())?;
            }
            "moves" => {
                let moves = self.board.all_moves();
                writeln!(out, "moves {}", moves.len()).map_err(|e| e.to_string())?;
                for mv in moves {
                    writeln!(out, "move {mv}").map_err(|e| e.to_string())?;
                }
            }
            "play" => {
                let mv: B::Move = args.trim().parse().map_err(|e| format!("{e}"))?;
                if !self.board.all_moves().contains(&mv) {
                    return Err(format!("illegal move {mv}"));
                }
                self.board.apply_move(mv).map_err(|e| e.to_string())?;
            }
            "undo" => {
                let mv = self.board.undo_last_move().map_err(|e| e.to_string())?;
                writeln!(out, "undone {mv}").map_err(|e| e.to_string())?;
            }
            "go" => {
                let params = parse_go_params(args)?;
                let result = self.engine.choose_move(&self.board, &params)?;
                for info in &result.info_lines {
                    writeln!(out, "{info}").map_err(|e| e.to_string())?;
                }
                let written = match result.best_move {
                    Some(mv) => writeln!(out, "bestmove {mv}"),
                    None => writeln!(out, "bestmove none"),
                };
                written.map_err(|e| e.to_string())?;
            }
            "value" => {
                writeln!(out, "value {}", self.board.value()).map_err(|e| e.to_string())?;
            }
            "perft" => {
                let depth = args
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("invalid perft depth '{}'", args.trim()))?;
                let nodes = perft(&mut self.board, depth).map_err(|e| e.to_string())?;
                writeln!(out, "perft {depth} nodes {nodes}").map_err(|e| e.to_string())?;
            }
            "options" => {
                for (name, value) in self.board.rules().options() {
                    writeln!(out, "option name {name} value {value}")
                        .map_err(|e| e.to_string())?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

enum ActiveGame {
    Checkers(Session<CheckersBoard>),
    Othello(Session<OthelloBoard>),
}

impl ActiveGame {
    fn new(kind: GameKind, engine_options: &[(String, String)]) -> Self {
        match kind {
            GameKind::Checkers => Self::Checkers(Session::new(engine_options)),
            GameKind::Othello => Self::Othello(Session::new(engine_options)),
        }
    }

    fn kind(&self) -> GameKind {
        match self {
            Self::Checkers(_) => GameKind::Checkers,
            Self::Othello(_) => GameKind::Othello,
        }
    }
}

/// Applies `$body` to whichever session is active.
macro_rules! with_session {
    ($game:expr, $session:ident => $body:expr) => {
        match $game {
            ActiveGame::Checkers($session) => $body,
            ActiveGame::Othello($session) => $body,
        }
    };
}

struct TextState {
    game: ActiveGame,
    /// Engine options set so far, replayed when a new game starts.
    engine_options: Vec<(String, String)>,
}

impl TextState {
    fn new() -> Self {
        Self {
            game: ActiveGame::new(GameKind::Othello, &[]),
            engine_options: Vec::new(),
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        let (cmd, args) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        debug!(cmd, args, "text command");

        let result = match cmd {
            "quit" => return Ok(true),
            "isready" => {
                writeln!(out, "readyok")?;
                Ok(())
            }
            "new" => self.handle_new(args),
            "setoption" => self.handle_setoption(trimmed),
            "show" | "moves" | "play" | "undo" | "go" | "value" | "perft" | "options" => {
                with_session!(&mut self.game, session => session.handle(cmd, args, out))
            }
            other => Err(format!("unknown command '{other}'")),
        };

        if let Err(err) = result {
            writeln!(out, "info string {cmd} error: {err}")?;
        }
        Ok(false)
    }

    fn handle_new(&mut self, args: &str) -> Result<(), String> {
        let kind = match args.trim() {
            "" => self.game.kind(),
            name => GameKind::parse(name)?,
        };
        self.game = ActiveGame::new(kind, &self.engine_options);
        Ok(())
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }
        if name_tokens.is_empty() {
            return Err("missing option name".to_owned());
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        let is_rules = with_session!(&self.game, session => session.is_rules_option(&name));
        if is_rules {
            return with_session!(&mut self.game, session => session.set_rules_option(&name, &value));
        }

        with_session!(&mut self.game, session => session.engine.set_option(&name, &value))?;
        self.engine_options.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.engine_options.push((name, value));
        Ok(())
    }
}

fn parse_go_params(args: &str) -> Result<GoParams, String> {
    let mut params = GoParams::default();
    let mut tokens = args.split_whitespace();
    while let Some(tok) = tokens.next() {
        match tok {
            "depth" => {
                let depth = tokens
                    .next()
                    .and_then(|x| x.parse::<u32>().ok())
                    .filter(|d| *d >= 1)
                    .ok_or("depth needs a positive integer")?;
                params.depth = Some(depth);
            }
            other => return Err(format!("unknown go argument '{other}'")),
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &mut TextState, line: &str) -> String {
        let mut out = Vec::new();
        let quit = state.handle_command(line, &mut out).expect("writes to memory");
        assert!(!quit);
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn othello_is_the_default_game() {
        let mut state = TextState::new();
        assert_eq!(state.game.kind(), GameKind::Othello);
        assert_eq!(run(&mut state, "moves").lines().next(), Some("moves 4"));
        assert_eq!(run(&mut state, "value"), "value 0\n");
    }

    #[test]
    fn play_undo_and_show() {
        let mut state = TextState::new();
        run(&mut state, "new checkers");
        assert_eq!(run(&mut state, "moves").lines().next(), Some("moves 7"));
        assert_eq!(run(&mut state, "play C3->D4"), "");
        let shown = run(&mut state, "show");
        assert!(shown.ends_with("side White\n"));
        assert_eq!(run(&mut state, "undo"), "undone C3->D4\n");
        assert!(run(&mut state, "undo").contains("undo error"));
    }

    #[test]
    fn illegal_and_malformed_moves_are_reported() {
        let mut state = TextState::new();
        assert!(run(&mut state, "play [0, 0]").contains("illegal move"));
        assert!(run(&mut state, "play nonsense").contains("play error"));
        assert!(run(&mut state, "fly away").contains("unknown command"));
    }

    #[test]
    fn go_reports_a_legal_bestmove() {
        let mut state = TextState::new();
        let out = run(&mut state, "go depth 2");
        assert!(out.contains("info string minimax_engine depth 2"));
        let best = out
            .lines()
            .find_map(|l| l.strip_prefix("bestmove "))
            .expect("bestmove line");
        assert!(["[2, 3]", "[3, 2]", "[4, 5]", "[5, 4]"].contains(&best));
        assert!(run(&mut state, "go depth 0").contains("go error"));
    }

    #[test]
    fn setoption_routes_to_rules_or_engine() {
        let mut state = TextState::new();
        run(&mut state, "new checkers");
        assert_eq!(run(&mut state, "setoption name KingWeight value 250"), "");
        assert!(run(&mut state, "options").contains("option name KingWeight value 250"));

        assert_eq!(run(&mut state, "setoption name Depth value 2"), "");
        assert!(run(&mut state, "setoption name Depth value x").contains("setoption error"));
        assert!(run(&mut state, "setoption name Bogus value 1").contains("setoption error"));

        // Engine options survive a game switch.
        run(&mut state, "new othello");
        assert!(run(&mut state, "go").contains("depth 2 "));
    }

    #[test]
    fn weight_change_forces_a_fresh_search() {
        let mut state = TextState::new();
        let first = run(&mut state, "go depth 3");
        assert!(!first.contains(" boards 1\n"));
        let repeat = run(&mut state, "go depth 3");
        assert!(repeat.contains(" boards 1\n"));

        assert_eq!(run(&mut state, "setoption name CornerWeight value 500"), "");
        assert_eq!(run(&mut state, "setoption name InnerWeight value 50"), "");
        let reweighted = run(&mut state, "go depth 3");
        assert!(!reweighted.contains(" boards 1\n"));
        assert!(reweighted.contains("hits 0 "));
    }

    #[test]
    fn engine_options_replay_across_games() {
        let mut state = TextState::new();
        assert_eq!(run(&mut state, "setoption name OwnBook value off"), "");
        run(&mut state, "new checkers");
        let out = run(&mut state, "go depth 2");
        assert!(!out.contains("book entries"));
    }

    #[test]
    fn perft_and_isready() {
        let mut state = TextState::new();
        assert_eq!(run(&mut state, "perft 3"), "perft 3 nodes 56\n");
        assert_eq!(run(&mut state, "isready"), "readyok\n");
        let mut sink = Vec::new();
        assert!(state.handle_command("quit", &mut sink).expect("writes"));
    }
}
