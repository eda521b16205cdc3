//! UCI text protocol loop.
//!
//! Reads commands line by line from stdin on the calling thread and
//! answers on stdout. `go` hands the position to the engine's background
//! worker, which streams `info` lines and finishes with `bestmove`, so
//! the loop stays responsive to `stop` and `quit` while a search runs.
//! Unknown or malformed input is logged and ignored, per protocol.

use std::io::{self, BufRead};

use crate::board::Board;
use crate::board_utils::coord_to_sq;
use crate::engine::{GoParams, NegamaxEngine};
use crate::errors::EngineError;
use crate::fen;
use crate::move_generation::MoveGen;
use crate::move_types::Move;
use crate::perft;
use crate::piece_types::Piece;

pub struct UciEngine {
    board: Board,
    engine: NegamaxEngine,
    move_gen: MoveGen,
}

impl UciEngine {
    pub fn new() -> UciEngine {
        UciEngine {
            board: Board::start_position(),
            engine: NegamaxEngine::new(),
            move_gen: MoveGen::new(),
        }
    }

    pub fn run(&mut self) {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            log::debug!("received: {line}");
            if !self.handle_command(line) {
                break;
            }
        }
        self.engine.stop();
    }

    /// Dispatch one command line. Returns `false` on `quit`.
    pub fn handle_command(&mut self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["uci", ..] => {
                println!("id name goshawk {}", env!("CARGO_PKG_VERSION"));
                println!("id author the goshawk authors");
                println!("uciok");
            }
            ["isready", ..] => println!("readyok"),
            ["ucinewgame", ..] => self.engine.stop(),
            ["position", rest @ ..] => self.handle_position(rest),
            ["go", rest @ ..] => self.handle_go(rest),
            ["stop", ..] => self.engine.stop(),
            ["perft", rest @ ..] => self.handle_perft(rest),
            ["quit", ..] => {
                self.engine.stop();
                return false;
            }
            _ => log::debug!("ignoring unknown command: {line}"),
        }
        true
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn handle_position(&mut self, tokens: &[&str]) {
        let moves_at = tokens.iter().position(|t| *t == "moves");
        let base = &tokens[..moves_at.unwrap_or(tokens.len())];

        match base.first() {
            Some(&"startpos") => self.board = Board::start_position(),
            Some(&"fen") => match fen::parse(&base[1..].join(" ")) {
                Ok(board) => self.board = board,
                Err(err) => {
                    log::warn!("position rejected: {err}");
                    return;
                }
            },
            _ => {
                log::warn!("position needs 'startpos' or 'fen'");
                return;
            }
        }

        if let Some(at) = moves_at {
            for text in &tokens[at + 1..] {
                match parse_uci_move(&self.board, &self.move_gen, text) {
                    Some(mut mv) => self.board.make(&mut mv, &self.move_gen),
                    None => {
                        log::warn!("illegal or unparsable move '{text}', rest dropped");
                        return;
                    }
                }
            }
        }
    }

    fn handle_go(&mut self, tokens: &[&str]) {
        let params = parse_go_params(tokens);
        match self.engine.start_search(self.board.clone(), params) {
            Ok(()) => {}
            Err(err @ EngineError::EngineBusy) => {
                log::warn!("go refused: {err}");
                println!("info string search already running");
            }
            Err(err) => log::warn!("go refused: {err}"),
        }
    }

    fn handle_perft(&mut self, tokens: &[&str]) {
        let depth: u32 = match tokens.first().and_then(|t| t.parse().ok()) {
            Some(d) if d > 0 => d,
            _ => {
                log::warn!("perft needs a positive depth");
                return;
            }
        };
        let mut board = self.board.clone();
        let (total, counters) = perft::run(&mut board, &self.move_gen, depth);
        for (i, count) in counters.iter().enumerate() {
            println!("info string num_move for depth {} = {}", i, count);
        }
        println!("info string perft {} nodes {}", depth, total);
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the arguments of a `go` command. Unknown tokens are skipped.
pub fn parse_go_params(tokens: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match *token {
            "depth" => params.depth = next_number(&mut iter) as u32,
            "movetime" => params.movetime = next_number(&mut iter),
            "wtime" => params.wtime = next_number(&mut iter),
            "btime" => params.btime = next_number(&mut iter),
            "movestogo" => params.movestogo = next_number(&mut iter) as u32,
            "infinite" => params.infinite = true,
            _ => {}
        }
    }
    params
}

fn next_number<'a>(iter: &mut std::slice::Iter<'a, &'a str>) -> u64 {
    iter.next().and_then(|t| t.parse().ok()).unwrap_or(0)
}

/// Resolve a UCI move string against the legal moves of `board`, so the
/// returned record carries the right capture/en-passant/castling flags.
pub fn parse_uci_move(board: &Board, move_gen: &MoveGen, text: &str) -> Option<Move> {
    if text.len() < 4 || !text.is_ascii() {
        return None;
    }
    let src = coord_to_sq(&text[0..2])?;
    let dst = coord_to_sq(&text[2..4])?;
    let promote = text.chars().nth(4).and_then(Piece::from_char);

    let mut scratch = board.clone();
    let mover = scratch.side_to_move();
    for mut mv in move_gen.gen_pseudo_legal(board) {
        if mv.src != src || mv.dst != dst || mv.promote != promote {
            continue;
        }
        scratch.make(&mut mv, move_gen);
        let legal = !scratch.in_check(mover);
        scratch.unmake(&mv);
        if legal {
            return Some(mv);
        }
    }
    None
}
