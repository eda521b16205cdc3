//! Shared test utilities.

#![allow(dead_code)]

use goshawk::board::Board;
use goshawk::move_generation::MoveGen;
use goshawk::move_types::{Move, MoveList};

pub fn board_from_fen(fen: &str) -> Board {
    Board::from_fen(fen).expect("test FEN is valid")
}

/// Fully legal moves of the side to move.
pub fn legal_moves(board: &Board, move_gen: &MoveGen) -> MoveList {
    let mut scratch = board.clone();
    let mover = scratch.side_to_move();
    move_gen
        .gen_pseudo_legal(board)
        .into_iter()
        .filter(|mv| {
            let mut mv = *mv;
            scratch.make(&mut mv, move_gen);
            let legal = !scratch.in_check(mover);
            scratch.unmake(&mv);
            legal
        })
        .collect()
}

pub fn find_move(moves: &[Move], uci: &str) -> Option<Move> {
    moves.iter().copied().find(|mv| mv.uci() == uci)
}

/// Reference positions, including the eight canonical regression FENs.
pub mod positions {
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    pub const KIWIPETE: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    pub const ENDGAME_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";
    pub const POSITION_4: &str =
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    pub const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    pub const POSITION_6: &str =
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";
    /// Mate in 7 for Black, includes quiet moves.
    pub const MATE_IN_7: &str = "8/7R/2p1k3/p3P2P/1p6/1P1r4/1KP4r/8 b - - 0 1";
    /// Mate in 3 for White, queen sacrifice first, all checks.
    pub const MATE_IN_3: &str = "r4rk1/ppq2Np1/1n1pb3/2p4p/8/3B2Q1/PPPB2PP/5RK1 w - - 0 1";

    pub const MATE_IN_1: &str = "7k/5ppp/8/8/8/8/5PPP/R6K w - - 0 1";
    pub const EN_PASSANT: &str = "8/8/8/pP6/8/8/8/K6k w - a6 0 1";
    pub const CASTLING_BOTH: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
    pub const PROMOTION: &str = "8/P7/8/8/8/8/8/K6k w - - 0 1";
    /// Black to move, stalemated.
    pub const STALEMATE: &str = "k7/1R6/K7/8/8/8/8/8 b - - 0 1";
    /// Black to move, checkmated.
    pub const CHECKMATED: &str = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1";
}
