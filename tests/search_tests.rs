//! Fixed-depth search scenarios.

mod common;

use common::{board_from_fen, legal_moves, positions};
use goshawk::board::Board;
use goshawk::engine::find_best_move;
use goshawk::move_generation::MoveGen;

#[test]
fn depth_1_from_the_start_is_quiet() {
    let board = Board::start_position();
    let (best, score) = find_best_move(&board, 1).expect("a move exists");

    let move_gen = MoveGen::new();
    let legal = legal_moves(&board, &move_gen);
    assert!(
        legal.iter().any(|m| m.same_move(&best)),
        "best move {} must be legal",
        best.uci()
    );
    assert!(
        (-50..=50).contains(&score),
        "start position is balanced, got {score}"
    );
}

#[test]
fn finds_mate_in_one() {
    let board = board_from_fen(positions::MATE_IN_1);
    let (best, score) = find_best_move(&board, 2).expect("a move exists");
    assert_eq!(best.uci(), "a1a8");
    assert!(score >= 19_000, "mate score expected, got {score}");
}

#[test]
fn mate_in_one_is_stable_at_higher_depth() {
    let board = board_from_fen(positions::MATE_IN_1);
    let (best, score) = find_best_move(&board, 4).expect("a move exists");
    assert_eq!(best.uci(), "a1a8");
    assert!(score >= 19_000);
}

#[test]
fn grabs_a_hanging_queen() {
    let board = board_from_fen("8/8/5q2/8/4N3/8/8/K6k w - - 0 1");
    let (best, score) = find_best_move(&board, 2).expect("a move exists");
    assert_eq!(best.uci(), "e4f6");
    assert!(score > 0, "up a queen after the capture, got {score}");
}

#[test]
fn search_is_deterministic() {
    let board = board_from_fen(positions::POSITION_6);
    let first = find_best_move(&board, 3).expect("a move exists");
    let second = find_best_move(&board, 3).expect("a move exists");
    assert_eq!(first.0.uci(), second.0.uci());
    assert_eq!(first.1, second.1);
}

#[test]
fn stalemate_root_yields_no_move() {
    let board = board_from_fen(positions::STALEMATE);
    assert!(find_best_move(&board, 3).is_none());
}

#[test]
fn checkmated_root_yields_no_move() {
    let board = board_from_fen(positions::CHECKMATED);
    assert!(find_best_move(&board, 3).is_none());
}

#[test]
fn search_does_not_disturb_the_board() {
    let board = board_from_fen(positions::POSITION_6);
    let before = board.clone();
    find_best_move(&board, 3);
    assert_eq!(board, before);
}

#[test]
fn deeper_search_from_a_tactical_middlegame() {
    // Sanity: depth 4 completes and returns a legal move on a busy board.
    let board = board_from_fen(positions::KIWIPETE);
    let (best, _score) = find_best_move(&board, 4).expect("a move exists");
    let move_gen = MoveGen::new();
    assert!(legal_moves(&board, &move_gen)
        .iter()
        .any(|m| m.same_move(&best)));
}

#[test]
#[ignore = "slow: six-ply mate search"]
fn finds_the_mate_in_three_queen_sacrifice() {
    let board = board_from_fen(positions::MATE_IN_3);
    let (best, score) = find_best_move(&board, 6).expect("a move exists");
    assert_eq!(best.uci(), "g3g7", "the queen sacrifice starts the mate");
    assert!(score >= 19_975, "forced mate in three, got {score}");
}
