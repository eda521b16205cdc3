//! Perft reference counts (move-generation verification).

mod common;

use common::{board_from_fen, positions};
use goshawk::board::Board;
use goshawk::move_generation::MoveGen;
use goshawk::perft;

fn perft_total(fen: &str, depth: u32) -> u64 {
    let move_gen = MoveGen::new();
    let mut board = board_from_fen(fen);
    let (total, _) = perft::run(&mut board, &move_gen, depth);
    total
}

#[test]
fn start_position_shallow() {
    assert_eq!(perft_total(positions::STARTING, 1), 20);
    assert_eq!(perft_total(positions::STARTING, 2), 400);
    assert_eq!(perft_total(positions::STARTING, 3), 8_902);
}

#[test]
fn start_position_depth_4() {
    assert_eq!(perft_total(positions::STARTING, 4), 197_281);
}

#[test]
#[ignore = "slow"]
fn start_position_depth_5() {
    assert_eq!(perft_total(positions::STARTING, 5), 4_865_609);
}

#[test]
#[ignore = "slow"]
fn start_position_depth_6() {
    assert_eq!(perft_total(positions::STARTING, 6), 119_060_324);
}

#[test]
fn kiwipete_shallow() {
    assert_eq!(perft_total(positions::KIWIPETE, 1), 48);
    assert_eq!(perft_total(positions::KIWIPETE, 2), 2_039);
}

#[test]
fn kiwipete_depth_3() {
    assert_eq!(perft_total(positions::KIWIPETE, 3), 97_862);
}

#[test]
#[ignore = "slow"]
fn kiwipete_depth_4() {
    assert_eq!(perft_total(positions::KIWIPETE, 4), 4_085_603);
}

#[test]
fn endgame_position_3() {
    // Known counts for the rook-and-pawns endgame (position 3).
    assert_eq!(perft_total(positions::ENDGAME_3, 1), 14);
    assert_eq!(perft_total(positions::ENDGAME_3, 2), 191);
    assert_eq!(perft_total(positions::ENDGAME_3, 3), 2_812);
    assert_eq!(perft_total(positions::ENDGAME_3, 4), 43_238);
}

#[test]
fn position_4_catches_promotion_bugs() {
    assert_eq!(perft_total(positions::POSITION_4, 1), 6);
    assert_eq!(perft_total(positions::POSITION_4, 2), 264);
    assert_eq!(perft_total(positions::POSITION_4, 3), 9_467);
}

#[test]
fn position_5_shallow() {
    assert_eq!(perft_total(positions::POSITION_5, 1), 44);
    assert_eq!(perft_total(positions::POSITION_5, 2), 1_486);
    assert_eq!(perft_total(positions::POSITION_5, 3), 62_379);
}

#[test]
fn per_depth_counters_accumulate_legal_moves() {
    let move_gen = MoveGen::new();
    let mut board = Board::start_position();
    let (total, counters) = perft::run(&mut board, &move_gen, 3);
    assert_eq!(total, 8_902);
    // counters[d] holds the legal moves found while expanding depth d.
    assert_eq!(counters[0], 20);
    assert_eq!(counters[1], 400);
    assert_eq!(counters[2], 8_902);
}

#[test]
fn perft_leaves_the_board_untouched() {
    let move_gen = MoveGen::new();
    let mut board = board_from_fen(positions::KIWIPETE);
    let before = board.clone();
    perft::run(&mut board, &move_gen, 3);
    assert_eq!(board, before);
}
