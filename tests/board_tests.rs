//! Board representation and FEN loading.

mod common;

use common::{board_from_fen, positions};
use goshawk::board::Board;
use goshawk::board_utils::coord_to_sq;
use goshawk::errors::EngineError;
use goshawk::piece_types::{Color, Piece};

#[test]
fn start_position_layout() {
    let board = Board::start_position();
    assert_eq!(board.piece_at(0), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(4), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(12), Some((Color::White, Piece::Pawn)));
    assert_eq!(board.piece_at(28), None);
    assert_eq!(board.piece_at(57), Some((Color::Black, Piece::Knight)));
    assert_eq!(board.piece_at(60), Some((Color::Black, Piece::King)));
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.castle_rights(), 0b1111);
    assert_eq!(board.en_passant_file(), None);
    assert_eq!(board.halfmove(), 0);
    assert_eq!(board.fullmove(), 1);
    assert_eq!(board.ply(), 0);
}

#[test]
fn king_squares_are_cached() {
    let board = Board::start_position();
    assert_eq!(board.king_square(Color::White), 4);
    assert_eq!(board.king_square(Color::Black), 60);

    let board = board_from_fen(positions::KIWIPETE);
    assert_eq!(board.king_square(Color::White), coord_to_sq("e1").unwrap());
    assert_eq!(board.king_square(Color::Black), coord_to_sq("e8").unwrap());
}

#[test]
fn fen_clock_fields() {
    let board = board_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 5 12");
    assert_eq!(board.halfmove(), 5);
    assert_eq!(board.fullmove(), 12);
    assert_eq!(board.ply(), 23);

    // Clock fields are optional; endgame position 3 omits them.
    let board = board_from_fen(positions::ENDGAME_3);
    assert_eq!(board.halfmove(), 0);
    assert_eq!(board.fullmove(), 1);
}

#[test]
fn fen_en_passant_square() {
    let board = board_from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 2");
    assert_eq!(board.en_passant_file(), Some(4));
    assert_eq!(board.ep_target_square(Color::White), coord_to_sq("e6"));
    assert_eq!(board.ep_capture_square(Color::White), coord_to_sq("e5"));
}

#[test]
fn fen_partial_castle_rights() {
    let board = board_from_fen(positions::POSITION_4);
    assert_eq!(
        board.castle_rights(),
        goshawk::board::CR_BLACK_KING | goshawk::board::CR_BLACK_QUEEN
    );
}

#[test]
fn check_flags_set_on_load() {
    // White king in check from the black rook.
    let board = board_from_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1");
    assert!(board.in_check(Color::White));
    assert!(!board.in_check(Color::Black));

    let board = Board::start_position();
    assert!(!board.in_check(Color::White));
    assert!(!board.in_check(Color::Black));
}

#[test]
fn invalid_fen_is_rejected() {
    for bad in [
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",          // 7 ranks
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1", // bad side
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1", // bad right
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", // bad run
        "8/8/8/8/8/8/8/8 w - - 0 1",                                // no kings
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1", // bad clock
    ] {
        assert_eq!(
            Board::from_fen(bad),
            Err(EngineError::InvalidFen),
            "should reject {bad:?}"
        );
    }
}

#[test]
fn fen_round_trip() {
    for fen in [
        positions::STARTING,
        positions::KIWIPETE,
        positions::POSITION_4,
        positions::POSITION_5,
        positions::POSITION_6,
        positions::MATE_IN_7,
        positions::MATE_IN_3,
    ] {
        let board = board_from_fen(fen);
        assert_eq!(board_from_fen(&board.to_fen()), board, "round trip of {fen}");
    }
    // Canonical six-field FENs come back verbatim.
    assert_eq!(board_from_fen(positions::KIWIPETE).to_fen(), positions::KIWIPETE);
    assert_eq!(Board::start_position().to_fen(), positions::STARTING);
}

#[test]
fn piece_count_audit() {
    assert!(Board::start_position().piece_counts_valid());
    assert!(board_from_fen(positions::KIWIPETE).piece_counts_valid());
}
