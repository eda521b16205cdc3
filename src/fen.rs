//! FEN reading and writing.
//!
//! Parses the standard six-field form; the clock fields are optional and
//! default to `0 1`, which some of the canonical test positions rely on.
//! Anything malformed surfaces as [`EngineError::InvalidFen`] - the search
//! itself never produces this error.

use crate::board::{
    Board, CR_BLACK_KING, CR_BLACK_QUEEN, CR_WHITE_KING, CR_WHITE_QUEEN,
};
use crate::board_utils::{coord_to_sq, sq, sq_to_file, sq_to_rank};
use crate::errors::EngineError;
use crate::move_generation::MoveGen;
use crate::piece_types::{Color, Piece};
use crate::zobrist;

pub fn parse(text: &str) -> Result<Board, EngineError> {
    let mut fields = text.split_whitespace();
    let placement = fields.next().ok_or(EngineError::InvalidFen)?;
    let side = fields.next().ok_or(EngineError::InvalidFen)?;
    let castling = fields.next().ok_or(EngineError::InvalidFen)?;
    let en_passant = fields.next().ok_or(EngineError::InvalidFen)?;
    let halfmove = fields.next().unwrap_or("0");
    let fullmove = fields.next().unwrap_or("1");

    let mut board = Board::empty();

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(EngineError::InvalidFen);
    }
    let mut kings = [0u32; 2];
    for (i, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - i as u8; // FEN lists rank 8 first
        let mut file = 0u8;
        for c in rank_text.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(EngineError::InvalidFen);
                }
                file += run as u8;
            } else {
                let piece = Piece::from_char(c).ok_or(EngineError::InvalidFen)?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if file > 7 {
                    return Err(EngineError::InvalidFen);
                }
                // Pawns on a back rank would break move generation.
                if piece == Piece::Pawn && (rank == 0 || rank == 7) {
                    return Err(EngineError::InvalidFen);
                }
                if piece == Piece::King {
                    kings[color.idx()] += 1;
                }
                board.set_piece_at(sq(rank, file), Some((color, piece)));
                file += 1;
            }
        }
        if file != 8 {
            return Err(EngineError::InvalidFen);
        }
    }
    if kings != [1, 1] {
        return Err(EngineError::InvalidFen);
    }

    match side {
        "w" => board.set_side_to_move(Color::White),
        "b" => board.set_side_to_move(Color::Black),
        _ => return Err(EngineError::InvalidFen),
    }

    let mut rights = 0u8;
    if castling != "-" {
        for c in castling.chars() {
            rights |= match c {
                'K' => CR_WHITE_KING,
                'Q' => CR_WHITE_QUEEN,
                'k' => CR_BLACK_KING,
                'q' => CR_BLACK_QUEEN,
                _ => return Err(EngineError::InvalidFen),
            };
        }
    }
    board.set_castle_rights(rights);

    if en_passant != "-" {
        let target = coord_to_sq(en_passant).ok_or(EngineError::InvalidFen)?;
        board.set_en_passant_file(Some(sq_to_file(target)));
    }

    let halfmove: u32 = halfmove.parse().map_err(|_| EngineError::InvalidFen)?;
    board.set_halfmove(halfmove.min(u8::MAX as u32) as u8);

    let fullmove: u16 = fullmove.parse().map_err(|_| EngineError::InvalidFen)?;
    let fullmove = fullmove.max(1);
    let ply = match board.side_to_move() {
        Color::White => 2 * fullmove - 2,
        Color::Black => 2 * fullmove - 1,
    };
    board.set_ply(ply);

    board.set_key(zobrist::full_hash(&board));
    board.recompute_check_flags(&MoveGen::new());
    Ok(board)
}

pub fn write(board: &Board) -> String {
    let mut out = String::with_capacity(80);

    for i in 0..8u8 {
        let rank = 7 - i;
        let mut empty_run = 0;
        for file in 0..8u8 {
            match board.piece_at(sq(rank, file)) {
                None => empty_run += 1,
                Some((color, piece)) => {
                    if empty_run > 0 {
                        out.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    let c = piece.to_char();
                    out.push(if color == Color::White {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    });
                }
            }
        }
        if empty_run > 0 {
            out.push((b'0' + empty_run) as char);
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(if board.side_to_move() == Color::White {
        'w'
    } else {
        'b'
    });

    out.push(' ');
    let rights = board.castle_rights();
    if rights == 0 {
        out.push('-');
    } else {
        for (bit, c) in [
            (CR_WHITE_KING, 'K'),
            (CR_WHITE_QUEEN, 'Q'),
            (CR_BLACK_KING, 'k'),
            (CR_BLACK_QUEEN, 'q'),
        ] {
            if rights & bit != 0 {
                out.push(c);
            }
        }
    }

    out.push(' ');
    match board.ep_target_square(board.side_to_move()) {
        Some(target) => {
            out.push((b'a' + sq_to_file(target)) as char);
            out.push((b'1' + sq_to_rank(target)) as char);
        }
        None => out.push('-'),
    }

    out.push(' ');
    out.push_str(&board.halfmove().to_string());
    out.push(' ');
    out.push_str(&board.fullmove().to_string());
    out
}
