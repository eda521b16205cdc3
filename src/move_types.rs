//! The move record.
//!
//! A [`Move`] carries everything the search needs: the squares and pieces
//! involved, the flags the generator and searcher annotate it with, the
//! ordering scores, and an undo snapshot (`*_before` fields) of the board
//! state that cannot be recomputed after the move is applied. The snapshot
//! is written by `Board::make`, which lets a move list be reordered freely
//! without a separate undo stack.

use crate::board_utils::sq_to_coord;
use crate::piece_types::{Color, Piece};

pub type MoveList = Vec<Move>;

#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub src: u8,
    pub dst: u8,
    pub color: Color,
    pub piece: Piece,
    /// Captured piece, also set for en-passant captures.
    pub captured: Option<Piece>,
    pub promote: Option<Piece>,

    pub en_passant: bool,
    pub castling: bool,
    /// Legality is discovered lazily: a move is made, the mover's king is
    /// tested for check, and the result cached here so later passes over
    /// the same list can skip the work.
    pub legal: bool,
    pub legal_checked: bool,
    pub killer: bool,
    pub mate_killer: bool,
    pub hash_move: bool,
    /// Matched the previous iteration's principal variation at this ply.
    pub pv_move: bool,

    /// Search score of the subtree behind this move; drives the root
    /// ordering carried between iterative-deepening passes.
    pub score: i32,
    pub mvv_lva: i32,

    // Undo snapshot, captured by `Board::make` before the move applies.
    pub(crate) flags_before: u32,
    pub(crate) key_before: u64,
    pub(crate) halfmove_before: u8,
}

impl Move {
    pub fn new(src: u8, dst: u8, color: Color, piece: Piece) -> Move {
        Move {
            src,
            dst,
            color,
            piece,
            captured: None,
            promote: None,
            en_passant: false,
            castling: false,
            legal: false,
            legal_checked: false,
            killer: false,
            mate_killer: false,
            hash_move: false,
            pv_move: false,
            score: -999_999,
            mvv_lva: 0,
            flags_before: 0,
            key_before: 0,
            halfmove_before: 0,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Identity comparison: two records describe the same move when the
    /// squares, mover and promotion agree, regardless of annotations.
    pub fn same_move(&self, other: &Move) -> bool {
        self.src == other.src
            && self.dst == other.dst
            && self.piece == other.piece
            && self.promote == other.promote
    }

    /// UCI encoding: `<from><to>[promo]`, e.g. `e7e8q`.
    pub fn uci(&self) -> String {
        let mut s = format!("{}{}", sq_to_coord(self.src), sq_to_coord(self.dst));
        if let Some(p) = self.promote {
            s.push(p.to_char());
        }
        s
    }
}

/// Undo snapshot for a null move; restored wholesale by
/// `Board::unmake_null`.
#[derive(Clone, Copy, Debug)]
pub struct NullMove {
    pub(crate) flags_before: u32,
    pub(crate) key_before: u64,
    pub(crate) halfmove_before: u8,
}
