//! Zobrist hashing for board positions.
//!
//! One random 64-bit key is seeded per `(color, piece, square)` triple, per
//! castling-right bit, per en-passant file, and one for the side to move.
//! The position key is the XOR of every applicable seed, which is what
//! allows `Board::make` to maintain it incrementally: a move only XORs the
//! seeds it touches.
//!
//! The table is generated from a fixed seed so that hashes - and therefore
//! fixed-depth searches - are reproducible across runs.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::piece_types::{Color, Piece};

const ZOBRIST_SEED: u64 = 0x5EED_1E55_C0FF_EE00;

pub struct ZobristKeys {
    /// Indexed by `[color][piece][square]`.
    pieces: [[[u64; 64]; 6]; 2],
    /// Indexed by castle-right bit position (WK, WQ, BK, BQ).
    castling: [u64; 4],
    /// Indexed by en-passant file.
    en_passant: [u64; 8],
    /// XOR-ed in while White is to move.
    side_to_move: u64,
}

impl ZobristKeys {
    fn new(seed: u64) -> ZobristKeys {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in pieces.iter_mut() {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let mut castling = [0u64; 4];
        for key in castling.iter_mut() {
            *key = rng.gen();
        }
        let mut en_passant = [0u64; 8];
        for key in en_passant.iter_mut() {
            *key = rng.gen();
        }
        ZobristKeys {
            pieces,
            castling,
            en_passant,
            side_to_move: rng.gen(),
        }
    }

    #[inline(always)]
    pub fn piece(&self, color: Color, piece: Piece, square: u8) -> u64 {
        self.pieces[color.idx()][piece.idx()][square as usize]
    }

    /// Key for one castle-right bit position (0 = WK .. 3 = BQ).
    #[inline(always)]
    pub fn castling(&self, bit: u32) -> u64 {
        self.castling[bit as usize]
    }

    #[inline(always)]
    pub fn en_passant(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> u64 {
        self.side_to_move
    }
}

pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| ZobristKeys::new(ZOBRIST_SEED));

/// Recompute the position key from scratch. `Board::make` keeps the key
/// current incrementally; this is the reference the increments must agree
/// with, and what the FEN reader uses to seed a freshly loaded position.
pub fn full_hash(board: &Board) -> u64 {
    let mut key = 0u64;
    for square in 0..64u8 {
        if let Some((color, piece)) = board.piece_at(square) {
            key ^= ZOBRIST.piece(color, piece, square);
        }
    }
    let rights = board.castle_rights();
    for bit in 0..4 {
        if rights & (1 << bit) != 0 {
            key ^= ZOBRIST.castling(bit);
        }
    }
    if let Some(file) = board.en_passant_file() {
        key ^= ZOBRIST.en_passant(file);
    }
    if board.side_to_move() == Color::White {
        key ^= ZOBRIST.side_to_move();
    }
    key
}
