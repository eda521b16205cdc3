//! Pseudo-legal move generation.
//!
//! `MoveGen` precomputes leaper target tables (knight, king, and the
//! squares a pawn attacks *from*) and walks rays for sliders directly on
//! the packed board. Generated moves are pseudo-legal: the searcher makes
//! each move and rejects it if the mover's own king ends up in check.
//! Castling is the exception - the transit squares are verified here,
//! because leaving the king's path through check to the make/unmake filter
//! would miss it.
//!
//! The same tables answer `is_attacked`, which backs the board's check
//! detection.

use crate::board::{
    Board, CR_BLACK_KING, CR_BLACK_QUEEN, CR_WHITE_KING, CR_WHITE_QUEEN,
};
use crate::board_utils::{sq, sq_to_file, sq_to_rank};
use crate::move_types::{Move, MoveList};
use crate::piece_types::{Color, Piece};

const ORTHO_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAG_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

pub struct MoveGen {
    knight_targets: Vec<Vec<u8>>,
    king_targets: Vec<Vec<u8>>,
    /// `pawn_sources[color][target]`: squares from which a pawn of `color`
    /// attacks `target`.
    pawn_sources: [Vec<Vec<u8>>; 2],
}

impl Default for MoveGen {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGen {
    pub fn new() -> MoveGen {
        let mut knight_targets = vec![Vec::new(); 64];
        let mut king_targets = vec![Vec::new(); 64];
        let mut white_pawn_sources = vec![Vec::new(); 64];
        let mut black_pawn_sources = vec![Vec::new(); 64];

        for square in 0..64u8 {
            let rank = sq_to_rank(square) as i8;
            let file = sq_to_file(square) as i8;
            for (dr, df) in KNIGHT_JUMPS {
                if let Some(target) = offset(rank, file, dr, df) {
                    knight_targets[square as usize].push(target);
                }
            }
            for (dr, df) in ORTHO_DIRS.iter().chain(DIAG_DIRS.iter()) {
                if let Some(target) = offset(rank, file, *dr, *df) {
                    king_targets[square as usize].push(target);
                }
            }
            // A white pawn attacks upward, so its source square is one
            // rank below the target.
            for df in [-1, 1] {
                if let Some(source) = offset(rank, file, -1, df) {
                    white_pawn_sources[square as usize].push(source);
                }
                if let Some(source) = offset(rank, file, 1, df) {
                    black_pawn_sources[square as usize].push(source);
                }
            }
        }

        MoveGen {
            knight_targets,
            king_targets,
            pawn_sources: [black_pawn_sources, white_pawn_sources],
        }
    }

    // ---- attack query -----------------------------------------------

    /// Does `by` attack `square` in this position?
    pub fn is_attacked(&self, board: &Board, square: u8, by: Color) -> bool {
        for &source in &self.pawn_sources[by.idx()][square as usize] {
            if board.piece_at(source) == Some((by, Piece::Pawn)) {
                return true;
            }
        }
        for &source in &self.knight_targets[square as usize] {
            if board.piece_at(source) == Some((by, Piece::Knight)) {
                return true;
            }
        }
        for &source in &self.king_targets[square as usize] {
            if board.piece_at(source) == Some((by, Piece::King)) {
                return true;
            }
        }
        self.ray_attacked(board, square, by, &ORTHO_DIRS, Piece::Rook)
            || self.ray_attacked(board, square, by, &DIAG_DIRS, Piece::Bishop)
    }

    fn ray_attacked(
        &self,
        board: &Board,
        square: u8,
        by: Color,
        dirs: &[(i8, i8); 4],
        slider: Piece,
    ) -> bool {
        let rank = sq_to_rank(square) as i8;
        let file = sq_to_file(square) as i8;
        for &(dr, df) in dirs {
            let mut step = 1;
            while let Some(target) = offset(rank, file, dr * step, df * step) {
                if let Some((color, piece)) = board.piece_at(target) {
                    if color == by && (piece == slider || piece == Piece::Queen) {
                        return true;
                    }
                    break;
                }
                step += 1;
            }
        }
        false
    }

    // ---- generation -------------------------------------------------

    /// All pseudo-legal moves for the side to move.
    pub fn gen_pseudo_legal(&self, board: &Board) -> MoveList {
        self.generate(board, false)
    }

    /// Captures and promotions only, for quiescence.
    pub fn gen_captures(&self, board: &Board) -> MoveList {
        self.generate(board, true)
    }

    fn generate(&self, board: &Board, captures_only: bool) -> MoveList {
        let color = board.side_to_move();
        let mut out = MoveList::with_capacity(if captures_only { 16 } else { 48 });
        for square in 0..64u8 {
            match board.piece_at(square) {
                Some((c, piece)) if c == color => match piece {
                    Piece::Pawn => self.pawn_moves(board, square, color, captures_only, &mut out),
                    Piece::Knight => self.leaper_moves(
                        board,
                        square,
                        color,
                        Piece::Knight,
                        &self.knight_targets[square as usize],
                        captures_only,
                        &mut out,
                    ),
                    Piece::King => {
                        self.leaper_moves(
                            board,
                            square,
                            color,
                            Piece::King,
                            &self.king_targets[square as usize],
                            captures_only,
                            &mut out,
                        );
                        if !captures_only {
                            self.castling_moves(board, square, color, &mut out);
                        }
                    }
                    Piece::Bishop => {
                        self.slider_moves(board, square, color, Piece::Bishop, &DIAG_DIRS, captures_only, &mut out)
                    }
                    Piece::Rook => {
                        self.slider_moves(board, square, color, Piece::Rook, &ORTHO_DIRS, captures_only, &mut out)
                    }
                    Piece::Queen => {
                        self.slider_moves(board, square, color, Piece::Queen, &DIAG_DIRS, captures_only, &mut out);
                        self.slider_moves(board, square, color, Piece::Queen, &ORTHO_DIRS, captures_only, &mut out);
                    }
                },
                _ => {}
            }
        }
        out
    }

    fn pawn_moves(
        &self,
        board: &Board,
        square: u8,
        color: Color,
        captures_only: bool,
        out: &mut MoveList,
    ) {
        let (push, start_rank, promo_rank) = match color {
            Color::White => (8i8, 1u8, 7u8),
            Color::Black => (-8i8, 6u8, 0u8),
        };

        // Pushes. Pawns never sit on the last rank, so `one` is in range.
        let one = (square as i8 + push) as u8;
        if board.piece_at(one).is_none() {
            if sq_to_rank(one) == promo_rank {
                // Promotions count as forcing moves for quiescence.
                push_promotions(out, square, one, color, None);
            } else if !captures_only {
                out.push(Move::new(square, one, color, Piece::Pawn));
                if sq_to_rank(square) == start_rank {
                    let two = (one as i8 + push) as u8;
                    if board.piece_at(two).is_none() {
                        out.push(Move::new(square, two, color, Piece::Pawn));
                    }
                }
            }
        }

        // Captures, including en passant.
        let rank = sq_to_rank(square) as i8;
        let file = sq_to_file(square) as i8;
        for df in [-1, 1] {
            let Some(target) = offset(rank, file, push / 8, df) else {
                continue;
            };
            match board.piece_at(target) {
                Some((c, victim)) if c != color => {
                    if sq_to_rank(target) == promo_rank {
                        push_promotions(out, square, target, color, Some(victim));
                    } else {
                        let mut mv = Move::new(square, target, color, Piece::Pawn);
                        mv.captured = Some(victim);
                        out.push(mv);
                    }
                }
                None => {
                    if Some(target) == board.ep_target_square(color) {
                        let mut mv = Move::new(square, target, color, Piece::Pawn);
                        mv.captured = Some(Piece::Pawn);
                        mv.en_passant = true;
                        out.push(mv);
                    }
                }
                _ => {}
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn leaper_moves(
        &self,
        board: &Board,
        square: u8,
        color: Color,
        piece: Piece,
        targets: &[u8],
        captures_only: bool,
        out: &mut MoveList,
    ) {
        for &target in targets {
            match board.piece_at(target) {
                None => {
                    if !captures_only {
                        out.push(Move::new(square, target, color, piece));
                    }
                }
                Some((c, victim)) if c != color => {
                    let mut mv = Move::new(square, target, color, piece);
                    mv.captured = Some(victim);
                    out.push(mv);
                }
                _ => {}
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn slider_moves(
        &self,
        board: &Board,
        square: u8,
        color: Color,
        piece: Piece,
        dirs: &[(i8, i8); 4],
        captures_only: bool,
        out: &mut MoveList,
    ) {
        let rank = sq_to_rank(square) as i8;
        let file = sq_to_file(square) as i8;
        for &(dr, df) in dirs {
            let mut step = 1;
            while let Some(target) = offset(rank, file, dr * step, df * step) {
                match board.piece_at(target) {
                    None => {
                        if !captures_only {
                            out.push(Move::new(square, target, color, piece));
                        }
                    }
                    Some((c, victim)) => {
                        if c != color {
                            let mut mv = Move::new(square, target, color, piece);
                            mv.captured = Some(victim);
                            out.push(mv);
                        }
                        break;
                    }
                }
                step += 1;
            }
        }
    }

    /// Castling. Requires the right, the king and rook on their home
    /// squares, empty squares between them, and the king's start and
    /// transit squares not attacked; landing in check is caught by the
    /// usual legality filter.
    fn castling_moves(&self, board: &Board, square: u8, color: Color, out: &mut MoveList) {
        let rights = board.castle_rights();
        let (king_right, queen_right, home_rank) = match color {
            Color::White => (CR_WHITE_KING, CR_WHITE_QUEEN, 0u8),
            Color::Black => (CR_BLACK_KING, CR_BLACK_QUEEN, 7u8),
        };
        if square != sq(home_rank, 4) {
            return;
        }
        let enemy = color.other();
        let home = |f: u8| sq(home_rank, f);

        if rights & king_right != 0
            && board.piece_at(home(7)) == Some((color, Piece::Rook))
            && board.piece_at(home(5)).is_none()
            && board.piece_at(home(6)).is_none()
            && !self.is_attacked(board, home(4), enemy)
            && !self.is_attacked(board, home(5), enemy)
            && !self.is_attacked(board, home(6), enemy)
        {
            let mut mv = Move::new(square, home(6), color, Piece::King);
            mv.castling = true;
            out.push(mv);
        }
        if rights & queen_right != 0
            && board.piece_at(home(0)) == Some((color, Piece::Rook))
            && board.piece_at(home(1)).is_none()
            && board.piece_at(home(2)).is_none()
            && board.piece_at(home(3)).is_none()
            && !self.is_attacked(board, home(4), enemy)
            && !self.is_attacked(board, home(3), enemy)
            && !self.is_attacked(board, home(2), enemy)
        {
            let mut mv = Move::new(square, home(2), color, Piece::King);
            mv.castling = true;
            out.push(mv);
        }
    }
}

fn push_promotions(out: &mut MoveList, src: u8, dst: u8, color: Color, captured: Option<Piece>) {
    for promo in PROMOTION_PIECES {
        let mut mv = Move::new(src, dst, color, Piece::Pawn);
        mv.captured = captured;
        mv.promote = Some(promo);
        out.push(mv);
    }
}

#[inline(always)]
fn offset(rank: i8, file: i8, dr: i8, df: i8) -> Option<u8> {
    let r = rank + dr;
    let f = file + df;
    if (0..8).contains(&r) && (0..8).contains(&f) {
        Some(sq(r as u8, f as u8))
    } else {
        None
    }
}
