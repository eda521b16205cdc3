//! Negamax alpha-beta search.
//!
//! One node does, in order: cancellation poll, transposition-table probe
//! (which may cut, tighten alpha, and always yields the hash move for
//! ordering), quiescence at the horizon, then the move loop. The first
//! legal move is searched with the full window; once a move has raised
//! alpha, later moves are probed with a null window and only re-searched -
//! through a widening ladder of 1/8, 1/4, 1/2 and finally the full
//! window - when the probe lands inside the window. Beta cutoffs feed the
//! killer lists; alpha raises rebuild the principal variation. At the root
//! the searched move list, sorted by score, is handed back to the driver
//! for the next deepening pass.

use super::ordering::order_moves;
use super::{Searcher, MATE_PLY_STEP, MATE_SCORE, SCORE_INF};
use crate::board::Board;
use crate::move_types::{Move, MoveList};
use crate::transposition::{Bound, Probe, TtEntry};

impl Searcher {
    #[allow(clippy::too_many_arguments)]
    pub fn negamax(
        &mut self,
        board: &mut Board,
        max_depth: i32,
        remaining: i32,
        current_depth: i32,
        color: i32,
        mut alpha: i32,
        beta: i32,
        parent_pv: &mut MoveList,
        previous_pv: &[Move],
        mut top_ordering: Option<&mut MoveList>,
    ) -> i32 {
        if self.flags.stop_requested() {
            // Fail high without touching the table: the cancelled frame
            // must not pollute it.
            return beta;
        }

        let ply = current_depth as usize;
        let key = board.key();

        let mut hash_move: Option<Move> = None;
        let mut tt_entry: Option<TtEntry> = None;
        match self.tt.probe(key) {
            Probe::Hit(entry) => tt_entry = Some(*entry),
            Probe::Conflict => self.stats[ply].num_hash_conflicts += 1,
            Probe::Empty => {}
        }
        if let Some(entry) = tt_entry {
            if let Some((src, dst, promote)) = entry.best {
                hash_move = board.move_from_squares(src, dst, promote);
            }
            if entry.depth >= remaining {
                match entry.bound {
                    Bound::Exact => {
                        self.stats[ply].num_hash_hits += 1;
                        if let Some(hm) = hash_move {
                            parent_pv.clear();
                            parent_pv.push(hm);
                        }
                        return if entry.score >= beta {
                            beta
                        } else if entry.score <= alpha {
                            alpha
                        } else {
                            entry.score
                        };
                    }
                    Bound::LowerBound => {
                        if entry.score >= beta {
                            self.stats[ply].num_hash_hits += 1;
                            return beta;
                        }
                        if entry.score >= alpha {
                            alpha = entry.score;
                        }
                    }
                    Bound::UpperBound => {
                        if entry.score <= alpha {
                            self.stats[ply].num_hash_hits += 1;
                            return alpha;
                        }
                    }
                }
            }
        }

        if remaining == 0 {
            self.stats[ply].num_leaf_nodes += 1;
            return self.quiesce(board, color, alpha, beta, current_depth);
        }
        self.total_nodes += 1;

        let mover = board.side_to_move();
        let mut moves: MoveList = match top_ordering.as_ref() {
            // The root reuses the ordering accumulated by the previous
            // deepening pass.
            Some(top) if !top.is_empty() => (**top).clone(),
            _ => {
                let mut generated = self.move_gen.gen_pseudo_legal(board);
                order_moves(
                    &mut generated,
                    ply,
                    previous_pv,
                    self.killers.at(ply),
                    hash_move.as_ref(),
                );
                generated
            }
        };

        let mut current_pv: MoveList = Vec::with_capacity(remaining as usize + 1);
        let mut best_move: Option<Move> = None;
        let mut best_score = -SCORE_INF;
        let mut cutoff = false;
        let mut raised_alpha = false;
        let mut scout = false;
        let mut num_legal = 0u32;
        let mut num_visited = 0u32;

        for i in 0..moves.len() {
            if moves[i].legal_checked && !moves[i].legal {
                continue;
            }
            num_visited += 1;
            let mut mv = moves[i];
            board.make(&mut mv, &self.move_gen);
            if board.in_check(mover) {
                mv.legal_checked = true;
                mv.legal = false;
                mv.score = -SCORE_INF;
                board.unmake(&mv);
                moves[i] = mv;
                continue;
            }
            mv.legal_checked = true;
            mv.legal = true;
            num_legal += 1;

            let mut score;
            if scout && remaining >= 2 {
                score = -self.negamax(
                    board,
                    max_depth,
                    remaining - 1,
                    current_depth + 1,
                    -color,
                    -alpha - 1,
                    -alpha,
                    &mut current_pv,
                    previous_pv,
                    None,
                );
                if score > alpha && score < beta {
                    // The null-window probe improved alpha: re-search with
                    // a widening lower bound until the score is exact.
                    let window = beta - alpha;
                    let mut lower = -alpha - 1;
                    let mut k = 0;
                    while score > alpha && score < beta && lower > -beta && k <= 3 {
                        if k < 3 {
                            let div = 8 >> k;
                            lower = std::cmp::min(-alpha - (window + div - 1) / div, lower - 1);
                        } else {
                            lower = -beta;
                        }
                        score = -self.negamax(
                            board,
                            max_depth,
                            remaining - 1,
                            current_depth + 1,
                            -color,
                            lower,
                            -alpha,
                            &mut current_pv,
                            previous_pv,
                            None,
                        );
                        k += 1;
                    }
                }
            } else {
                score = -self.negamax(
                    board,
                    max_depth,
                    remaining - 1,
                    current_depth + 1,
                    -color,
                    -beta,
                    -alpha,
                    &mut current_pv,
                    previous_pv,
                    None,
                );
            }
            board.unmake(&mv);
            mv.score = score;
            moves[i] = mv;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score >= beta {
                alpha = beta;
                if self.flags.stop_requested() {
                    return beta;
                }
                best_move = Some(mv);
                cutoff = true;
                let stats = &mut self.stats[ply];
                if mv.pv_move {
                    stats.num_cut_by_pv += 1;
                } else if mv.killer {
                    stats.num_cut_by_killer += 1;
                }
                if !mv.is_capture() && !mv.killer {
                    let mut killer = mv;
                    killer.killer = true;
                    killer.mate_killer = score >= MATE_SCORE - MATE_PLY_STEP * (max_depth + 1);
                    self.killers.insert(ply, killer);
                }
                break;
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                parent_pv.clear();
                parent_pv.push(mv);
                parent_pv.extend_from_slice(&current_pv);
                raised_alpha = true;
                scout = true;
            }
        }

        {
            let stats = &mut self.stats[ply];
            stats.num_nodes += 1;
            stats.num_move_generated += moves.len() as u32;
            stats.num_move_visited += num_visited;
            stats.num_move_skipped += moves.len() as u32 - num_visited;
            if cutoff {
                stats.num_cutoffs += 1;
            } else if raised_alpha {
                stats.num_pv_nodes += 1;
            } else {
                stats.num_fail_low_nodes += 1;
            }
        }

        if num_legal == 0 {
            return if board.in_check(mover) {
                // Quickest forced mate scores best.
                -MATE_SCORE + MATE_PLY_STEP * current_depth
            } else {
                0 // stalemate
            };
        }

        let bound = if cutoff {
            Bound::LowerBound
        } else if raised_alpha {
            Bound::Exact
        } else {
            Bound::UpperBound
        };
        self.tt.store(
            key,
            remaining,
            alpha,
            bound,
            best_move.map(|m| (m.src, m.dst, m.promote)),
        );

        if current_depth == 0 {
            if let Some(top) = top_ordering {
                moves.sort_by(|a, b| b.score.cmp(&a.score));
                *top = moves;
            }
        }
        alpha
    }
}
