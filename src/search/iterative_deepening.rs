//! Iterative deepening driver.
//!
//! Searches depth 1, 2, ... up to the target, reusing the previous
//! iteration's principal variation and root move ordering. Each completed
//! iteration publishes a UCI `info` line and becomes the new best result;
//! an iteration cut short by `stop` or the time budget is discarded, so
//! the reported best move always comes from the last fully completed
//! pass.

use std::time::{Duration, Instant};

use super::{Searcher, MAX_PLY, SCORE_INF};
use crate::board::Board;
use crate::move_types::{Move, MoveList};

pub struct SearchOutcome {
    /// Best move of the last fully completed iteration.
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth_reached: u32,
    /// Whether the search ended on stop/timeout rather than by reaching
    /// the target depth.
    pub interrupted: bool,
}

impl Searcher {
    pub fn iterative_deepening(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        budget: Option<Duration>,
    ) -> SearchOutcome {
        let max_depth = max_depth.min(MAX_PLY as u32);
        let color = board.side_to_move().sign();
        let mut previous_pv: MoveList = Vec::new();
        let mut top_ordering: MoveList = Vec::new();
        let mut outcome = SearchOutcome {
            best_move: None,
            score: 0,
            depth_reached: 0,
            interrupted: false,
        };

        let search_start = Instant::now();
        self.begin_search(max_depth);

        for depth in 1..=max_depth {
            self.begin_iteration();
            let iteration_start = Instant::now();
            let mut pv: MoveList = Vec::with_capacity(depth as usize);

            let score = self.negamax(
                board,
                depth as i32,
                depth as i32,
                0,
                color,
                -SCORE_INF,
                SCORE_INF,
                &mut pv,
                &previous_pv,
                Some(&mut top_ordering),
            );

            if self.flags.timed_out() && budget.is_some_and(|b| search_start.elapsed() > b) {
                log::info!("search abandoned on timeout during depth {depth}");
                outcome.interrupted = true;
                break;
            }
            if self.flags.stop_requested() {
                outcome.interrupted = true;
                break;
            }
            if pv.is_empty() {
                // No legal move at the root (mate or stalemate).
                break;
            }

            let nodes = self.total_nodes + self.total_quiescence_nodes;
            let elapsed_ms = iteration_start.elapsed().as_millis().max(1) as u64;
            let nps = nodes * 1000 / elapsed_ms;
            let pv_text: Vec<String> = pv.iter().map(Move::uci).collect();
            println!(
                "info depth {} score cp {} nodes {} nps {} pv {} time {}",
                depth,
                score,
                nodes,
                nps,
                pv_text.join(" "),
                elapsed_ms
            );

            outcome.best_move = Some(pv[0]);
            outcome.score = score;
            outcome.depth_reached = depth;
            self.log_stats(depth);
            previous_pv = pv;
        }
        outcome
    }
}
