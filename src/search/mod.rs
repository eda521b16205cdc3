//! The search core: negamax alpha-beta with iterative deepening.
//!
//! A [`Searcher`] owns everything one search needs - transposition table,
//! killer lists, statistics, node counters - and is driven by
//! `iterative_deepening`. Cancellation is cooperative through the shared
//! [`SearchFlags`](crate::engine::SearchFlags), polled at every negamax
//! and quiescence entry.

pub mod killers;
pub mod ordering;

mod iterative_deepening;
mod negamax;
mod quiescence;

pub use self::iterative_deepening::SearchOutcome;

use std::sync::Arc;

use crate::engine::SearchFlags;
use crate::eval::Evaluator;
use crate::move_generation::MoveGen;
use crate::transposition::TranspositionTable;
use self::killers::KillerTable;

pub const SCORE_INF: i32 = 999_999;
pub const MATE_SCORE: i32 = 20_000;
/// Mates found in fewer plies score higher by this much per ply.
pub const MATE_PLY_STEP: i32 = 5;
/// Deepest supported search, and the size of the per-ply tables.
pub const MAX_PLY: usize = 64;

/// Per-ply search counters for one iterative-deepening pass.
#[derive(Clone, Copy, Default)]
pub struct Stats {
    pub num_nodes: u32,
    pub num_leaf_nodes: u32,
    pub num_cutoffs: u32,
    pub num_cut_by_killer: u32,
    pub num_cut_by_pv: u32,
    pub num_pv_nodes: u32,
    pub num_fail_low_nodes: u32,
    pub num_move_generated: u32,
    pub num_move_visited: u32,
    pub num_move_skipped: u32,
    pub num_hash_hits: u32,
    pub num_hash_conflicts: u32,
}

pub struct Searcher {
    pub(crate) move_gen: MoveGen,
    pub(crate) eval: Evaluator,
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: KillerTable,
    /// Indexed by ply from the root; reset per iteration.
    pub(crate) stats: Vec<Stats>,
    pub(crate) total_nodes: u64,
    pub(crate) total_quiescence_nodes: u64,
    pub(crate) flags: Arc<SearchFlags>,
}

impl Searcher {
    pub fn new(flags: Arc<SearchFlags>, tt_capacity: usize) -> Searcher {
        Searcher {
            move_gen: MoveGen::new(),
            eval: Evaluator::new(),
            tt: TranspositionTable::new(tt_capacity),
            killers: KillerTable::new(),
            stats: vec![Stats::default(); MAX_PLY + 1],
            total_nodes: 0,
            total_quiescence_nodes: 0,
            flags,
        }
    }

    /// Per-search setup: killer lists sized to the target depth.
    pub(crate) fn begin_search(&mut self, max_depth: u32) {
        self.killers.reset(max_depth as usize);
    }

    /// Per-iteration reset of counters and statistics.
    pub(crate) fn begin_iteration(&mut self) {
        self.total_nodes = 0;
        self.total_quiescence_nodes = 0;
        self.stats.fill(Stats::default());
    }

    pub(crate) fn log_stats(&self, depth: u32) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        for (ply, s) in self.stats.iter().enumerate() {
            if s.num_nodes == 0 && s.num_leaf_nodes == 0 {
                continue;
            }
            log::debug!(
                "iter {} ply {}: nodes={} leaf={} cutoffs={} (killer={} pv={}) \
                 pv_nodes={} fail_low={} moves gen/visit/skip={}/{}/{} hash hit/conflict={}/{}",
                depth,
                ply,
                s.num_nodes,
                s.num_leaf_nodes,
                s.num_cutoffs,
                s.num_cut_by_killer,
                s.num_cut_by_pv,
                s.num_pv_nodes,
                s.num_fail_low_nodes,
                s.num_move_generated,
                s.num_move_visited,
                s.num_move_skipped,
                s.num_hash_hits,
                s.num_hash_conflicts,
            );
        }
    }
}
