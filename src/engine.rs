//! Engine lifecycle: background search, timers, cancellation.
//!
//! [`NegamaxEngine`] is the controller the UCI loop talks to. A `go` runs
//! one [`Searcher`] on a worker thread; an optional timer thread sleeps
//! for the allocated budget and then raises the stop flags, guarded by a
//! generation counter so a timer from a previous search cannot interrupt
//! the current one. All shared state between controller, worker and timer
//! is the small [`SearchFlags`] atomics block.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::board::Board;
use crate::errors::EngineError;
use crate::move_types::Move;
use crate::piece_types::Color;
use crate::search::{SearchOutcome, Searcher};
use crate::transposition::DEFAULT_TT_CAPACITY;

/// Target depth when `go` gives no limit.
pub const DEFAULT_SEARCH_DEPTH: u32 = 7;
/// Depth ceiling for `go infinite`.
pub const MAX_SEARCH_DEPTH: u32 = crate::search::MAX_PLY as u32;

/// Cooperative cancellation state shared by controller, worker and timer.
pub struct SearchFlags {
    stop_required: AtomicBool,
    stop_required_by_timeout: AtomicBool,
    running: AtomicBool,
    run_id: AtomicU64,
}

impl SearchFlags {
    pub fn new() -> SearchFlags {
        SearchFlags {
            stop_required: AtomicBool::new(false),
            stop_required_by_timeout: AtomicBool::new(false),
            running: AtomicBool::new(false),
            run_id: AtomicU64::new(0),
        }
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_required.load(Ordering::Relaxed)
    }

    pub fn timed_out(&self) -> bool {
        self.stop_required_by_timeout.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn request_stop(&self) {
        self.stop_required.store(true, Ordering::Relaxed);
    }

    fn request_timeout_stop(&self) {
        self.stop_required_by_timeout.store(true, Ordering::Relaxed);
        self.stop_required.store(true, Ordering::Relaxed);
    }

    fn clear_stop(&self) {
        self.stop_required.store(false, Ordering::Relaxed);
        self.stop_required_by_timeout.store(false, Ordering::Relaxed);
    }

    fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Relaxed);
    }

    fn next_run(&self) -> u64 {
        self.run_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn current_run(&self) -> u64 {
        self.run_id.load(Ordering::Relaxed)
    }
}

impl Default for SearchFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Search parameters from a UCI `go` command. Zero means "not given".
#[derive(Clone, Copy, Debug, Default)]
pub struct GoParams {
    pub depth: u32,
    pub movetime: u64,
    pub wtime: u64,
    pub btime: u64,
    pub movestogo: u32,
    pub infinite: bool,
}

pub struct NegamaxEngine {
    flags: Arc<SearchFlags>,
    worker: Option<JoinHandle<()>>,
    tt_capacity: usize,
}

impl NegamaxEngine {
    pub fn new() -> NegamaxEngine {
        NegamaxEngine {
            flags: Arc::new(SearchFlags::new()),
            worker: None,
            tt_capacity: DEFAULT_TT_CAPACITY,
        }
    }

    pub fn with_tt_capacity(tt_capacity: usize) -> NegamaxEngine {
        NegamaxEngine {
            flags: Arc::new(SearchFlags::new()),
            worker: None,
            tt_capacity,
        }
    }

    pub fn is_running(&self) -> bool {
        self.flags.is_running()
    }

    /// Start a background search; the worker emits `info` lines while it
    /// runs and `bestmove` when it finishes. Fails with
    /// [`EngineError::EngineBusy`] while a search is in flight.
    pub fn start_search(&mut self, board: Board, params: GoParams) -> Result<(), EngineError> {
        if self.flags.is_running() {
            return Err(EngineError::EngineBusy);
        }
        // Reap a worker that already finished on its own.
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.flags.clear_stop();

        let depth = if params.infinite {
            MAX_SEARCH_DEPTH
        } else if params.depth == 0 {
            DEFAULT_SEARCH_DEPTH
        } else {
            params.depth.min(MAX_SEARCH_DEPTH)
        };
        let budget_ms = time_budget(&board, &params);
        let run_id = self.flags.next_run();
        self.flags.set_running(true);

        if let Some(ms) = budget_ms {
            let flags = Arc::clone(&self.flags);
            // Detached timer; the run-id check invalidates it if it
            // outlives this search.
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(ms));
                if flags.is_running() && flags.current_run() == run_id {
                    flags.request_timeout_stop();
                }
            });
        }

        let flags = Arc::clone(&self.flags);
        let tt_capacity = self.tt_capacity;
        self.worker = Some(thread::spawn(move || {
            let mut board = board;
            let mut searcher = Searcher::new(Arc::clone(&flags), tt_capacity);
            let outcome = searcher.iterative_deepening(
                &mut board,
                depth,
                budget_ms.map(Duration::from_millis),
            );
            match outcome.best_move {
                Some(best) => println!("bestmove {}", best.uci()),
                None => println!("bestmove 0000"),
            }
            flags.set_running(false);
        }));
        Ok(())
    }

    /// Request cancellation and wait for the worker to emit its
    /// `bestmove` and exit. Idempotent.
    pub fn stop(&mut self) {
        self.flags.request_stop();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.flags.clear_stop();
        self.flags.set_running(false);
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking convenience search at a fixed depth.
pub fn find_best_move(board: &Board, depth: u32) -> Option<(Move, i32)> {
    let flags = Arc::new(SearchFlags::new());
    let mut searcher = Searcher::new(flags, DEFAULT_TT_CAPACITY);
    let mut board = board.clone();
    let outcome: SearchOutcome = searcher.iterative_deepening(&mut board, depth, None);
    outcome.best_move.map(|mv| (mv, outcome.score))
}

/// Milliseconds allotted to this move, if the `go` command carried any
/// clock at all. `movetime` wins outright; otherwise the side's clock is
/// spread over `movestogo` moves when given, else over the moves left to
/// move 60 (at least 10). The allocation is capped so that almost all of
/// the remaining clock is never spent on one move.
fn time_budget(board: &Board, params: &GoParams) -> Option<u64> {
    if params.movetime > 0 {
        return Some(params.movetime);
    }
    if params.wtime == 0 && params.btime == 0 {
        return None;
    }
    let base = if board.side_to_move() == Color::White {
        params.wtime
    } else {
        params.btime
    };
    let allocation = if params.movestogo > 0 {
        base / u64::from(params.movestogo)
    } else {
        let moves_wanted = 60u64.saturating_sub(u64::from(board.fullmove())).max(10);
        base / moves_wanted
    };
    Some(allocation.min(base.saturating_sub(200).max(15)))
}
