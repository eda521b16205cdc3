//! Move ordering.
//!
//! Full ordering for negamax nodes: hash move first, then the previous
//! iteration's PV move for this ply, captures by MVV-LVA, mate killers,
//! ordinary killers, and finally the remaining quiet moves in generator
//! order (the sort is stable). Quiescence orders by MVV-LVA alone.

use crate::move_types::{Move, MoveList};
use crate::piece_types::piece_value;

const HASH_MOVE_KEY: i32 = 3_000_000;
const PV_MOVE_KEY: i32 = 2_000_000;
const CAPTURE_KEY: i32 = 1_000_000;
const MATE_KILLER_KEY: i32 = 900_000;
const KILLER_KEY: i32 = 800_000;

/// Most Valuable Victim - Least Valuable Attacker.
pub fn mvv_lva(mv: &Move) -> i32 {
    match mv.captured {
        Some(victim) => 10 * piece_value(victim) - piece_value(mv.piece),
        None => 0,
    }
}

pub fn order_moves(
    moves: &mut MoveList,
    ply: usize,
    previous_pv: &[Move],
    killers: &[Move],
    hash_move: Option<&Move>,
) {
    let pv_move = previous_pv.get(ply);
    for mv in moves.iter_mut() {
        mv.mvv_lva = mvv_lva(mv);
        if hash_move.is_some_and(|h| h.same_move(mv)) {
            mv.hash_move = true;
        }
        if pv_move.is_some_and(|p| p.same_move(mv)) {
            mv.pv_move = true;
        }
        if let Some(killer) = killers.iter().find(|k| k.same_move(mv)) {
            mv.killer = true;
            mv.mate_killer = killer.mate_killer;
        }
    }
    moves.sort_by(|a, b| order_key(b).cmp(&order_key(a)));
}

/// Capture-only ordering for quiescence.
pub fn order_mvv_lva(moves: &mut MoveList) {
    for mv in moves.iter_mut() {
        mv.mvv_lva = mvv_lva(mv);
    }
    moves.sort_by(|a, b| b.mvv_lva.cmp(&a.mvv_lva));
}

fn order_key(mv: &Move) -> i32 {
    if mv.hash_move {
        HASH_MOVE_KEY
    } else if mv.pv_move {
        PV_MOVE_KEY
    } else if mv.is_capture() {
        // MVV-LVA spans less than the gap down to the killer band.
        CAPTURE_KEY + mv.mvv_lva
    } else if mv.mate_killer {
        MATE_KILLER_KEY
    } else if mv.killer {
        KILLER_KEY
    } else {
        0
    }
}
