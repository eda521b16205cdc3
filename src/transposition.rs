//! Transposition table.
//!
//! A fixed-size, direct-mapped table keyed by `key % capacity`. A probe
//! only hits on full 64-bit key equality; a bucket holding a different
//! non-zero key is reported as a conflict so the searcher can count it.
//! Replacement is depth-preferred-always-replace: a write lands iff the
//! bucket is empty or the new entry was searched strictly deeper. No
//! aging, no two-tier scheme.

use crate::piece_types::Piece;

/// Roughly 1M buckets; small for strong play but cheap to clear. Capacity
/// is a constructor parameter, this is just the engine's default.
pub const DEFAULT_TT_CAPACITY: usize = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    LowerBound,
    UpperBound,
}

#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub key: u64,
    /// Remaining depth the score was computed at.
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
    /// Best move found here, as `(src, dst, promotion)`.
    pub best: Option<(u8, u8, Option<Piece>)>,
}

const EMPTY: TtEntry = TtEntry {
    key: 0,
    depth: 0,
    score: 0,
    bound: Bound::Exact,
    best: None,
};

pub enum Probe<'a> {
    Hit(&'a TtEntry),
    /// The bucket holds a different position.
    Conflict,
    Empty,
}

pub struct TranspositionTable {
    entries: Vec<TtEntry>,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> TranspositionTable {
        TranspositionTable {
            entries: vec![EMPTY; capacity.max(1)],
        }
    }

    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    pub fn probe(&self, key: u64) -> Probe<'_> {
        let entry = &self.entries[self.index(key)];
        if entry.key == key {
            Probe::Hit(entry)
        } else if entry.key != 0 {
            Probe::Conflict
        } else {
            Probe::Empty
        }
    }

    /// Store under the replacement policy. Returns whether the entry was
    /// written.
    pub fn store(
        &mut self,
        key: u64,
        depth: i32,
        score: i32,
        bound: Bound,
        best: Option<(u8, u8, Option<Piece>)>,
    ) -> bool {
        let idx = self.index(key);
        let entry = &mut self.entries[idx];
        if entry.key != 0 && depth <= entry.depth {
            return false;
        }
        *entry = TtEntry {
            key,
            depth,
            score,
            bound,
            best,
        };
        true
    }

    pub fn clear(&mut self) {
        self.entries.fill(EMPTY);
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}
