//! Transposition table: a bounded cache of completed subtree searches.
//!
//! Slots are indexed by the low bits of the Zobrist hash; each entry keeps
//! the full 64-bit key and is verified on probe, so a hash collision can
//! never return a wrong entry. Replacement keeps the deeper of two
//! competing entries (a shallow result is cheaper to recompute), breaking
//! depth ties in favor of the newer store, and always yields to entries
//! from a fresher search generation.

use echidna_board::Move;

/// How the stored score bounds the true value of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is exact: the search window was never cut off.
    Exact,
    /// The score is a lower bound (the node failed high / beta cutoff).
    Lower,
    /// The score is an upper bound (no move raised alpha).
    Upper,
}

/// Scores beyond this magnitude encode a forced mate.
pub const MATE_BOUND: i32 = 28_000;

/// Convert a root-relative score to table-storable form.
///
/// Mate scores are path-dependent (`MATE_SCORE - ply`), so they are stored
/// as distance-from-this-node instead of distance-from-root; otherwise an
/// entry written on one path would be wrong on another.
pub fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score > MATE_BOUND {
        score + ply
    } else if score < -MATE_BOUND {
        score - ply
    } else {
        score
    }
}

/// Reverse the adjustment applied by [`score_to_tt`].
pub fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score > MATE_BOUND {
        score - ply
    } else if score < -MATE_BOUND {
        score + ply
    } else {
        score
    }
}

/// A stored search result.
#[derive(Debug, Clone, Copy)]
struct Entry {
    key: u64,
    depth: u8,
    generation: u8,
    bound: Bound,
    score: i32,
    best_move: Option<Move>,
}

/// A probe hit, with the mate-distance adjustment already undone.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    /// Remaining depth the entry was searched to.
    pub depth: u8,
    /// Bound classification of the stored score.
    pub bound: Bound,
    /// Score, root-relative for the probing node.
    pub score: i32,
    /// Best move found when the entry was stored, for move ordering.
    pub best_move: Option<Move>,
}

/// Bounded transposition table.
///
/// Purely sequential: the search is single-threaded, so probes and stores
/// take `&self`/`&mut self` with no synchronization.
#[derive(Debug)]
pub struct TranspositionTable {
    slots: Box<[Option<Entry>]>,
    mask: u64,
    generation: u8,
}

impl TranspositionTable {
    /// Default capacity: 2^20 slots (about 40 MB of entries).
    pub const DEFAULT_CAPACITY: usize = 1 << 20;

    /// Create a table with at least `capacity` slots, rounded up to a
    /// power of two (minimum 1).
    pub fn new(capacity: usize) -> TranspositionTable {
        let slots = capacity.max(1).next_power_of_two();
        TranspositionTable {
            slots: vec![None; slots].into_boxed_slice(),
            mask: (slots - 1) as u64,
            generation: 0,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drop all entries and reset the generation counter.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.generation = 0;
    }

    /// Advance the generation counter. Called once per top-level search so
    /// that stale entries lose replacement fights against fresh ones.
    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Look up a position. `ply` is the probing node's distance from the
    /// root, used to re-relativize mate scores.
    pub fn probe(&self, hash: u64, ply: i32) -> Option<Probe> {
        let entry = self.slots[(hash & self.mask) as usize].as_ref()?;
        if entry.key != hash {
            return None;
        }
        Some(Probe {
            depth: entry.depth,
            bound: entry.bound,
            score: score_from_tt(entry.score, ply),
            best_move: entry.best_move,
        })
    }

    /// Store a completed subtree result.
    ///
    /// The incumbent survives only when it is deeper, from the current
    /// generation, and the newcomer is neither exact nor for the same
    /// position at equal-or-greater depth.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u8,
        score: i32,
        best_move: Option<Move>,
        bound: Bound,
        ply: i32,
    ) {
        let index = (hash & self.mask) as usize;

        if let Some(existing) = &self.slots[index] {
            let evict = existing.generation != self.generation
                || depth >= existing.depth
                || bound == Bound::Exact;
            if !evict {
                return;
            }
        }

        self.slots[index] = Some(Entry {
            key: hash,
            depth,
            generation: self.generation,
            bound,
            score: score_to_tt(score, ply),
            best_move,
        });
    }
}

impl Default for TranspositionTable {
    fn default() -> TranspositionTable {
        TranspositionTable::new(Self::DEFAULT_CAPACITY)
    }
}
