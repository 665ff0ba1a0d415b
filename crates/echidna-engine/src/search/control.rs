//! Layered cancellation: optional node and wall-clock budgets.
//!
//! The core search contract is unbounded; a caller that wants
//! time-boundedness builds a [`SearchControl`] with limits, and the search
//! checks it at the top of every node, unwinding with the best completed
//! result when a limit fires.

use std::time::{Duration, Instant};

/// Node-count and deadline limits for one search.
#[derive(Debug, Clone)]
pub struct SearchControl {
    deadline: Option<Instant>,
    node_budget: Option<u64>,
}

impl SearchControl {
    /// No limits: the search runs to its full depth.
    pub fn unbounded() -> SearchControl {
        SearchControl { deadline: None, node_budget: None }
    }

    /// Stop after roughly `limit` visited nodes.
    pub fn node_budget(mut self, limit: u64) -> SearchControl {
        self.node_budget = Some(limit);
        self
    }

    /// Stop when `duration` has elapsed from now.
    pub fn deadline(mut self, duration: Duration) -> SearchControl {
        self.deadline = Some(Instant::now() + duration);
        self
    }

    /// Whether the search should unwind.
    ///
    /// The clock is only consulted every 1024 nodes; `Instant` reads are
    /// not free and the budget is approximate anyway.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if let Some(limit) = self.node_budget
            && nodes > limit
        {
            return true;
        }
        if let Some(deadline) = self.deadline
            && nodes & 1023 == 0
            && Instant::now() >= deadline
        {
            return true;
        }
        false
    }
}

impl Default for SearchControl {
    fn default() -> SearchControl {
        SearchControl::unbounded()
    }
}
