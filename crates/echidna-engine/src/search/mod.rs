//! Search driver: fixed-depth best-move selection.

pub mod control;
pub mod negamax;
pub mod ordering;
pub mod tt;

use echidna_board::{Board, Move};
use tracing::{debug, info};

use crate::error::SearchError;
use control::SearchControl;
use negamax::{INF, SearchContext, negamax};
use ordering::MovePicker;
use tt::{Bound, TranspositionTable};

/// The outcome of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The move judged best for the side to move.
    pub best_move: Move,
    /// Score of `best_move` in centipawns, from the mover's perspective.
    /// Values beyond [`tt::MATE_BOUND`] encode forced mates.
    pub score: i32,
    /// Nodes visited.
    pub nodes: u64,
    /// Depth searched.
    pub depth: u8,
}

/// Fixed-depth alpha-beta searcher.
///
/// The transposition table lives here so successive calls (successive
/// engine turns) reuse it as a cache; depth and bound metadata in each
/// entry keep stale reuse from ever changing a result.
#[derive(Debug)]
pub struct Searcher {
    tt: Option<TranspositionTable>,
}

impl Searcher {
    /// Searcher with a default-sized transposition table.
    pub fn new() -> Searcher {
        Searcher::with_table_capacity(TranspositionTable::DEFAULT_CAPACITY)
    }

    /// Searcher with a table of at least `capacity` slots.
    pub fn with_table_capacity(capacity: usize) -> Searcher {
        Searcher { tt: Some(TranspositionTable::new(capacity)) }
    }

    /// Searcher with no transposition table at all. Slower, identical
    /// results.
    pub fn without_table() -> Searcher {
        Searcher { tt: None }
    }

    /// Drop all cached entries, e.g. on a new game.
    pub fn clear_table(&mut self) {
        if let Some(tt) = &mut self.tt {
            tt.clear();
        }
    }

    /// Find the best move for the side to move, searching `max_depth` plies.
    ///
    /// Fails with [`SearchError::InvalidDepth`] when `max_depth < 1` and
    /// [`SearchError::NoLegalMoves`] on a terminal position — the caller
    /// is expected to detect game over before asking for a move.
    ///
    /// Deterministic: identical inputs with an identically-seeded table
    /// return the identical move. When several moves tie for best, the
    /// first in move-ordering sequence wins.
    pub fn best_move(&mut self, board: &Board, max_depth: u8) -> Result<SearchResult, SearchError> {
        self.best_move_with_control(board, max_depth, &SearchControl::unbounded())
    }

    /// [`best_move`](Searcher::best_move) with node/time limits. When a
    /// limit fires mid-search the best fully-searched root move so far is
    /// returned.
    pub fn best_move_with_control(
        &mut self,
        board: &Board,
        max_depth: u8,
        control: &SearchControl,
    ) -> Result<SearchResult, SearchError> {
        if max_depth < 1 {
            return Err(SearchError::InvalidDepth { depth: max_depth });
        }
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let tt_move = match &mut self.tt {
            Some(tt) => {
                tt.new_generation();
                tt.probe(board.hash(), 0).and_then(|hit| hit.best_move)
            }
            None => None,
        };

        debug!(depth = max_depth, side = %board.side_to_move(), "search starting");

        let mut ctx = SearchContext {
            nodes: 0,
            tt: self.tt.as_mut(),
            control,
            aborted: false,
        };

        let mut alpha = -INF;
        let mut best: Option<Move> = None;
        let mut picker = MovePicker::new(board, moves, tt_move);

        while let Some(mv) = picker.next_move() {
            // If the budget expires before any move completes, the first
            // ordered move is still a sane answer.
            if best.is_none() {
                best = Some(mv);
            }

            let child = board.apply_move(mv);
            let score = -negamax(&child, max_depth - 1, 1, -INF, -alpha, &mut ctx);
            if ctx.aborted {
                debug!(nodes = ctx.nodes, "search budget expired, keeping best so far");
                break;
            }
            debug!(%mv, score, "root move searched");

            if score > alpha {
                alpha = score;
                best = Some(mv);
            }
        }

        let best_move = best.expect("root has at least one legal move");

        if !ctx.aborted
            && let Some(tt) = ctx.tt.as_deref_mut()
        {
            tt.store(board.hash(), max_depth, alpha, Some(best_move), Bound::Exact, 0);
        }

        let result = SearchResult {
            best_move,
            score: alpha,
            nodes: ctx.nodes,
            depth: max_depth,
        };
        info!(
            best = %result.best_move,
            score = result.score,
            nodes = result.nodes,
            depth = result.depth,
            "search finished"
        );
        Ok(result)
    }
}

impl Default for Searcher {
    fn default() -> Searcher {
        Searcher::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate;
    use crate::search::tt::MATE_BOUND;
    use std::time::Duration;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn depth_1_maximizes_immediate_evaluation() {
        let positions = [
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
            "4k3/8/8/3q1n2/4P3/8/8/4K3 w - - 0 1",
        ];
        for fen in positions {
            let b = board(fen);
            let expected = b
                .legal_moves()
                .into_iter()
                .map(|mv| -evaluate(&b.apply_move(mv)))
                .max()
                .unwrap();
            let result = Searcher::new().best_move(&b, 1).unwrap();
            assert_eq!(result.score, expected, "depth-1 score mismatch for {fen}");
        }
    }

    #[test]
    fn finds_mate_in_one_at_any_depth() {
        // Rh8# is the only mate: back-rank rook against a cornered king.
        let b = board("k7/8/1K6/8/8/8/8/7R w - - 0 1");
        for depth in 1..=4 {
            let result = Searcher::new().best_move(&b, depth).unwrap();
            assert_eq!(result.best_move.to_coordinate(), "h1h8", "at depth {depth}");
            assert_eq!(result.score, negamax::MATE_SCORE - 1);
        }
    }

    #[test]
    fn prefers_the_faster_mate() {
        // With mates available at several depths the ply adjustment must
        // steer the search to the immediate one.
        let b = board("k7/8/1K6/8/8/8/8/7R w - - 0 1");
        let result = Searcher::new().best_move(&b, 5).unwrap();
        assert_eq!(result.best_move.to_coordinate(), "h1h8");
        assert_eq!(result.score, negamax::MATE_SCORE - 1);
    }

    #[test]
    fn finds_scholars_mate() {
        let b = board("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
        let result = Searcher::new().best_move(&b, 2).unwrap();
        assert_eq!(result.best_move.to_coordinate(), "h5f7");
        assert!(result.score > MATE_BOUND);
    }

    #[test]
    fn rejects_invalid_depth() {
        let b = Board::starting_position();
        assert_eq!(
            Searcher::new().best_move(&b, 0),
            Err(SearchError::InvalidDepth { depth: 0 })
        );
    }

    #[test]
    fn rejects_terminal_positions() {
        let mated = board("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1");
        assert_eq!(Searcher::new().best_move(&mated, 3), Err(SearchError::NoLegalMoves));

        let stalemated = board("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
        assert_eq!(Searcher::new().best_move(&stalemated, 3), Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn search_is_deterministic() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let first = Searcher::new().best_move(&b, 3).unwrap();
        let second = Searcher::new().best_move(&b, 3).unwrap();
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
    }

    #[test]
    fn repeat_search_on_warm_table_is_identical() {
        let b = board("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3");
        let mut searcher = Searcher::new();
        let cold = searcher.best_move(&b, 3).unwrap();
        let warm = searcher.best_move(&b, 3).unwrap();
        assert_eq!(cold.best_move, warm.best_move);
        assert_eq!(cold.score, warm.score);
        assert!(warm.nodes < cold.nodes, "warm table should prune the re-search");
    }

    #[test]
    fn disabling_the_table_changes_nothing_but_time() {
        let positions = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in positions {
            let b = board(fen);
            let with = Searcher::new().best_move(&b, 3).unwrap();
            let without = Searcher::without_table().best_move(&b, 3).unwrap();
            assert_eq!(with.best_move, without.best_move, "move diverged for {fen}");
            assert_eq!(with.score, without.score, "score diverged for {fen}");
        }
    }

    #[test]
    fn opening_search_picks_a_developing_move() {
        // Material-only concerns admit many equal moves; the PST terms and
        // deterministic tie-break settle on central development, never a
        // move that sheds material for nothing.
        let result = Searcher::new().best_move(&Board::starting_position(), 2).unwrap();
        let plausible = ["e2e4", "d2d4", "g1f3", "b1c3"];
        assert!(
            plausible.contains(&result.best_move.to_coordinate().as_str()),
            "unexpected opening move {}",
            result.best_move
        );
        assert!(result.score >= 0, "White should not be losing at depth 2");
        assert!(result.score <= 100, "no material can be won at depth 2");
    }

    #[test]
    fn avoids_the_stalemating_line() {
        // a7 would stalemate Black instantly (score 0); keeping the pawn
        // keeps a winning score.
        let b = board("k7/8/PK6/8/8/8/8/8 w - - 0 1");
        let result = Searcher::new().best_move(&b, 3).unwrap();
        assert_ne!(result.best_move.to_coordinate(), "a6a7");
        assert!(result.score > 0);

        // And the stalemate line itself is terminal for the opponent.
        let mv = b.parse_san("a7").unwrap();
        let after = b.apply_move(mv);
        assert!(after.is_stalemate());
        assert_eq!(Searcher::new().best_move(&after, 2), Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn node_budget_still_returns_a_legal_move() {
        let b = Board::starting_position();
        let control = SearchControl::unbounded().node_budget(20);
        let result = Searcher::new()
            .best_move_with_control(&b, 6, &control)
            .unwrap();
        assert!(b.legal_moves().contains(&result.best_move));
    }

    #[test]
    fn deadline_cuts_a_deep_search_short() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let control = SearchControl::unbounded().deadline(Duration::from_millis(1));
        let result = Searcher::new()
            .best_move_with_control(&b, 64, &control)
            .unwrap();
        assert!(b.legal_moves().contains(&result.best_move));
    }

    #[test]
    fn clear_table_resets_the_cache() {
        let b = board("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3");
        let mut searcher = Searcher::new();
        let cold = searcher.best_move(&b, 3).unwrap();
        searcher.clear_table();
        let recold = searcher.best_move(&b, 3).unwrap();
        assert_eq!(cold.best_move, recold.best_move);
        assert_eq!(cold.nodes, recold.nodes, "cleared table should behave like a fresh one");
    }
}
