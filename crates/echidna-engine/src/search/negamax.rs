//! Negamax alpha-beta search.

use echidna_board::Board;
use echidna_board::Move;

use crate::evaluate;
use crate::search::control::SearchControl;
use crate::search::ordering::MovePicker;
use crate::search::tt::{Bound, TranspositionTable};

/// Unreachable bound for the initial search window.
///
/// Score arithmetic stays well inside `i32`: the largest magnitude ever
/// produced is `MATE_SCORE`, and negation of anything in `[-INF, INF]`
/// cannot overflow.
pub const INF: i32 = 30_000;

/// Base checkmate score; a mate found at ply `p` scores `MATE_SCORE - p`,
/// so faster mates compare strictly better under alpha-beta.
pub const MATE_SCORE: i32 = 29_000;

/// Search state threaded through the recursion.
///
/// Alpha, beta, and depth travel as call parameters, never as shared
/// state; only the node counter, the table, and the abort flag live here.
pub(super) struct SearchContext<'a> {
    /// Total nodes visited.
    pub nodes: u64,
    /// Transposition table, absent when the searcher runs table-less.
    pub tt: Option<&'a mut TranspositionTable>,
    /// Cancellation limits.
    pub control: &'a SearchControl,
    /// Latched once a limit fires; everything above the latch unwinds.
    pub aborted: bool,
}

impl SearchContext<'_> {
    /// Check the budget, latching the abort flag once it fires.
    fn check_abort(&mut self) -> bool {
        if !self.aborted && self.control.should_stop(self.nodes) {
            self.aborted = true;
        }
        self.aborted
    }
}

/// Recursive negamax with alpha-beta pruning.
///
/// Returns the score of `board` from the perspective of its side to move.
/// `ply` is the distance from the root, used for mate-distance scoring.
/// Pruning never changes the returned value relative to a full-width
/// search of the same tree; it only skips proven-irrelevant siblings.
pub(super) fn negamax(
    board: &Board,
    depth: u8,
    ply: i32,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;
    if ctx.check_abort() {
        return 0;
    }

    // Drawn by rule regardless of what moves exist.
    if board.is_draw() {
        return 0;
    }

    // Table probe: a stored result at sufficient depth whose bound is
    // compatible with the current window short-circuits the subtree.
    let mut tt_move = None;
    if let Some(tt) = ctx.tt.as_deref()
        && let Some(hit) = tt.probe(board.hash(), ply)
    {
        tt_move = hit.best_move;
        if hit.depth >= depth {
            let cutoff = match hit.bound {
                Bound::Exact => true,
                Bound::Lower => hit.score >= beta,
                Bound::Upper => hit.score <= alpha,
            };
            if cutoff {
                return hit.score;
            }
        }
    }

    let moves = board.legal_moves();
    if moves.is_empty() {
        // Checkmate against the side to move, or stalemate.
        return if board.in_check() { -(MATE_SCORE - ply) } else { 0 };
    }
    if depth == 0 {
        return evaluate(board);
    }

    let original_alpha = alpha;
    let mut best_score = -INF;
    let mut best_move: Option<Move> = None;
    let mut picker = MovePicker::new(board, moves, tt_move);

    while let Some(mv) = picker.next_move() {
        let child = board.apply_move(mv);
        let score = -negamax(&child, depth - 1, ply + 1, -beta, -alpha, ctx);
        if ctx.aborted {
            // The child unwound early; its score is not trustworthy.
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
            if score > alpha {
                alpha = score;
            }
        }
        if alpha >= beta {
            break;
        }
    }

    let bound = if best_score <= original_alpha {
        Bound::Upper
    } else if best_score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    if let Some(tt) = ctx.tt.as_deref_mut() {
        tt.store(board.hash(), depth, best_score, best_move, bound, ply);
    }

    best_score
}
