//! Move ordering: table move first, captures by MVV-LVA, promotions,
//! then quiet moves in generation order.
//!
//! Ordering is a pruning heuristic only — it never changes the value of
//! the search — but together with the first-best tie-break it decides
//! which of several equal-scoring moves is returned, so it must be
//! deterministic.

use echidna_board::{Board, Move, MoveKind, PieceKind};

use crate::eval::material::piece_value;

/// Score bands: the table move outranks everything, captures outrank
/// promotions, promotions outrank quiets.
const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_BASE: i32 = 10_000;
const PROMOTION_BASE: i32 = 1_000;

/// Score a move for ordering.
///
/// Captures score `CAPTURE_BASE + 8 * victim - attacker` (most valuable
/// victim first, least valuable aggressor among equal victims). A
/// capturing promotion scores as a capture plus the promotion bonus.
fn score_move(board: &Board, mv: Move) -> i32 {
    let victim = match mv.kind() {
        MoveKind::EnPassant => Some(PieceKind::Pawn),
        _ => board.piece_on(mv.to()).map(|p| p.kind),
    };

    let mut score = 0;
    if let Some(victim) = victim {
        let attacker = board
            .piece_on(mv.from())
            .map(|p| piece_value(p.kind))
            .unwrap_or_default();
        score += CAPTURE_BASE + 8 * piece_value(victim) - attacker;
    }
    if let Some(kind) = mv.promotion_kind() {
        score += PROMOTION_BASE + piece_value(kind);
    }
    score
}

/// Incremental move picker.
///
/// Yields moves in descending score order via selection sort. The sort is
/// first-max, so equal-scored moves come out in their original generation
/// order — the stability the reproducible tie-break relies on.
pub struct MovePicker {
    moves: Vec<Move>,
    scores: Vec<i32>,
    cursor: usize,
}

impl MovePicker {
    /// Build a picker over `moves`. If `tt_move` matches a move in the
    /// list it is yielded first regardless of its heuristic score.
    pub fn new(board: &Board, moves: Vec<Move>, tt_move: Option<Move>) -> MovePicker {
        let scores = moves
            .iter()
            .map(|&mv| {
                if Some(mv) == tt_move {
                    TT_MOVE_SCORE
                } else {
                    score_move(board, mv)
                }
            })
            .collect();
        MovePicker { moves, scores, cursor: 0 }
    }

    /// Yield the next highest-scored move.
    pub fn next_move(&mut self) -> Option<Move> {
        if self.cursor >= self.moves.len() {
            return None;
        }

        let mut best = self.cursor;
        for i in (self.cursor + 1)..self.moves.len() {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        self.moves.swap(self.cursor, best);
        self.scores.swap(self.cursor, best);

        let mv = self.moves[self.cursor];
        self.cursor += 1;
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echidna_board::Board;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    fn drain(mut picker: MovePicker) -> Vec<Move> {
        let mut out = Vec::new();
        while let Some(mv) = picker.next_move() {
            out.push(mv);
        }
        out
    }

    #[test]
    fn yields_every_legal_move_exactly_once() {
        let b = Board::starting_position();
        let moves = b.legal_moves();
        let count = moves.len();
        let picked = drain(MovePicker::new(&b, moves, None));
        assert_eq!(picked.len(), count);
    }

    #[test]
    fn captures_come_before_quiet_moves() {
        // White queen on d4 can capture the e5 pawn.
        let b = board("4k3/8/8/4p3/3Q4/8/8/4K3 w - - 0 1");
        let picked = drain(MovePicker::new(&b, b.legal_moves(), None));
        let first = picked[0];
        assert!(b.piece_on(first.to()).is_some(), "first move should be a capture");
    }

    #[test]
    fn most_valuable_victim_first() {
        // Pawn on e4 can take the d5 queen or the f5 knight.
        let b = board("4k3/8/8/3q1n2/4P3/8/8/4K3 w - - 0 1");
        let picked = drain(MovePicker::new(&b, b.legal_moves(), None));
        assert_eq!(picked[0].to_coordinate(), "e4d5", "queen capture should lead");
        assert_eq!(picked[1].to_coordinate(), "e4f5");
    }

    #[test]
    fn lighter_attacker_preferred_for_equal_victims() {
        // Pawn and queen both attack the black rook on d5.
        let b = board("4k3/8/8/3r4/4P3/8/3Q4/4K3 w - - 0 1");
        let picked = drain(MovePicker::new(&b, b.legal_moves(), None));
        assert_eq!(picked[0].to_coordinate(), "e4d5", "pawn should capture first");
        assert_eq!(picked[1].to_coordinate(), "d2d5");
    }

    #[test]
    fn promotions_rank_between_captures_and_quiets() {
        // Pawn on e7 can promote; rook on a1 can capture the a7 pawn.
        let b = board("7k/p3P3/8/8/8/8/8/R3K3 w - - 0 1");
        let picked = drain(MovePicker::new(&b, b.legal_moves(), None));
        assert_eq!(picked[0].to_coordinate(), "a1a7", "capture leads");
        assert_eq!(picked[1].to_coordinate(), "e7e8q", "queen promotion next");
    }

    #[test]
    fn tt_move_always_leads() {
        let b = Board::starting_position();
        let moves = b.legal_moves();
        let hint = moves
            .iter()
            .copied()
            .find(|m| m.to_coordinate() == "h2h3")
            .unwrap();
        let picked = drain(MovePicker::new(&b, moves, Some(hint)));
        assert_eq!(picked[0], hint);
    }

    #[test]
    fn quiet_moves_keep_generation_order() {
        let b = Board::starting_position();
        let moves = b.legal_moves();
        let picked = drain(MovePicker::new(&b, moves.clone(), None));
        // No captures or promotions in the starting position: ordering must
        // be the identity.
        assert_eq!(picked, moves);
    }
}
