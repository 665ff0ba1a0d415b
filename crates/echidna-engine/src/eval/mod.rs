//! Static evaluation.
//!
//! Material plus piece-square tables, in centipawns. [`evaluate`] returns
//! the score from the perspective of the side to move, which is the sign
//! convention negamax expects.

pub mod material;
pub mod pst;

use echidna_board::{Board, Color};

/// Statically evaluate a position from the side to move's perspective.
///
/// Pure and deterministic: no move generation, no caching, no side
/// effects. Evaluating the same placement from either side's perspective
/// yields equal-and-opposite values by construction, since both terms are
/// computed White-relative and negated for Black.
pub fn evaluate(board: &Board) -> i32 {
    let white_relative = material::material(board) + pst::placement(board);
    match board.side_to_move() {
        Color::White => white_relative,
        Color::Black => -white_relative,
    }
}
