//! Material balance.

use echidna_board::{Board, Color, PieceKind};

/// Piece values in centipawns, indexed by [`PieceKind::index()`].
///
/// Kings carry no material value; their worth is expressed through the
/// mate scores in the search.
pub const PIECE_VALUE: [i32; PieceKind::COUNT] = [100, 320, 330, 500, 900, 0];

/// The material value of a single piece kind.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUE[kind.index()]
}

/// Weighted material count from White's perspective: positive when White
/// is ahead.
pub fn material(board: &Board) -> i32 {
    let mut score = 0;
    for (_, piece) in board.pieces() {
        let value = piece_value(piece.kind);
        match piece.color {
            Color::White => score += value,
            Color::Black => score -= value,
        }
    }
    score
}
