//! Legal move generation.
//!
//! Pseudo-legal moves are generated by offset and ray walking over the
//! mailbox, then filtered by applying each move and rejecting those that
//! leave the mover's own king attacked. Castling path and check rules are
//! enforced at generation time.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::PieceKind;
use crate::square::Square;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// All legal moves for the side to move, in a stable generation order
/// (origin squares ascending, piece patterns in a fixed sequence).
pub(crate) fn legal_moves(board: &Board) -> Vec<Move> {
    let us = board.side_to_move();
    let them = us.opponent();
    let mut moves = pseudo_legal_moves(board);

    moves.retain(|&mv| {
        let child = board.apply_move(mv);
        !is_square_attacked(&child, child.king_square(us), them)
    });
    moves
}

/// Whether `sq` is attacked by any piece of color `by`.
pub(crate) fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    // Pawns attack diagonally forward, so look one rank back from `sq`.
    let pawn_rank_delta = -by.pawn_direction();
    for file_delta in [-1, 1] {
        if let Some(from) = sq.offset(file_delta, pawn_rank_delta)
            && board.piece_on(from).is_some_and(|p| p.color == by && p.kind == PieceKind::Pawn)
        {
            return true;
        }
    }

    for (df, dr) in KNIGHT_OFFSETS {
        if let Some(from) = sq.offset(df, dr)
            && board.piece_on(from).is_some_and(|p| p.color == by && p.kind == PieceKind::Knight)
        {
            return true;
        }
    }

    for (df, dr) in KING_OFFSETS {
        if let Some(from) = sq.offset(df, dr)
            && board.piece_on(from).is_some_and(|p| p.color == by && p.kind == PieceKind::King)
        {
            return true;
        }
    }

    attacked_along(board, sq, by, &BISHOP_DIRECTIONS, PieceKind::Bishop)
        || attacked_along(board, sq, by, &ROOK_DIRECTIONS, PieceKind::Rook)
}

/// Walk rays from `sq`; the first piece met attacks if it is `by`'s
/// queen or the given slider kind.
fn attacked_along(
    board: &Board,
    sq: Square,
    by: Color,
    directions: &[(i8, i8)],
    slider: PieceKind,
) -> bool {
    for &(df, dr) in directions {
        let mut current = sq;
        while let Some(next) = current.offset(df, dr) {
            if let Some(piece) = board.piece_on(next) {
                if piece.color == by && (piece.kind == slider || piece.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            current = next;
        }
    }
    false
}

fn pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let us = board.side_to_move();
    let mut moves = Vec::with_capacity(48);

    for (from, piece) in board.pieces() {
        if piece.color != us {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => pawn_moves(board, from, us, &mut moves),
            PieceKind::Knight => offset_moves(board, from, us, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::Bishop => ray_moves(board, from, us, &BISHOP_DIRECTIONS, &mut moves),
            PieceKind::Rook => ray_moves(board, from, us, &ROOK_DIRECTIONS, &mut moves),
            PieceKind::Queen => {
                ray_moves(board, from, us, &BISHOP_DIRECTIONS, &mut moves);
                ray_moves(board, from, us, &ROOK_DIRECTIONS, &mut moves);
            }
            PieceKind::King => offset_moves(board, from, us, &KING_OFFSETS, &mut moves),
        }
    }

    castling_moves(board, us, &mut moves);
    moves
}

fn offset_moves(board: &Board, from: Square, us: Color, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr)
            && board.piece_on(to).is_none_or(|p| p.color != us)
        {
            moves.push(Move::new(from, to));
        }
    }
}

fn ray_moves(board: &Board, from: Square, us: Color, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.piece_on(to) {
                None => moves.push(Move::new(from, to)),
                Some(piece) => {
                    if piece.color != us {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn pawn_moves(board: &Board, from: Square, us: Color, moves: &mut Vec<Move>) {
    let dir = us.pawn_direction();
    let start_rank = match us {
        Color::White => 1,
        Color::Black => 6,
    };
    let promotion_rank = us.opponent().back_rank();

    // Pushes.
    if let Some(to) = from.offset(0, dir)
        && board.piece_on(to).is_none()
    {
        push_pawn_move(from, to, promotion_rank, moves);
        if from.rank() == start_rank
            && let Some(double) = to.offset(0, dir)
            && board.piece_on(double).is_none()
        {
            moves.push(Move::double_push(from, double));
        }
    }

    // Captures, including en passant.
    for file_delta in [-1, 1] {
        let Some(to) = from.offset(file_delta, dir) else {
            continue;
        };
        if board.piece_on(to).is_some_and(|p| p.color != us) {
            push_pawn_move(from, to, promotion_rank, moves);
        } else if board.en_passant() == Some(to) {
            moves.push(Move::en_passant(from, to));
        }
    }
}

fn push_pawn_move(from: Square, to: Square, promotion_rank: u8, moves: &mut Vec<Move>) {
    if to.rank() == promotion_rank {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn castling_moves(board: &Board, us: Color, moves: &mut Vec<Move>) {
    let them = us.opponent();
    let rank = us.back_rank();
    let king_from = Square::new(4, rank);

    if board.piece_on(king_from).is_none_or(|p| p.kind != PieceKind::King || p.color != us) {
        return;
    }
    // The king may not castle out of check.
    if is_square_attacked(board, king_from, them) {
        return;
    }

    // King side: f and g empty, neither attacked, rook on h.
    if board.castling().contains(CastleRights::king_side(us)) {
        let f = Square::new(5, rank);
        let g = Square::new(6, rank);
        let h = Square::new(7, rank);
        if board.piece_on(f).is_none()
            && board.piece_on(g).is_none()
            && board.piece_on(h).is_some_and(|p| p.kind == PieceKind::Rook && p.color == us)
            && !is_square_attacked(board, f, them)
            && !is_square_attacked(board, g, them)
        {
            moves.push(Move::castling(king_from, g));
        }
    }

    // Queen side: b, c, d empty; c and d unattacked (b may be attacked).
    if board.castling().contains(CastleRights::queen_side(us)) {
        let b = Square::new(1, rank);
        let c = Square::new(2, rank);
        let d = Square::new(3, rank);
        let a = Square::new(0, rank);
        if board.piece_on(b).is_none()
            && board.piece_on(c).is_none()
            && board.piece_on(d).is_none()
            && board.piece_on(a).is_some_and(|p| p.kind == PieceKind::Rook && p.color == us)
            && !is_square_attacked(board, c, them)
            && !is_square_attacked(board, d, them)
        {
            moves.push(Move::castling(king_from, c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::MoveKind;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    fn perft(board: &Board, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = board.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .into_iter()
            .map(|mv| perft(&board.apply_move(mv), depth - 1))
            .sum()
    }

    #[test]
    fn perft_starting_position() {
        let board = Board::starting_position();
        assert_eq!(perft(&board, 1), 20);
        assert_eq!(perft(&board, 2), 400);
        assert_eq!(perft(&board, 3), 8_902);
    }

    #[test]
    fn perft_kiwipete() {
        // Standard castling/en-passant/promotion stress position.
        let board =
            board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(perft(&board, 1), 48);
        assert_eq!(perft(&board, 2), 2_039);
    }

    #[test]
    fn perft_pins_and_en_passant() {
        // Discovered-check en passant traps live in this endgame position.
        let board = board("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
        assert_eq!(perft(&board, 1), 14);
        assert_eq!(perft(&board, 2), 191);
        assert_eq!(perft(&board, 3), 2_812);
    }

    #[test]
    fn pinned_piece_cannot_expose_the_king() {
        // Knight on e2 is pinned against the king by the rook on e8.
        let board = board("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let moves = board.legal_moves();
        assert!(moves.iter().all(|m| m.from() != Square::new(4, 1)));
    }

    #[test]
    fn cannot_castle_through_check() {
        // Black rook on f8 covers f1.
        let board = board("5r1k/8/8/8/8/8/8/4K2R w K - 0 1");
        let moves = board.legal_moves();
        assert!(moves.iter().all(|m| m.kind() != MoveKind::Castling));
    }

    #[test]
    fn cannot_castle_out_of_check() {
        let board = board("4r2k/8/8/8/8/8/8/4K2R w K - 0 1");
        let moves = board.legal_moves();
        assert!(moves.iter().all(|m| m.kind() != MoveKind::Castling));
    }

    #[test]
    fn castling_generated_when_path_is_clear() {
        let board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castles: Vec<_> = board
            .legal_moves()
            .into_iter()
            .filter(|m| m.kind() == MoveKind::Castling)
            .map(|m| m.to_coordinate())
            .collect();
        assert!(castles.contains(&"e1g1".to_string()));
        assert!(castles.contains(&"e1c1".to_string()));
    }

    #[test]
    fn evasions_only_while_in_check() {
        // White king on e1 checked by the rook on e8; every legal move must
        // resolve the check.
        let board = board("4r2k/8/8/8/8/8/3P4/4K3 w - - 0 1");
        for mv in board.legal_moves() {
            let child = board.apply_move(mv);
            assert!(!is_square_attacked(
                &child,
                child.king_square(Color::White),
                Color::Black
            ));
        }
    }

    #[test]
    fn promotion_generates_all_four_pieces() {
        let board = board("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let promotions: Vec<_> = board
            .legal_moves()
            .into_iter()
            .filter(|m| m.kind() == MoveKind::Promotion)
            .collect();
        assert_eq!(promotions.len(), 4);
    }
}
