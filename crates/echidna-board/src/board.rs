//! The mailbox board: piece placement, game state, and move application.

use std::fmt;

use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::movegen;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;
use crate::zobrist;

/// A chess position: an 8x8 mailbox plus side to move, castling rights,
/// en passant target, and move clocks.
///
/// Boards are immutable from the caller's point of view: [`Board::apply_move`]
/// returns a fresh board and never touches the parent, so sibling branches
/// of a search can never observe each other's mutations.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastleRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) hash: u64,
}

impl Board {
    /// The standard starting position.
    pub fn starting_position() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut squares = [None; 64];
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            squares[Square::new(file, 0).index()] = Some(Piece::new(Color::White, kind));
            squares[Square::new(file, 1).index()] = Some(Piece::new(Color::White, PieceKind::Pawn));
            squares[Square::new(file, 6).index()] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            squares[Square::new(file, 7).index()] = Some(Piece::new(Color::Black, kind));
        }

        let mut board = Board {
            squares,
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        };
        board.hash = board.compute_hash();
        board
    }

    /// The piece on a square, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Current castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// En passant target square, if the last move was a double pawn push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Halfmove clock for the fifty-move rule.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Fullmove number, starting at 1 and incremented after Black moves.
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Zobrist hash of this position. Stable identity key: equal positions
    /// (including castling and en passant state) hash equal.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Iterate over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.squares[sq.index()].map(|p| (sq, p)))
    }

    /// The square of `color`'s king.
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
            .expect("every validated board has one king per side")
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        movegen::is_square_attacked(
            self,
            self.king_square(self.side_to_move),
            self.side_to_move.opponent(),
        )
    }

    /// Whether the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    /// Whether the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }

    /// Whether the position is drawn by rule regardless of legal moves:
    /// fifty-move rule or insufficient mating material.
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= 100 || self.insufficient_material()
    }

    /// King vs king, optionally with a single minor piece on either side.
    fn insufficient_material(&self) -> bool {
        let mut minors = 0;
        for (_, piece) in self.pieces() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Bishop | PieceKind::Knight => minors += 1,
                _ => return false,
            }
        }
        minors <= 1
    }

    /// Apply a move, returning the resulting position. The receiver is
    /// unchanged.
    ///
    /// `mv` must come from [`Board::legal_moves`] on this board; applying
    /// an arbitrary move is undefined in the same way it is for any rules
    /// library fed an illegal move.
    pub fn apply_move(&self, mv: Move) -> Board {
        let us = self.side_to_move;
        let piece = self.squares[mv.from().index()].expect("legal move origin is occupied");

        let mut board = self.clone();
        board.en_passant = None;

        let mut is_capture = self.squares[mv.to().index()].is_some();

        match mv.kind() {
            MoveKind::Normal | MoveKind::Promotion => {}
            MoveKind::DoublePawnPush => {
                let target = mv
                    .from()
                    .offset(0, us.pawn_direction())
                    .expect("double push passes over the board");
                board.en_passant = Some(target);
            }
            MoveKind::EnPassant => {
                let victim = Square::new(mv.to().file(), mv.from().rank());
                board.squares[victim.index()] = None;
                is_capture = true;
            }
            MoveKind::Castling => {
                let (rook_from, rook_to) = rook_castling_squares(mv.to());
                let rook = board.squares[rook_from.index()].take();
                board.squares[rook_to.index()] = rook;
            }
        }

        board.squares[mv.from().index()] = None;
        board.squares[mv.to().index()] = Some(match mv.promotion_kind() {
            Some(kind) => Piece::new(us, kind),
            None => piece,
        });

        // Castling rights lapse when the king or a rook leaves its home
        // square, or when a rook is captured on one.
        board.castling = board
            .castling
            .without(rights_lost_on(mv.from()))
            .without(rights_lost_on(mv.to()));

        board.halfmove_clock = if piece.kind == PieceKind::Pawn || is_capture {
            0
        } else {
            self.halfmove_clock + 1
        };
        if us == Color::Black {
            board.fullmove_number += 1;
        }
        board.side_to_move = us.opponent();
        board.hash = board.compute_hash();
        board
    }

    /// Recompute the Zobrist hash from scratch.
    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for (sq, piece) in self.pieces() {
            hash ^= zobrist::piece_square(piece, sq);
        }
        if self.side_to_move == Color::Black {
            hash ^= zobrist::side_to_move();
        }
        hash ^= zobrist::castling(self.castling);
        if let Some(ep) = self.en_passant {
            hash ^= zobrist::en_passant_file(ep.file());
        }
        hash
    }

    /// A displayable board, oriented with `perspective`'s pieces at the bottom.
    pub fn pretty(&self, perspective: Color) -> PrettyBoard<'_> {
        PrettyBoard {
            board: self,
            perspective,
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self.fen())
    }
}

/// Rook relocation for a castling move, keyed by the king's destination.
fn rook_castling_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        Square::G1 => (Square::H1, Square::F1),
        Square::C1 => (Square::A1, Square::D1),
        Square::G8 => (Square::H8, Square::F8),
        Square::C8 => (Square::A8, Square::D8),
        _ => unreachable!("castling king destination is g1/c1/g8/c8"),
    }
}

/// Castling rights that disappear when a piece moves from, or is captured
/// on, the given square.
fn rights_lost_on(sq: Square) -> CastleRights {
    match sq {
        Square::E1 => CastleRights::both_for(Color::White),
        Square::E8 => CastleRights::both_for(Color::Black),
        Square::H1 => CastleRights::WHITE_KING_SIDE,
        Square::A1 => CastleRights::WHITE_QUEEN_SIDE,
        Square::H8 => CastleRights::BLACK_KING_SIDE,
        Square::A8 => CastleRights::BLACK_QUEEN_SIDE,
        _ => CastleRights::NONE,
    }
}

/// Text rendering of a board, one rank per line, from a chosen perspective.
pub struct PrettyBoard<'a> {
    board: &'a Board,
    perspective: Color,
}

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: Vec<u8> = match self.perspective {
            Color::White => (0..8).rev().collect(),
            Color::Black => (0..8).collect(),
        };
        let files: Vec<u8> = match self.perspective {
            Color::White => (0..8).collect(),
            Color::Black => (0..8).rev().collect(),
        };

        for &rank in &ranks {
            write!(f, "{} ", rank + 1)?;
            for &file in &files {
                match self.board.piece_on(Square::new(file, rank)) {
                    Some(piece) => write!(f, " {}", piece.fen_char())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for &file in &files {
            write!(f, " {}", (b'a' + file) as char)?;
        }
        writeln!(f)
    }
}
