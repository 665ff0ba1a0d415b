//! Move representation.

use std::fmt;

use crate::piece::PieceKind;
use crate::square::Square;

/// The category of a move, for the special cases `apply_move` must handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Quiet move or ordinary capture.
    Normal,
    /// Pawn advancing two squares from its start rank.
    DoublePawnPush,
    /// En passant capture; the captured pawn is not on the destination.
    EnPassant,
    /// Castling, encoded by the king's two-square hop.
    Castling,
    /// Pawn promotion, possibly capturing.
    Promotion,
}

/// A candidate transition between two positions. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Quiet move or ordinary capture.
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to, kind: MoveKind::Normal, promotion: None }
    }

    /// Double pawn push.
    pub const fn double_push(from: Square, to: Square) -> Move {
        Move { from, to, kind: MoveKind::DoublePawnPush, promotion: None }
    }

    /// En passant capture.
    pub const fn en_passant(from: Square, to: Square) -> Move {
        Move { from, to, kind: MoveKind::EnPassant, promotion: None }
    }

    /// Castling move, given the king's origin and destination.
    pub const fn castling(from: Square, to: Square) -> Move {
        Move { from, to, kind: MoveKind::Castling, promotion: None }
    }

    /// Promotion to `kind`, possibly capturing on `to`.
    pub const fn promotion(from: Square, to: Square, kind: PieceKind) -> Move {
        Move { from, to, kind: MoveKind::Promotion, promotion: Some(kind) }
    }

    /// Origin square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Move category.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Promotion piece, set only for [`MoveKind::Promotion`].
    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        self.promotion
    }

    /// Format in coordinate notation ("e2e4", "e7e8q").
    pub fn to_coordinate(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.fen_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
