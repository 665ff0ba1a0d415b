//! Castling rights as a 4-bit field.

use std::fmt;

use crate::color::Color;

/// Castling rights: bit 0 = white king-side, 1 = white queen-side,
/// 2 = black king-side, 3 = black queen-side.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No rights remain.
    pub const NONE: CastleRights = CastleRights(0);
    /// All four rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    pub const WHITE_KING_SIDE: CastleRights = CastleRights(0b0001);
    pub const WHITE_QUEEN_SIDE: CastleRights = CastleRights(0b0010);
    pub const BLACK_KING_SIDE: CastleRights = CastleRights(0b0100);
    pub const BLACK_QUEEN_SIDE: CastleRights = CastleRights(0b1000);

    /// Raw bits (0..16), suitable as a table index.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every right in `other` is present.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// Remove the rights in `other`.
    #[inline]
    pub const fn without(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Add the rights in `other`.
    #[inline]
    pub const fn with(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Both rights belonging to `color`.
    #[inline]
    pub const fn both_for(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights(0b0011),
            Color::Black => CastleRights(0b1100),
        }
    }

    /// King-side right for `color`.
    #[inline]
    pub const fn king_side(color: Color) -> CastleRights {
        match color {
            Color::White => Self::WHITE_KING_SIDE,
            Color::Black => Self::BLACK_KING_SIDE,
        }
    }

    /// Queen-side right for `color`.
    #[inline]
    pub const fn queen_side(color: Color) -> CastleRights {
        match color {
            Color::White => Self::WHITE_QUEEN_SIDE,
            Color::Black => Self::BLACK_QUEEN_SIDE,
        }
    }
}

impl fmt::Display for CastleRights {
    /// FEN castling field ("KQkq", subsets thereof, or "-").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        if self.contains(Self::WHITE_KING_SIDE) {
            write!(f, "K")?;
        }
        if self.contains(Self::WHITE_QUEEN_SIDE) {
            write!(f, "Q")?;
        }
        if self.contains(Self::BLACK_KING_SIDE) {
            write!(f, "k")?;
        }
        if self.contains(Self::BLACK_QUEEN_SIDE) {
            write!(f, "q")?;
        }
        Ok(())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({self})")
    }
}
