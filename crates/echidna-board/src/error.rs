//! Error types for FEN and SAN parsing.

/// Errors from parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The string does not have exactly 6 space-separated fields.
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },

    /// The piece placement does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },

    /// A rank describes more or fewer than 8 squares.
    #[error("rank {rank} describes {length} squares, expected 8")]
    BadRankLength { rank: usize, length: usize },

    /// An unrecognized character in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },

    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor { found: String },

    /// An unrecognized character in the castling field.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },

    /// The en passant field is not "-" or a valid square.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },

    /// The halfmove clock or fullmove number is not a valid number.
    #[error("invalid {field}: \"{found}\"")]
    InvalidCounter { field: &'static str, found: String },

    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount { color: &'static str, count: usize },
}

/// Errors from resolving a SAN move string against a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanError {
    /// The string is not syntactically SAN.
    #[error("unparseable SAN move: \"{input}\"")]
    Unparseable { input: String },

    /// No legal move in the position matches the string.
    #[error("no legal move matches \"{input}\"")]
    NoMatch { input: String },

    /// More than one legal move matches (missing disambiguation).
    #[error("ambiguous SAN move \"{input}\": {candidates} legal moves match")]
    Ambiguous { input: String, candidates: usize },
}
