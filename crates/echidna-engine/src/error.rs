//! Search error taxonomy.

/// Contract violations surfaced by [`Searcher::best_move`](crate::Searcher::best_move).
///
/// Both variants are caller errors, not search failures: cache misses and
/// hash collisions are handled internally and never surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The position has no legal moves — the caller should have detected
    /// checkmate or stalemate before asking for a move.
    #[error("no legal moves: the position is already terminal")]
    NoLegalMoves,

    /// A non-positive maximum depth was requested.
    #[error("invalid search depth {depth}: must be at least 1")]
    InvalidDepth { depth: u8 },
}

#[cfg(test)]
mod tests {
    use super::SearchError;

    #[test]
    fn display_messages() {
        assert_eq!(
            SearchError::NoLegalMoves.to_string(),
            "no legal moves: the position is already terminal"
        );
        assert_eq!(
            SearchError::InvalidDepth { depth: 0 }.to_string(),
            "invalid search depth 0: must be at least 1"
        );
    }
}
