//! Session errors.

/// Errors that can occur while running an interactive session.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An I/O error on the session's input or output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The search failed; only reachable if the session asks for a move
    /// in a position it should have recognized as game over.
    #[error("search error: {source}")]
    Search {
        /// The underlying search error.
        #[from]
        source: echidna_engine::SearchError,
    },
}
