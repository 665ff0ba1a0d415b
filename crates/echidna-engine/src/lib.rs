//! Search and evaluation for echidna.

pub mod error;
pub mod eval;
pub mod search;

pub use error::SearchError;
pub use eval::evaluate;
pub use search::control::SearchControl;
pub use search::negamax::MATE_SCORE;
pub use search::tt::{MATE_BOUND, TranspositionTable};
pub use search::{SearchResult, Searcher};
