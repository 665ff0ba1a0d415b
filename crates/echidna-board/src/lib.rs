//! Board representation, move generation, and game rules for echidna.

mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod movegen;
mod piece;
mod san;
mod square;
mod zobrist;

pub use board::{Board, PrettyBoard};
pub use castle_rights::CastleRights;
pub use chess_move::{Move, MoveKind};
pub use color::Color;
pub use error::{FenError, SanError};
pub use fen::STARTING_FEN;
pub use piece::{Piece, PieceKind};
pub use square::Square;
