//! FEN parsing and formatting.

use std::str::FromStr;

use tracing::debug;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let squares = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor { found: other.to_string() });
            }
        };

        let castling = parse_castling(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            s => Some(Square::from_algebraic(s).ok_or_else(|| FenError::InvalidEnPassant {
                found: s.to_string(),
            })?),
        };

        let halfmove_clock = fields[4].parse().map_err(|_| FenError::InvalidCounter {
            field: "halfmove clock",
            found: fields[4].to_string(),
        })?;
        let fullmove_number = fields[5].parse().map_err(|_| FenError::InvalidCounter {
            field: "fullmove number",
            found: fields[5].to_string(),
        })?;

        let mut board = Board {
            squares,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            hash: 0,
        };
        validate_kings(&board)?;
        board.hash = board.compute_hash();
        debug!(side = %board.side_to_move(), fullmove = board.fullmove_number(), "parsed FEN");
        Ok(board)
    }
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut squares = [None; 64];
    for (i, rank_str) in ranks.iter().enumerate() {
        // FEN lists rank 8 first.
        let rank = 7 - i as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                let skip = skip as u8;
                if file + skip > 8 {
                    return Err(FenError::BadRankLength { rank: i, length: (file + skip) as usize });
                }
                file += skip;
            } else {
                let piece =
                    Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                if file >= 8 {
                    return Err(FenError::BadRankLength { rank: i, length: file as usize + 1 });
                }
                squares[Square::new(file, rank).index()] = Some(piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::BadRankLength { rank: i, length: file as usize });
        }
    }
    Ok(squares)
}

fn parse_castling(field: &str) -> Result<CastleRights, FenError> {
    if field == "-" {
        return Ok(CastleRights::NONE);
    }
    let mut rights = CastleRights::NONE;
    for c in field.chars() {
        rights = match c {
            'K' => rights.with(CastleRights::WHITE_KING_SIDE),
            'Q' => rights.with(CastleRights::WHITE_QUEEN_SIDE),
            'k' => rights.with(CastleRights::BLACK_KING_SIDE),
            'q' => rights.with(CastleRights::BLACK_QUEEN_SIDE),
            _ => return Err(FenError::InvalidCastlingChar { character: c }),
        };
    }
    Ok(rights)
}

fn validate_kings(board: &Board) -> Result<(), FenError> {
    for color in Color::ALL {
        let count = board
            .pieces()
            .filter(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .count();
        if count != 1 {
            let color = match color {
                Color::White => "white",
                Color::Black => "black",
            };
            return Err(FenError::InvalidKingCount { color, count });
        }
    }
    Ok(())
}

impl Board {
    /// Render this position as a FEN string.
    pub fn fen(&self) -> String {
        let mut out = String::with_capacity(64);

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_on(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from_digit(empty, 10).unwrap_or('0'));
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from_digit(empty, 10).unwrap_or('0'));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        let side = match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = match self.en_passant() {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{out} {side} {} {en_passant} {} {}",
            self.castling(),
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_fen_roundtrip() {
        let board: Board = STARTING_FEN.parse().unwrap();
        assert_eq!(board.fen(), STARTING_FEN);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.castling(), CastleRights::ALL);
    }

    #[test]
    fn mid_game_roundtrip() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board: Board = fen.parse().unwrap();
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn en_passant_field_roundtrip() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board: Board = fen.parse().unwrap();
        assert_eq!(board.en_passant(), Square::from_algebraic("e3"));
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = "8/8/8/8/8/8/8/8 w -".parse::<Board>().unwrap_err();
        assert_eq!(err, FenError::WrongFieldCount { found: 3 });
    }

    #[test]
    fn rejects_bad_rank_length() {
        let err = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse::<Board>()
            .unwrap_err();
        assert!(matches!(err, FenError::BadRankLength { .. }));
    }

    #[test]
    fn rejects_digit_runs_past_the_rank_edge() {
        // Digit skips must be bounds-checked as they accumulate, not after.
        let err = "9/8/8/8/8/8/8/4K2k w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(err, FenError::BadRankLength { rank: 0, length: 9 });

        let long_rank = "9".repeat(29);
        let err = format!("{long_rank}/8/8/8/8/8/8/4K2k w - - 0 1")
            .parse::<Board>()
            .unwrap_err();
        assert!(matches!(err, FenError::BadRankLength { rank: 0, .. }));

        let err = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR5 w KQkq - 0 1"
            .parse::<Board>()
            .unwrap_err();
        assert!(matches!(err, FenError::BadRankLength { rank: 7, .. }));
    }

    #[test]
    fn rejects_invalid_piece_char() {
        let err = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"
            .parse::<Board>()
            .unwrap_err();
        assert_eq!(err, FenError::InvalidPieceChar { character: 'X' });
    }

    #[test]
    fn rejects_missing_king() {
        let err = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Board>().unwrap_err();
        assert_eq!(err, FenError::InvalidKingCount { color: "black", count: 0 });
    }

    #[test]
    fn rejects_bad_color_and_castling() {
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1".parse::<Board>(),
            Err(FenError::InvalidColor { .. })
        ));
        assert!(matches!(
            "4k3/8/8/8/8/8/8/4K3 w X - 0 1".parse::<Board>(),
            Err(FenError::InvalidCastlingChar { character: 'X' })
        ));
    }
}
