//! Standard algebraic notation, resolved against the legal move list.
//!
//! Parsing never derives legality itself: a SAN string is matched against
//! [`Board::legal_moves`], so only legal moves can ever be produced.

use crate::board::Board;
use crate::chess_move::{Move, MoveKind};
use crate::error::SanError;
use crate::piece::PieceKind;
use crate::square::Square;

impl Board {
    /// Resolve a SAN string ("e4", "Nf3", "exd5", "O-O", "e8=Q") to the
    /// matching legal move.
    pub fn parse_san(&self, input: &str) -> Result<Move, SanError> {
        let stripped = input.trim().trim_end_matches(['+', '#', '!', '?']);
        if stripped.is_empty() {
            return Err(SanError::Unparseable { input: input.to_string() });
        }

        let legal = self.legal_moves();

        // Castling first; both letter-O and zero spellings are accepted.
        match stripped {
            "O-O" | "0-0" => {
                return legal
                    .into_iter()
                    .find(|m| m.kind() == MoveKind::Castling && m.to().file() == 6)
                    .ok_or_else(|| SanError::NoMatch { input: input.to_string() });
            }
            "O-O-O" | "0-0-0" => {
                return legal
                    .into_iter()
                    .find(|m| m.kind() == MoveKind::Castling && m.to().file() == 2)
                    .ok_or_else(|| SanError::NoMatch { input: input.to_string() });
            }
            _ => {}
        }

        let pattern = SanPattern::parse(stripped)
            .ok_or_else(|| SanError::Unparseable { input: input.to_string() })?;

        let matches: Vec<Move> = legal
            .into_iter()
            .filter(|&mv| pattern.matches(self, mv))
            .collect();

        match matches.len() {
            0 => Err(SanError::NoMatch { input: input.to_string() }),
            1 => Ok(matches[0]),
            n => Err(SanError::Ambiguous { input: input.to_string(), candidates: n }),
        }
    }

    /// Render a legal move in SAN, with disambiguation and check/mate
    /// suffixes.
    pub fn san(&self, mv: Move) -> String {
        let mut out = String::new();

        if mv.kind() == MoveKind::Castling {
            out.push_str(if mv.to().file() == 6 { "O-O" } else { "O-O-O" });
            out.push_str(self.check_suffix(mv));
            return out;
        }

        let piece = match self.piece_on(mv.from()) {
            Some(p) => p,
            None => return mv.to_coordinate(),
        };
        let is_capture = self.piece_on(mv.to()).is_some() || mv.kind() == MoveKind::EnPassant;

        match piece.kind.san_letter() {
            None => {
                // Pawn: origin file only on captures.
                if is_capture {
                    out.push((b'a' + mv.from().file()) as char);
                }
            }
            Some(letter) => {
                out.push(letter);
                out.push_str(&self.disambiguation(mv, piece.kind));
            }
        }

        if is_capture {
            out.push('x');
        }
        out.push_str(&mv.to().to_string());

        if let Some(kind) = mv.promotion_kind() {
            out.push('=');
            if let Some(letter) = kind.san_letter() {
                out.push(letter);
            }
        }

        out.push_str(self.check_suffix(mv));
        out
    }

    /// Minimal origin disambiguation among legal moves of the same kind to
    /// the same destination: file if unique, else rank, else both.
    fn disambiguation(&self, mv: Move, kind: PieceKind) -> String {
        let rivals: Vec<Square> = self
            .legal_moves()
            .into_iter()
            .filter(|m| {
                m.to() == mv.to()
                    && m.from() != mv.from()
                    && self.piece_on(m.from()).is_some_and(|p| p.kind == kind)
            })
            .map(|m| m.from())
            .collect();

        if rivals.is_empty() {
            return String::new();
        }
        let file_char = (b'a' + mv.from().file()) as char;
        let rank_char = (b'1' + mv.from().rank()) as char;
        if rivals.iter().all(|sq| sq.file() != mv.from().file()) {
            file_char.to_string()
        } else if rivals.iter().all(|sq| sq.rank() != mv.from().rank()) {
            rank_char.to_string()
        } else {
            format!("{file_char}{rank_char}")
        }
    }

    fn check_suffix(&self, mv: Move) -> &'static str {
        let child = self.apply_move(mv);
        if child.is_checkmate() {
            "#"
        } else if child.in_check() {
            "+"
        } else {
            ""
        }
    }
}

/// The parsed shape of a non-castling SAN string.
struct SanPattern {
    kind: PieceKind,
    dest: Square,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    promotion: Option<PieceKind>,
    is_capture: bool,
}

impl SanPattern {
    fn parse(s: &str) -> Option<SanPattern> {
        let mut chars: Vec<char> = s.chars().collect();

        // Piece letter, if present; otherwise a pawn move.
        let kind = match chars.first() {
            Some(&c) if "NBRQK".contains(c) => {
                chars.remove(0);
                PieceKind::from_fen_char(c)?
            }
            _ => PieceKind::Pawn,
        };

        // Trailing promotion ("=Q" or bare "Q"), pawns only.
        let mut promotion = None;
        if kind == PieceKind::Pawn
            && let Some(&last) = chars.last()
            && "NBRQ".contains(last)
        {
            promotion = Some(PieceKind::from_fen_char(last)?);
            chars.pop();
            if chars.last() == Some(&'=') {
                chars.pop();
            }
        }

        // Destination is the final file-rank pair.
        if chars.len() < 2 {
            return None;
        }
        let rank_char = chars.pop()?;
        let file_char = chars.pop()?;
        let dest = Square::from_algebraic(&format!("{file_char}{rank_char}"))?;

        // Whatever precedes the destination is capture marker plus origin
        // disambiguation.
        let mut from_file = None;
        let mut from_rank = None;
        let mut is_capture = false;
        for c in chars {
            match c {
                'x' => is_capture = true,
                'a'..='h' => from_file = Some(c as u8 - b'a'),
                '1'..='8' => from_rank = Some(c as u8 - b'1'),
                _ => return None,
            }
        }

        Some(SanPattern { kind, dest, from_file, from_rank, promotion, is_capture })
    }

    fn matches(&self, board: &Board, mv: Move) -> bool {
        if mv.kind() == MoveKind::Castling {
            return false;
        }
        let Some(piece) = board.piece_on(mv.from()) else {
            return false;
        };
        if piece.kind != self.kind || mv.to() != self.dest {
            return false;
        }
        if mv.promotion_kind() != self.promotion {
            return false;
        }
        if let Some(file) = self.from_file
            && mv.from().file() != file
        {
            return false;
        }
        if let Some(rank) = self.from_rank
            && mv.from().rank() != rank
        {
            return false;
        }
        if self.is_capture {
            let captures =
                board.piece_on(mv.to()).is_some() || mv.kind() == MoveKind::EnPassant;
            if !captures {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SanError;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn parses_pawn_and_knight_moves() {
        let start = Board::starting_position();
        assert_eq!(start.parse_san("e4").unwrap().to_coordinate(), "e2e4");
        assert_eq!(start.parse_san("Nf3").unwrap().to_coordinate(), "g1f3");
    }

    #[test]
    fn parses_captures_and_en_passant() {
        let b = board("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        assert_eq!(b.parse_san("exd5").unwrap().to_coordinate(), "e4d5");

        let ep = board("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
        let mv = ep.parse_san("exd6").unwrap();
        assert_eq!(mv.kind(), MoveKind::EnPassant);
    }

    #[test]
    fn parses_castling_both_spellings() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(b.parse_san("O-O").unwrap().to_coordinate(), "e1g1");
        assert_eq!(b.parse_san("0-0-0").unwrap().to_coordinate(), "e1c1");
    }

    #[test]
    fn parses_promotion_with_and_without_equals() {
        let b = board("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(b.parse_san("e8=Q").unwrap().to_coordinate(), "e7e8q");
        assert_eq!(b.parse_san("e8N").unwrap().to_coordinate(), "e7e8n");
    }

    #[test]
    fn requires_disambiguation_when_ambiguous() {
        // Two knights can reach d2.
        let b = board("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1");
        assert!(matches!(b.parse_san("Nd2"), Err(SanError::Ambiguous { .. })));
        assert_eq!(b.parse_san("Nbd2").unwrap().to_coordinate(), "b1d2");
        assert_eq!(b.parse_san("Nfd2").unwrap().to_coordinate(), "f3d2");
    }

    #[test]
    fn rejects_illegal_and_garbage_input() {
        let start = Board::starting_position();
        assert!(matches!(start.parse_san("Qd5"), Err(SanError::NoMatch { .. })));
        assert!(matches!(start.parse_san("??"), Err(SanError::Unparseable { .. })));
    }

    #[test]
    fn formats_simple_moves() {
        let start = Board::starting_position();
        let e4 = start.parse_san("e4").unwrap();
        assert_eq!(start.san(e4), "e4");
        let nf3 = start.parse_san("Nf3").unwrap();
        assert_eq!(start.san(nf3), "Nf3");
    }

    #[test]
    fn formats_capture_castle_and_promotion() {
        let b = board("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        let capture = b.parse_san("exd5").unwrap();
        assert_eq!(b.san(capture), "exd5");

        let castle_board = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castle = castle_board.parse_san("O-O").unwrap();
        assert_eq!(castle_board.san(castle), "O-O");

        let promo_board = board("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let promo = promo_board.parse_san("e8=Q").unwrap();
        assert_eq!(promo_board.san(promo), "e8=Q+");
    }

    #[test]
    fn formats_disambiguation() {
        let b = board("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1");
        let mv = b.parse_san("Nbd2").unwrap();
        assert_eq!(b.san(mv), "Nbd2");
    }

    #[test]
    fn formats_mate_suffix() {
        let b = board("k7/8/1K6/8/8/8/8/7R w - - 0 1");
        let mv = b.parse_san("Rh8").unwrap();
        assert_eq!(b.san(mv), "Rh8#");
    }

    #[test]
    fn san_roundtrip_over_legal_moves() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        for mv in b.legal_moves() {
            let san = b.san(mv);
            assert_eq!(b.parse_san(&san).unwrap(), mv, "roundtrip failed for {san}");
        }
    }
}
