//! Short algebraic notation.
//!
//! Parsing is lenient about the decorations players type: check and mate
//! marks, an "e.p." suffix on en passant captures, "0-0" for "O-O", and
//! promotions with or without the "=" sign.
//!
//! # Examples
//! ```
//! use mailbox_chess::board::Position;
//!
//! let position = Position::new();
//! let mv = position.parse_san("Nf3").unwrap();
//! assert_eq!(position.move_to_san(mv), "Nf3");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::SanError;
use super::{file_to_index, rank_to_index, Move, Piece, Position, Square};

static SAN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([NBRQK])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=?([NBRQnbrq]))?$")
        .expect("SAN pattern compiles")
});

const KINGSIDE: [&str; 2] = ["O-O", "0-0"];
const QUEENSIDE: [&str; 2] = ["O-O-O", "0-0-0"];

/// Parsed pieces of a non-castling move.
struct SanParts {
    piece: Piece,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
    promotion: Option<Piece>,
}

impl Position {
    /// Format a legal move in short algebraic notation ("e4", "Nbd7", "exd6", "O-O", "e8=Q#").
    #[must_use]
    pub fn move_to_san(&self, mv: Move) -> String {
        let mut san = if mv.is_castle_kingside() {
            KINGSIDE[0].to_string()
        } else if mv.is_castle_queenside() {
            QUEENSIDE[0].to_string()
        } else {
            self.piece_move_to_san(mv)
        };

        let next = self.apply_move(mv);
        if next.is_checkmate() {
            san.push('#');
        } else if next.is_in_check(next.side_to_move()) {
            san.push('+');
        }
        san
    }

    fn piece_move_to_san(&self, mv: Move) -> String {
        let piece = self.piece_on(mv.from()).unwrap_or(Piece::Pawn);
        let from = mv.from().to_string();
        let mut san = String::new();

        if piece == Piece::Pawn {
            if mv.is_capture() {
                san.push_str(&from[..1]);
            }
        } else {
            san.push(piece.to_char().to_ascii_uppercase());
            let rivals: Vec<Square> = self
                .legal_moves()
                .iter()
                .filter(|m| m.to() == mv.to() && m.from() != mv.from())
                .filter(|m| self.piece_on(m.from()) == Some(piece))
                .map(|m| m.from())
                .collect();
            if !rivals.is_empty() {
                let file_shared = rivals.iter().any(|sq| sq.file() == mv.from().file());
                let rank_shared = rivals.iter().any(|sq| sq.rank() == mv.from().rank());
                match (file_shared, rank_shared) {
                    (false, _) => san.push_str(&from[..1]),
                    (true, false) => san.push_str(&from[1..]),
                    (true, true) => san.push_str(&from),
                }
            }
        }

        if mv.is_capture() {
            san.push('x');
        }
        san.push_str(&mv.to().to_string());
        if let Some(promo) = mv.promotion() {
            san.push('=');
            san.push(promo.to_char().to_ascii_uppercase());
        }
        san
    }

    /// Parse a move in short algebraic notation against the legal moves.
    ///
    /// Accepts "c5", "Bc5", "Bxe5", "exd6", "exd6e.p.", "e8=Q", "e8Q", "Nbd7",
    /// "R1a3", "O-O"/"0-0", "O-O-O"/"0-0-0", with optional trailing "+" or "#".
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let trimmed = san.trim();
        if trimmed.is_empty() {
            return Err(SanError::Empty);
        }
        let body = trimmed.trim_end_matches(['+', '#', '!', '?']);
        let body = body.strip_suffix("e.p.").unwrap_or(body).trim_end();

        if KINGSIDE.contains(&body) {
            return self.find_castling(true, trimmed);
        }
        if QUEENSIDE.contains(&body) {
            return self.find_castling(false, trimmed);
        }

        let parts = parse_parts(body)?;
        let candidates: Vec<Move> = self
            .legal_moves()
            .into_iter()
            .filter(|mv| parts.matches(self, *mv))
            .collect();

        match candidates.as_slice() {
            [] => Err(SanError::NoMatchingMove {
                san: trimmed.to_string(),
            }),
            [mv] => Ok(*mv),
            _ => Err(SanError::AmbiguousMove {
                san: trimmed.to_string(),
            }),
        }
    }

    fn find_castling(&self, kingside: bool, notation: &str) -> Result<Move, SanError> {
        self.legal_moves()
            .into_iter()
            .find(|mv| {
                if kingside {
                    mv.is_castle_kingside()
                } else {
                    mv.is_castle_queenside()
                }
            })
            .ok_or_else(|| SanError::CastlingUnavailable {
                notation: notation.to_string(),
            })
    }
}

fn parse_parts(body: &str) -> Result<SanParts, SanError> {
    let Some(caps) = SAN_PATTERN.captures(body) else {
        // report the most specific problem we can see
        if let Some(c) = body.chars().next().filter(|c| c.is_ascii_uppercase()) {
            if Piece::from_char(c).is_none() {
                return Err(SanError::InvalidPiece { char: c });
            }
        }
        if let Some((_, promo)) = body.split_once('=') {
            if let Some(c) = promo.chars().next() {
                return Err(SanError::InvalidPromotion { char: c });
            }
        }
        return Err(SanError::InvalidSquare {
            notation: body.to_string(),
        });
    };

    let letter = |i: usize| caps.get(i).and_then(|m| m.as_str().chars().next());
    let piece = letter(1).and_then(Piece::from_char).unwrap_or(Piece::Pawn);
    let to: Square = caps[5].parse().map_err(|_| SanError::InvalidSquare {
        notation: caps[5].to_string(),
    })?;
    let promotion = letter(6).and_then(Piece::from_char);
    if promotion.is_some() && piece != Piece::Pawn {
        return Err(SanError::InvalidPromotion {
            char: letter(6).unwrap_or('='),
        });
    }

    Ok(SanParts {
        piece,
        from_file: letter(2).map(file_to_index),
        from_rank: letter(3).map(rank_to_index),
        to,
        promotion,
    })
}

impl SanParts {
    fn matches(&self, position: &Position, mv: Move) -> bool {
        if mv.to() != self.to || position.piece_on(mv.from()) != Some(self.piece) {
            return false;
        }
        let promotion_ok = match (self.promotion, mv.promotion()) {
            (wanted, actual) if wanted == actual => true,
            // a bare pawn push to the last rank means a queen
            (None, Some(Piece::Queen)) => true,
            _ => false,
        };
        promotion_ok
            && self.from_file.map_or(true, |f| mv.from().file() == f)
            && self.from_rank.map_or(true, |r| mv.from().rank() == r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_pawn_push() {
        let position = Position::new();
        let mv = position.parse_san("e4").unwrap();
        assert_eq!((mv.from(), mv.to()), (sq("e2"), sq("e4")));
        assert_eq!(position.move_to_san(mv), "e4");
    }

    #[test]
    fn test_piece_move() {
        let position = Position::new();
        let mv = position.parse_san("Nc3").unwrap();
        assert_eq!(mv.from(), sq("b1"));
        assert_eq!(position.move_to_san(mv), "Nc3");
    }

    #[test]
    fn test_castling_forms() {
        let position = Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        for notation in ["O-O", "0-0"] {
            let mv = position.parse_san(notation).unwrap();
            assert!(mv.is_castle_kingside());
            assert_eq!(position.move_to_san(mv), "O-O");
        }
        for notation in ["O-O-O", "0-0-0"] {
            assert!(position.parse_san(notation).unwrap().is_castle_queenside());
        }
    }

    #[test]
    fn test_castling_unavailable() {
        let position = Position::new();
        assert!(matches!(
            position.parse_san("O-O"),
            Err(SanError::CastlingUnavailable { .. })
        ));
    }

    #[test]
    fn test_en_passant_suffix() {
        let position =
            Position::from_fen("rnbqkbnr/ppp2ppp/4p3/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        let plain = position.parse_san("exd6").unwrap();
        assert!(plain.is_en_passant());
        assert_eq!(position.parse_san("exd6e.p.").unwrap(), plain);
        assert_eq!(position.parse_san("exd6 e.p.").unwrap(), plain);
        assert_eq!(position.move_to_san(plain), "exd6");
    }

    #[test]
    fn test_promotion_forms() {
        let position = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        for notation in ["a8=Q", "a8Q", "a8"] {
            assert_eq!(
                position.parse_san(notation).unwrap().promotion(),
                Some(Piece::Queen)
            );
        }
        let mv = position.parse_san("a8=N").unwrap();
        assert_eq!(mv.promotion(), Some(Piece::Knight));
        assert_eq!(position.move_to_san(mv), "a8=N");
    }

    #[test]
    fn test_disambiguation() {
        let position = Position::from_fen("3k4/8/8/8/R6R/8/8/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            position.parse_san("Rd4"),
            Err(SanError::AmbiguousMove { .. })
        ));
        let mv = position.parse_san("Rad4").unwrap();
        assert_eq!(mv.from(), sq("a4"));
        assert_eq!(position.move_to_san(mv), "Rad4");
        assert_eq!(position.parse_san("Rhd4").unwrap().from(), sq("h4"));
    }

    #[test]
    fn test_rank_disambiguation() {
        let position = Position::from_fen("3k4/R7/8/8/8/8/R7/4K3 w - - 0 1").unwrap();
        let mv = position.parse_san("R2a4").unwrap();
        assert_eq!(mv.from(), sq("a2"));
        assert_eq!(position.move_to_san(mv), "R2a4");
    }

    #[test]
    fn test_check_and_mate_marks() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let mv = position.parse_san("Rh8+").unwrap();
        assert_eq!(position.move_to_san(mv), "Rh8+");

        let position =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2")
                .unwrap();
        let mv = position.parse_san("Qh4").unwrap();
        assert_eq!(position.move_to_san(mv), "Qh4#");
    }

    #[test]
    fn test_errors() {
        let position = Position::new();
        assert_eq!(position.parse_san("  "), Err(SanError::Empty));
        assert_eq!(
            position.parse_san("Zf3"),
            Err(SanError::InvalidPiece { char: 'Z' })
        );
        assert!(matches!(
            position.parse_san("e9"),
            Err(SanError::InvalidSquare { .. })
        ));
        assert!(matches!(
            position.parse_san("e5"),
            Err(SanError::NoMatchingMove { .. })
        ));
    }

    #[test]
    fn test_round_trip_start_moves() {
        let position = Position::new();
        for &mv in &position.legal_moves() {
            let san = position.move_to_san(mv);
            assert_eq!(position.parse_san(&san).unwrap(), mv, "{san}");
        }
    }
}
