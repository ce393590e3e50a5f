use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::validate::FenValidator;
use super::{file_to_index, rank_to_index, CastlingRights, Color, Move, Piece, Position, Square};

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN notation after running the standard validator.
    ///
    /// Leading and trailing whitespace is ignored. The first violated
    /// validation rule is returned as the error.
    ///
    /// # Example
    /// ```
    /// use mailbox_chess::board::{Position, START_FEN};
    ///
    /// let position = Position::from_fen(START_FEN).unwrap();
    /// assert_eq!(position, Position::new());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen_with(fen, &FenValidator::standard())
    }

    /// Parse a position from FEN notation using a specific validator.
    pub fn from_fen_with(fen: &str, validator: &FenValidator) -> Result<Self, FenError> {
        let fen = fen.trim();
        if let Err(err) = validator.validate(fen) {
            log::debug!("rejected FEN '{fen}': {err}");
            return Err(err);
        }
        Position::decode_fields(fen)
    }

    /// Decode the six FEN fields without running the rule checks.
    ///
    /// Used by the validator itself once the shape is known to be sound.
    pub(crate) fn decode_fields(fen: &str) -> Result<Self, FenError> {
        let malformed = || FenError::Malformed {
            fen: fen.to_string(),
        };
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(malformed());
        }

        let mut position = Position::empty();

        // Parse piece placement, rank 8 first
        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            let rank = 7u8.checked_sub(rank_idx as u8).ok_or_else(malformed)?;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                    continue;
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let piece = Piece::from_char(c).ok_or_else(malformed)?;
                let sq = Square::new(file, rank).ok_or_else(malformed)?;
                position.set_piece(sq, color, piece);
                file += 1;
            }
        }

        position.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(malformed()),
        };

        position.castling_rights = CastlingRights::from_fen(parts[2]).map_err(|_| malformed())?;

        position.en_passant = if parts[3] == "-" {
            None
        } else {
            let chars: Vec<char> = parts[3].chars().collect();
            if chars.len() != 2 {
                return Err(malformed());
            }
            let sq = Square::new(file_to_index(chars[0]), rank_to_index(chars[1]))
                .ok_or_else(malformed)?;
            Some(sq)
        };

        position.halfmove_clock = parts[4].parse().map_err(|_| FenError::InvalidCounter {
            field: "halfmove clock",
            value: parts[4].to_string(),
        })?;
        position.fullmove_number = parts[5].parse().map_err(|_| FenError::InvalidCounter {
            field: "fullmove number",
            value: parts[5].to_string(),
        })?;

        Ok(position)
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling_rights.to_fen(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in coordinate notation (e.g., "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move if found, or an error describing why parsing failed.
    ///
    /// # Example
    /// ```
    /// use mailbox_chess::board::Position;
    ///
    /// let position = Position::new();
    /// let mv = position.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = notation.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: chars.len() });
        }

        let square = |file: char, rank: char| {
            if ('a'..='h').contains(&file) && ('1'..='8').contains(&rank) {
                Square::new(file_to_index(file), rank_to_index(rank))
            } else {
                None
            }
        };
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: notation.to_string(),
        };
        let from = square(chars[0], chars[1]).ok_or_else(invalid_square)?;
        let to = square(chars[2], chars[3]).ok_or_else(invalid_square)?;

        let promotion = match chars.get(4) {
            Some(&c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.find_move(from, to, promotion)
            .map_err(|_| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }

    /// Find the legal move between two squares.
    ///
    /// A promotion without an explicit piece resolves to a queen.
    pub fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Move, MoveParseError> {
        let wanted = match promotion {
            None if self.is_promotion_square(from, to) => Some(Piece::Queen),
            other => other,
        };
        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == wanted)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: format!("{from}{to}"),
            })
    }

    fn is_promotion_square(&self, from: Square, to: Square) -> bool {
        matches!(self.piece_at(from), Some((color, Piece::Pawn)) if to.rank() == color.pawn_promotion_rank())
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}
