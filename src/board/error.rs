//! Error types for board operations.

use std::fmt;

use super::{Color, Square};

/// Error type for FEN validation and decoding failures.
///
/// Variants are listed in the order the validator checks them; the first
/// violated rule is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string does not have the six-field shape
    Malformed { fen: String },
    /// A move counter does not fit the counter type
    InvalidCounter { field: &'static str, value: String },
    /// Piece placement does not have exactly 8 ranks
    RankCount { found: usize },
    /// A rank does not expand to exactly 8 files (rank numbered 8..1)
    RankWidth { rank: usize, files: usize },
    /// Two digits follow each other inside one rank
    ConsecutiveDigits { rank: usize },
    /// Not exactly one king of each color
    KingCount { white: usize, black: usize },
    /// More than 8 pawns of one color
    TooManyPawns { white: usize, black: usize },
    /// A pawn stands on rank 1 or rank 8
    PawnOnBackRank,
    /// En passant square set but halfmove clock is not 0
    EnPassantClock { halfmove: u32 },
    /// Halfmove clock larger than the number of half moves played
    ClockBound { halfmove: u32, max: i64 },
    /// Fullmove number must start at 1
    FullmoveZero,
    /// The two kings stand on adjacent squares
    KingsAdjacent,
    /// The side that just moved is still in check
    OpponentInCheck,
    /// The side to move is attacked by more pieces than chess allows
    TooManyCheckers { count: usize },
    /// A castling right is set but king or rook left its home square
    CastlingMismatch { right: char },
    /// En passant square cannot have been created by the last move
    EnPassantProvenance { square: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::Malformed { fen } => {
                write!(f, "FEN '{fen}' does not match the six-field FEN pattern")
            }
            FenError::InvalidCounter { field, value } => {
                write!(f, "FEN {field} '{value}' is out of range")
            }
            FenError::RankCount { found } => {
                write!(f, "FEN does not have 8 ranks, found {found}")
            }
            FenError::RankWidth { rank, files } => {
                write!(f, "FEN rank {rank} does not have 8 files, found {files}")
            }
            FenError::ConsecutiveDigits { rank } => {
                write!(f, "FEN rank {rank} has consecutive empty-square digits")
            }
            FenError::KingCount { white, black } => {
                write!(
                    f,
                    "FEN must have exactly 1 king per color, found {white} white and {black} black"
                )
            }
            FenError::TooManyPawns { white, black } => {
                write!(
                    f,
                    "More than 8 pawns of one color ({white} white, {black} black)"
                )
            }
            FenError::PawnOnBackRank => write!(f, "Pawn in first or last rank"),
            FenError::EnPassantClock { halfmove } => {
                write!(
                    f,
                    "Halfmove clock must be 0 with an en passant square, found {halfmove}"
                )
            }
            FenError::ClockBound { halfmove, max } => {
                write!(
                    f,
                    "Invalid halfmove clock {halfmove} for the fullmove count (at most {max})"
                )
            }
            FenError::FullmoveZero => write!(f, "Fullmove number must be at least 1"),
            FenError::KingsAdjacent => write!(f, "Kings stand on adjacent squares"),
            FenError::OpponentInCheck => write!(f, "Side not to move is in check"),
            FenError::TooManyCheckers { count } => {
                write!(f, "Side to move is checked by {count} pieces")
            }
            FenError::CastlingMismatch { right } => {
                write!(
                    f,
                    "Castling right '{right}' set but king or rook is not on its home square"
                )
            }
            FenError::EnPassantProvenance { square } => {
                write!(
                    f,
                    "En passant square {square} cannot follow a double pawn push"
                )
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for queries that are only meaningful for an occupied square.
///
/// These signal a caller defect: they never arise from a valid game flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    /// Move generation was asked for an empty square
    EmptySquare { square: Square },
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let UsageError::EmptySquare { square } = self;
        write!(f, "Square {square} is empty")
    }
}

impl std::error::Error for UsageError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Padded-board index is a border cell or outside the board
    OffBoard { index: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::OffBoard { index } => {
                write!(f, "Index {index} is not a playable square")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for coordinate move parsing failures ("e2e4", from/to pairs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for algebraic notation parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty move string
    Empty,
    /// Invalid piece character
    InvalidPiece { char: char },
    /// Invalid square in the move
    InvalidSquare { notation: String },
    /// Ambiguous move (multiple pieces can reach the target)
    AmbiguousMove { san: String },
    /// No matching legal move found
    NoMatchingMove { san: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Castling requested but not available
    CastlingUnavailable { notation: String },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty move string"),
            SanError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in move")
            }
            SanError::InvalidSquare { notation } => {
                write!(f, "Invalid square in move '{notation}'")
            }
            SanError::AmbiguousMove { san } => {
                write!(f, "Ambiguous move '{san}'")
            }
            SanError::NoMatchingMove { san } => {
                write!(f, "No legal move matches '{san}'")
            }
            SanError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            SanError::CastlingUnavailable { notation } => {
                write!(f, "Castling '{notation}' is not available")
            }
        }
    }
}

impl std::error::Error for SanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_rank_width() {
        let err = FenError::RankWidth { rank: 8, files: 9 };
        assert!(err.to_string().contains("does not have 8 files"));
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn test_fen_error_king_count() {
        let err = FenError::KingCount { white: 0, black: 0 };
        assert!(err.to_string().contains("exactly 1 king"));
    }

    #[test]
    fn test_fen_error_en_passant_clock() {
        let err = FenError::EnPassantClock { halfmove: 1 };
        assert!(err.to_string().contains("en passant"));
    }

    #[test]
    fn test_fen_error_equality() {
        let err1 = FenError::RankCount { found: 7 };
        let err2 = FenError::RankCount { found: 7 };
        assert_eq!(err1, err2);
    }

    #[test]
    fn test_usage_error_names_square() {
        let err = UsageError::EmptySquare {
            square: Square::E1,
        };
        assert!(err.to_string().contains("e1"));
    }

    #[test]
    fn test_square_error_off_board() {
        let err = SquareError::OffBoard { index: 100 };
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_move_error_illegal_move() {
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_san_error_ambiguous() {
        let err = SanError::AmbiguousMove {
            san: "Nd2".to_string(),
        };
        assert!(err.to_string().contains("Nd2"));
    }
}
