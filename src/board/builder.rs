//! Fluent builder for constructing positions piece by piece.
//!
//! # Example
//! ```
//! use mailbox_chess::board::{Color, Piece, PositionBuilder, Square};
//!
//! let position = PositionBuilder::new()
//!     .piece(Square::E1, Color::White, Piece::King)
//!     .piece(Square::E8, Color::Black, Piece::King)
//!     .piece("a2".parse().unwrap(), Color::White, Piece::Pawn)
//!     .side_to_move(Color::White)
//!     .build();
//! assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
//! ```

use super::error::FenError;
use super::validate::FenValidator;
use super::{CastlingRights, Color, Piece, Position, Square};

/// A fluent builder for [`Position`] values.
///
/// `build` performs no legality checks; `try_build` runs a validator over the
/// finished position.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    position: Position,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Start from an empty board, White to move, no castling rights.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            position: Position::empty(),
        }
    }

    /// Start from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        PositionBuilder {
            position: Position::new(),
        }
    }

    /// Start from an existing position.
    #[must_use]
    pub fn from_position(position: &Position) -> Self {
        PositionBuilder {
            position: position.clone(),
        }
    }

    /// Place a piece, replacing whatever stood there.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.position.set_piece(square, color, piece);
        self
    }

    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.position.clear_square(square);
        self
    }

    #[must_use]
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.position.side_to_move = color;
        self
    }

    #[must_use]
    pub fn castling(mut self, rights: CastlingRights) -> Self {
        self.position.castling_rights = rights;
        self
    }

    /// Enable kingside castling for a color.
    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.position.castling_rights.set(color, true);
        self
    }

    /// Enable queenside castling for a color.
    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.position.castling_rights.set(color, false);
        self
    }

    #[must_use]
    pub fn en_passant(mut self, target: Option<Square>) -> Self {
        self.position.en_passant = target;
        self
    }

    #[must_use]
    pub fn halfmove_clock(mut self, clock: u32) -> Self {
        self.position.halfmove_clock = clock;
        self
    }

    #[must_use]
    pub fn fullmove_number(mut self, number: u32) -> Self {
        self.position.fullmove_number = number;
        self
    }

    #[must_use]
    pub fn build(self) -> Position {
        self.position
    }

    /// Build and run `validator` over the FEN of the result.
    pub fn try_build(self, validator: &FenValidator) -> Result<Position, FenError> {
        validator.validate(&self.position.to_fen())?;
        Ok(self.position)
    }
}
