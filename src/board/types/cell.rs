//! Mailbox cell contents.

use super::piece::{Color, Piece};

/// Content of one cell of the padded board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Border sentinel around the playing area.
    #[default]
    OffBoard,
    Empty,
    Piece(Color, Piece),
}

impl Cell {
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    #[must_use]
    pub const fn is_off_board(self) -> bool {
        matches!(self, Cell::OffBoard)
    }

    /// The piece and its color, if occupied
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Option<(Color, Piece)> {
        match self {
            Cell::Piece(color, piece) => Some((color, piece)),
            _ => None,
        }
    }

    /// Color of the occupant, if any
    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Piece(color, _) => Some(color),
            _ => None,
        }
    }

    /// True if this cell holds exactly `piece` of `color`
    #[inline]
    #[must_use]
    pub fn is(self, color: Color, piece: Piece) -> bool {
        self == Cell::Piece(color, piece)
    }
}
