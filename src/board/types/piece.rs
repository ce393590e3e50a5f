//! Piece kinds and the two sides.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const PIECE_LETTERS: [char; 6] = ['p', 'n', 'b', 'r', 'q', 'k'];
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Letter lookup in either case.
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        let lower = c.to_ascii_lowercase();
        PIECE_LETTERS
            .iter()
            .position(|&letter| letter == lower)
            .map(|i| Piece::ALL[i])
    }

    /// Lowercase letter, as Black's pieces are written in FEN.
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        PIECE_LETTERS[self.index()]
    }

    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        match color {
            Color::White => self.to_char().to_ascii_uppercase(),
            Color::Black => self.to_char(),
        }
    }

    /// Centipawn value; the king counts for nothing.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        PIECE_VALUES[self.index()]
    }

    /// Slides along the ±9/±11 mailbox rays.
    #[inline]
    #[must_use]
    pub const fn attacks_diagonal(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Queen)
    }

    /// Slides along the ±1/±10 mailbox rays.
    #[inline]
    #[must_use]
    pub const fn attacks_straight(self) -> bool {
        matches!(self, Piece::Rook | Piece::Queen)
    }
}

pub(crate) const PROMOTION_PIECES: [Piece; 4] =
    [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for White, -1 for Black.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i32 {
        1 - 2 * self.index() as i32
    }

    /// One rank forward on the padded board.
    #[inline]
    pub(crate) const fn pawn_step(self) -> isize {
        10 * self.sign() as isize
    }

    /// Rank index as seen from this side's end of the board.
    #[inline]
    const fn relative_rank(self, rank: u8) -> u8 {
        match self {
            Color::White => rank,
            Color::Black => 7 - rank,
        }
    }

    #[inline]
    pub(crate) const fn back_rank(self) -> u8 {
        self.relative_rank(0)
    }

    #[inline]
    pub(crate) const fn pawn_start_rank(self) -> u8 {
        self.relative_rank(1)
    }

    #[inline]
    pub(crate) const fn pawn_promotion_rank(self) -> u8 {
        self.relative_rank(7)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_letters_either_case() {
        for piece in Piece::ALL {
            assert_eq!(Piece::from_char(piece.to_char()), Some(piece));
            assert_eq!(
                Piece::from_char(piece.to_fen_char(Color::White)),
                Some(piece)
            );
        }
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::Knight.to_fen_char(Color::White), 'N');
        assert_eq!(Piece::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn test_values() {
        assert_eq!(Piece::Bishop.value(), 330);
        assert_eq!(Piece::King.value(), 0);
    }

    #[test]
    fn test_side_geometry() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::White.pawn_step(), 10);
        assert_eq!(Color::Black.pawn_step(), -10);
        assert_eq!(Color::Black.sign(), -1);
        assert_eq!(
            (Color::White.pawn_start_rank(), Color::White.pawn_promotion_rank()),
            (1, 7)
        );
        assert_eq!(
            (Color::Black.back_rank(), Color::Black.pawn_start_rank(), Color::Black.pawn_promotion_rank()),
            (7, 6, 0)
        );
        assert_eq!(Color::Black.to_string(), "Black");
    }
}
