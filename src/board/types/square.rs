//! Square types and padded-board index arithmetic.
//!
//! Squares index a 10x12 mailbox: the 8x8 playing area sits inside a border
//! two cells deep above and below and one cell deep at either side, so every
//! knight jump or ray step from a playable square lands inside the array.
//! `index = 21 + file + rank * 10`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// Number of cells in the padded board.
pub const BOARD_CELLS: usize = 120;

/// Marker used by [`SQ120_TO_SQ64`] for cells outside the playing area.
pub(crate) const OFF_BOARD_64: u8 = 65;

/// Padded index -> 0..64 index (a1 = 0, h8 = 63), `OFF_BOARD_64` on the border.
pub(crate) static SQ120_TO_SQ64: Lazy<[u8; BOARD_CELLS]> = Lazy::new(|| {
    let mut table = [OFF_BOARD_64; BOARD_CELLS];
    for rank in 0..8u8 {
        for file in 0..8u8 {
            let idx = 21 + file as usize + rank as usize * 10;
            table[idx] = rank * 8 + file;
        }
    }
    table
});

/// 0..64 index -> padded index.
pub(crate) static SQ64_TO_SQ120: Lazy<[u8; 64]> = Lazy::new(|| {
    let mut table = [0u8; 64];
    for (sq64, cell) in table.iter_mut().enumerate() {
        *cell = (21 + sq64 % 8 + (sq64 / 8) * 10) as u8;
    }
    table
});

pub(crate) fn file_to_index(file: char) -> u8 {
    file as u8 - b'a'
}

pub(crate) fn rank_to_index(rank: char) -> u8 {
    rank as u8 - b'1'
}

/// A playable square, stored as its index into the padded 120-cell board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(21);
    pub const B1: Square = Square(22);
    pub const C1: Square = Square(23);
    pub const D1: Square = Square(24);
    pub const E1: Square = Square(25);
    pub const F1: Square = Square(26);
    pub const G1: Square = Square(27);
    pub const H1: Square = Square(28);
    pub const A8: Square = Square(91);
    pub const B8: Square = Square(92);
    pub const C8: Square = Square(93);
    pub const D8: Square = Square(94);
    pub const E8: Square = Square(95);
    pub const F8: Square = Square(96);
    pub const G8: Square = Square(97);
    pub const H8: Square = Square(98);

    /// Create a square from file (0-7, a-h) and rank (0-7, 1-8)
    #[must_use]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(21 + file + rank * 10))
        } else {
            None
        }
    }

    /// Create a square from a padded board index, rejecting border cells.
    pub fn from_index(idx: usize) -> Result<Self, SquareError> {
        match SQ120_TO_SQ64.get(idx) {
            Some(&sq64) if sq64 != OFF_BOARD_64 => Ok(Square(idx as u8)),
            _ => Err(SquareError::OffBoard { index: idx }),
        }
    }

    /// Wrap a padded index the caller already knows to be playable.
    #[inline]
    pub(crate) const fn from_index_unchecked(idx: u8) -> Self {
        Square(idx)
    }

    /// Create a square from a 0..64 index (a1 = 0, h8 = 63)
    #[must_use]
    pub fn from_sq64(sq64: usize) -> Option<Self> {
        SQ64_TO_SQ120.get(sq64).map(|&idx| Square(idx))
    }

    /// Index into the padded 120-cell board
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Index into a 64-square board (a1 = 0, h8 = 63)
    #[inline]
    #[must_use]
    pub fn sq64(self) -> usize {
        SQ120_TO_SQ64[self.index()] as usize
    }

    /// File 0-7 (a-h)
    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.0 % 10 - 1
    }

    /// Rank 0-7 (1-8)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0 / 10 - 2
    }

    /// Step by a mailbox offset, `None` when the result leaves the board.
    #[must_use]
    pub fn offset(self, delta: isize) -> Option<Self> {
        let idx = self.index() as isize + delta;
        if idx < 0 {
            return None;
        }
        Square::from_index(idx as usize).ok()
    }

    /// All 64 squares from a1 to h8, rank by rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_sq64)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl TryFrom<usize> for Square {
    type Error = SquareError;

    fn try_from(idx: usize) -> Result<Self, Self::Error> {
        Square::from_index(idx)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2
            || !(b'a'..=b'h').contains(&bytes[0])
            || !(b'1'..=b'8').contains(&bytes[1])
        {
            return Err(SquareError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        let file = file_to_index(bytes[0] as char);
        let rank = rank_to_index(bytes[1] as char);
        Ok(Square(21 + file + rank * 10))
    }
}
