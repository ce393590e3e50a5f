//! Core chess types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - padded mailbox index of a playable square
//! - `Cell` - contents of one mailbox cell
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod castling;
mod cell;
mod moves;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use cell::Cell;
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use piece::{Color, Piece};
pub use square::{Square, BOARD_CELLS};

pub(crate) use piece::PROMOTION_PIECES;
pub(crate) use square::{file_to_index, rank_to_index};
