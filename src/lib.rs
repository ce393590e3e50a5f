pub mod board;
pub mod game;
pub mod zobrist;

pub use board::{Color, Move, Piece, Position, Square, START_FEN};
pub use game::{Game, GameError, GameStatus};
