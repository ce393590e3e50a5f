//! Chess board representation and game logic.
//!
//! Positions live on a padded 10x12 mailbox: every playable square has two
//! guard cells beyond it in each direction, so offset walks for knights,
//! kings and sliders stop on an off-board cell instead of bounds checks.
//! Supports full chess rules including castling, en passant, and promotions.
//!
//! # Example
//! ```
//! use mailbox_chess::board::{Color, Position, START_FEN};
//!
//! let position = Position::from_fen(START_FEN).unwrap();
//! assert_eq!(position.side_to_move(), Color::White);
//! assert_eq!(position.legal_moves().len(), 20);
//! ```

mod attacks;
mod builder;
mod error;
mod eval;
mod fen;
mod make_move;
mod movegen;
pub mod prelude;
mod query;
mod san;
mod search;
mod state;
mod types;
mod validate;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::PositionBuilder;
pub use error::{FenError, MoveParseError, SanError, SquareError, UsageError};
pub use fen::START_FEN;
pub use query::Destinations;
pub use state::Position;
pub use types::{
    CastlingRights, Cell, Color, Move, MoveList, MoveListIntoIter, Piece, Square, BOARD_CELLS,
};
pub use validate::{validate_fen, FenValidator, ValidationMode};

// Public API - evaluation, search functions and configuration
pub use eval::{Evaluator, MaterialEvaluator, MATE_SCORE};
pub use search::{
    alpha_beta, find_best_move, find_best_move_parallel, minimax, search, SearchContext,
    SearchLimits, SearchResult, SearchStats, DEFAULT_DEPTH, SCORE_INF,
};

pub(crate) use types::{file_to_index, rank_to_index, PROMOTION_PIECES};
