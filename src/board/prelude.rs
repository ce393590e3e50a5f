//! Prelude module for convenient imports.
//!
//! # Example
//! ```
//! use mailbox_chess::board::prelude::*;
//!
//! let position = Position::new();
//! let result = find_best_move_parallel(
//!     &position,
//!     &SearchLimits::depth(1).with_threads(2),
//!     &MaterialEvaluator,
//!     &std::sync::atomic::AtomicBool::new(false),
//! );
//! assert!(result.best_move.is_some());
//! ```

pub use super::{
    find_best_move, find_best_move_parallel, validate_fen, CastlingRights, Color, Evaluator,
    FenError, FenValidator, MaterialEvaluator, Move, MoveList, MoveParseError, Piece, Position,
    PositionBuilder, SanError, SearchLimits, SearchResult, Square, START_FEN,
};
