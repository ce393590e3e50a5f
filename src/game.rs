//! Game session: move intents, history and game termination.
//!
//! A [`Game`] owns the current [`Position`] and the Zobrist keys of every
//! position reached, which is what repetition detection needs. Players feed
//! it intents in algebraic notation:
//!
//! - a move such as `"e4"`, `"Nbd7"`, `"exd6e.p."`, `"O-O"` or `"e2e4"`
//! - a move followed by `"="`, which also offers a draw
//! - `"=="`, which resigns for the side to move
//!
//! # Example
//! ```
//! use mailbox_chess::game::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! for intent in ["f3", "e5", "g4", "Qh4#"] {
//!     game.play(intent).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::Checkmate { winner: mailbox_chess::board::Color::Black });
//! assert_eq!(game.status().result(), "0-1");
//! ```

use std::fmt;
use std::sync::atomic::AtomicBool;

use crate::board::{
    find_best_move_parallel, Color, Evaluator, FenError, Move, MoveParseError, Piece, Position,
    SanError, SearchLimits, SearchResult, Square,
};

/// Number of occurrences of one position that ends the game.
const REPETITION_LIMIT: usize = 3;

/// A parsed player intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent<'a> {
    /// Play a move, optionally offering a draw with it
    Move { notation: &'a str, offers_draw: bool },
    /// The side to move resigns
    Resign,
}

impl<'a> Intent<'a> {
    #[must_use]
    pub fn parse(input: &'a str) -> Self {
        let input = input.trim();
        if input == "==" {
            return Intent::Resign;
        }
        match input.strip_suffix('=') {
            Some(notation) => Intent::Move {
                notation: notation.trim_end(),
                offers_draw: true,
            },
            None => Intent::Move {
                notation: input,
                offers_draw: false,
            },
        }
    }
}

/// State of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    Repetition,
    Resigned { winner: Color },
    DrawAgreed,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// Score string: "1-0", "0-1", "1/2-1/2", or "*" while ongoing.
    #[must_use]
    pub fn result(self) -> &'static str {
        match self {
            GameStatus::Ongoing => "*",
            GameStatus::Checkmate { winner } | GameStatus::Resigned { winner } => match winner {
                Color::White => "1-0",
                Color::Black => "0-1",
            },
            _ => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result();
        match self {
            GameStatus::Ongoing => write!(f, "{result} game in progress"),
            GameStatus::Checkmate { winner } => write!(f, "{result} {winner} wins by checkmate"),
            GameStatus::Resigned { winner } => {
                write!(f, "{result} {} resigned", winner.opponent())
            }
            GameStatus::Stalemate => write!(f, "{result} stalemate"),
            GameStatus::FiftyMoveRule => write!(f, "{result} fifty-move rule"),
            GameStatus::InsufficientMaterial => write!(f, "{result} insufficient material"),
            GameStatus::Repetition => write!(f, "{result} threefold repetition"),
            GameStatus::DrawAgreed => write!(f, "{result} draw agreed"),
        }
    }
}

/// Error type for game session operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Algebraic notation did not resolve to a legal move
    San(SanError),
    /// A square pair did not resolve to a legal move
    Move(MoveParseError),
    /// The game has already ended
    GameOver { status: GameStatus },
    /// No draw offer from the opponent is pending
    NoDrawOffer,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::San(err) => write!(f, "{err}"),
            GameError::Move(err) => write!(f, "{err}"),
            GameError::GameOver { status } => write!(f, "Game is over: {status}"),
            GameError::NoDrawOffer => write!(f, "No draw offer to accept"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::San(err) => Some(err),
            GameError::Move(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SanError> for GameError {
    fn from(err: SanError) -> Self {
        GameError::San(err)
    }
}

impl From<MoveParseError> for GameError {
    fn from(err: MoveParseError) -> Self {
        GameError::Move(err)
    }
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    moves: Vec<Move>,
    keys: Vec<u64>,
    draw_offer: Option<Color>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// A game from the standard initial position.
    #[must_use]
    pub fn new() -> Self {
        Game::from_position(Position::new())
    }

    /// A game continuing from `position`; it may already be over.
    #[must_use]
    pub fn from_position(position: Position) -> Self {
        let mut game = Game {
            keys: vec![position.zobrist_key()],
            position,
            moves: Vec::new(),
            draw_offer: None,
            status: GameStatus::Ongoing,
        };
        game.status = game.evaluate_status();
        game
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Game::from_position)
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Moves played so far, oldest first.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The color whose draw offer is waiting for an answer.
    #[must_use]
    pub fn pending_draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    /// How often the current position has occurred, itself included.
    #[must_use]
    pub fn repetition_count(&self) -> usize {
        let current = self.position.zobrist_key();
        // positions before the last capture or pawn move cannot recur
        let window = self.position.halfmove_clock() as usize + 1;
        self.keys
            .iter()
            .rev()
            .take(window)
            .filter(|&&key| key == current)
            .count()
    }

    /// Handle one intent: a move (with optional draw offer) or a resignation.
    ///
    /// Returns the move played, or `None` for a resignation.
    pub fn play(&mut self, input: &str) -> Result<Option<Move>, GameError> {
        self.ensure_ongoing()?;
        match Intent::parse(input) {
            Intent::Resign => {
                self.resign();
                Ok(None)
            }
            Intent::Move {
                notation,
                offers_draw,
            } => {
                let mv = self.resolve(notation)?;
                self.commit(mv, offers_draw);
                Ok(Some(mv))
            }
        }
    }

    /// Play the legal move between two squares (promotions default to a queen).
    pub fn play_squares(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Move, GameError> {
        self.ensure_ongoing()?;
        let mv = self.position.find_move(from, to, promotion)?;
        self.commit(mv, false);
        Ok(mv)
    }

    /// The side to move resigns.
    pub fn resign(&mut self) -> GameStatus {
        if !self.status.is_over() {
            self.finish(GameStatus::Resigned {
                winner: self.position.side_to_move().opponent(),
            });
        }
        self.status
    }

    /// Accept the opponent's pending draw offer.
    pub fn accept_draw(&mut self) -> Result<GameStatus, GameError> {
        self.ensure_ongoing()?;
        if self.draw_offer != Some(self.position.side_to_move().opponent()) {
            return Err(GameError::NoDrawOffer);
        }
        self.finish(GameStatus::DrawAgreed);
        Ok(self.status)
    }

    /// Search for a move for the side to move without playing it.
    pub fn suggest_move<E: Evaluator + ?Sized>(
        &self,
        limits: &SearchLimits,
        eval: &E,
    ) -> SearchResult {
        let stop = AtomicBool::new(false);
        find_best_move_parallel(&self.position, limits, eval, &stop)
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.status.is_over() {
            Err(GameError::GameOver {
                status: self.status,
            })
        } else {
            Ok(())
        }
    }

    /// Algebraic first, then coordinate notation ("g1f3").
    fn resolve(&self, notation: &str) -> Result<Move, GameError> {
        match self.position.parse_san(notation) {
            Ok(mv) => Ok(mv),
            Err(san_err @ SanError::NoMatchingMove { .. }) => self
                .position
                .parse_move(notation)
                .map_err(|_| GameError::San(san_err)),
            Err(err) => Err(err.into()),
        }
    }

    fn commit(&mut self, mv: Move, offers_draw: bool) {
        let mover = self.position.side_to_move();
        self.position = self.position.apply_move(mv);
        self.moves.push(mv);
        self.keys.push(self.position.zobrist_key());
        // an unanswered offer lapses once the opponent moves
        self.draw_offer = offers_draw.then_some(mover);

        let status = self.evaluate_status();
        if status.is_over() {
            self.finish(status);
        }
    }

    fn evaluate_status(&self) -> GameStatus {
        let position = &self.position;
        let to_move = position.side_to_move();
        if !position.has_legal_move() {
            if position.is_in_check(to_move) {
                GameStatus::Checkmate {
                    winner: to_move.opponent(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else if position.is_fifty_move_draw() {
            GameStatus::FiftyMoveRule
        } else if position.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if self.repetition_count() >= REPETITION_LIMIT {
            GameStatus::Repetition
        } else {
            GameStatus::Ongoing
        }
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.draw_offer = None;
        log::info!("game over after {} moves: {status}", self.moves.len());
    }
}
