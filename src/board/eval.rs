//! Static evaluation used by the search.
//!
//! Scores are always from White's point of view: positive favours White.

use super::{Color, Position};

/// Score of a checkmated position, from the winner's side.
pub const MATE_SCORE: i32 = 100_000;

/// Position evaluation injected into the search.
///
/// The search only ever calls these two methods, so tests can substitute
/// arbitrary scoring or terminal predicates.
pub trait Evaluator: Sync {
    fn evaluate(&self, position: &Position) -> i32;

    /// Terminal-node predicate; defaults to the rules of chess.
    fn is_game_over(&self, position: &Position) -> bool {
        position.is_game_over()
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> i32 + Sync,
{
    fn evaluate(&self, position: &Position) -> i32 {
        self(position)
    }
}

/// Material count with the classic centipawn values.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    /// Material balance only, ignoring mate and draws.
    #[must_use]
    pub fn material(position: &Position) -> i32 {
        Color::BOTH
            .iter()
            .map(|&color| {
                color.sign()
                    * position
                        .pieces_of(color)
                        .map(|(_, piece)| piece.value())
                        .sum::<i32>()
            })
            .sum()
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, position: &Position) -> i32 {
        let to_move = position.side_to_move();
        if !position.has_legal_move() {
            return if position.is_in_check(to_move) {
                -to_move.sign() * MATE_SCORE
            } else {
                0
            };
        }
        if position.is_fifty_move_draw() || position.is_insufficient_material() {
            return 0;
        }
        MaterialEvaluator::material(position)
    }
}
