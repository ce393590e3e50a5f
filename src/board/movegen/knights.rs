use super::super::attacks::KNIGHT_OFFSETS;
use super::super::{Color, MoveList, Position, Square};

impl Position {
    pub(crate) fn generate_knight_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        for offset in KNIGHT_OFFSETS {
            if let Some(mv) = self.step_move(from, color, offset) {
                moves.push(mv);
            }
        }
    }
}
