use super::super::attacks::KING_OFFSETS;
use super::super::{Color, Move, MoveList, Piece, Position, Square};

impl Position {
    pub(crate) fn generate_king_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        for offset in KING_OFFSETS {
            if let Some(mv) = self.step_move(from, color, offset) {
                moves.push(mv);
            }
        }

        let home = Square::new(4, color.back_rank());
        if home != Some(from) || self.castling_rights.is_empty() {
            return;
        }

        if self.castling_rights.has(color, true) && self.can_castle(from, color, 1, 3) {
            if let Some(to) = from.offset(2) {
                moves.push(Move::castle_kingside(from, to));
            }
        }
        if self.castling_rights.has(color, false) && self.can_castle(from, color, -1, 4) {
            if let Some(to) = from.offset(-2) {
                moves.push(Move::castle_queenside(from, to));
            }
        }
    }

    /// Rook `rook_distance` steps away in direction `dir`, every square
    /// between empty, and the king's start, transit and landing squares safe.
    fn can_castle(&self, king: Square, color: Color, dir: isize, rook_distance: isize) -> bool {
        let rook_home = king.offset(dir * rook_distance);
        if !rook_home.is_some_and(|sq| self.cell(sq).is(color, Piece::Rook)) {
            return false;
        }
        let path_clear = (1..rook_distance)
            .all(|n| king.offset(dir * n).is_some_and(|sq| self.is_empty(sq)));
        if !path_clear {
            return false;
        }
        let enemy = color.opponent();
        (0..=2).all(|n| {
            king.offset(dir * n)
                .is_some_and(|sq| !self.is_square_attacked(sq, enemy))
        })
    }
}
