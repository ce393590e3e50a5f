use super::super::{Cell, Color, Move, MoveList, Position, Square};

impl Position {
    /// Ray walk for bishops, rooks and queens; the first enemy blocker is a
    /// capture, a friendly blocker or the border ends the ray.
    pub(crate) fn generate_sliding_moves(
        &self,
        from: Square,
        color: Color,
        directions: &[isize],
        moves: &mut MoveList,
    ) {
        for &step in directions {
            let mut idx = from.index() as isize + step;
            loop {
                let to = Square::from_index_unchecked(idx as u8);
                match self.cell_at_index(idx) {
                    Cell::Empty => moves.push(Move::quiet(from, to)),
                    Cell::Piece(c, _) if c != color => {
                        moves.push(Move::capture(from, to));
                        break;
                    }
                    _ => break,
                }
                idx += step;
            }
        }
    }
}
