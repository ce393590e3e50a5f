use super::super::{Cell, Color, Move, MoveList, Position, Square, PROMOTION_PIECES};

impl Position {
    pub(crate) fn generate_pawn_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let step = color.pawn_step();
        let promotes = |to: Square| to.rank() == color.pawn_promotion_rank();

        if let Some(one) = from.offset(step).filter(|&sq| self.is_empty(sq)) {
            if promotes(one) {
                push_promotions(moves, from, one, false);
            } else {
                moves.push(Move::quiet(from, one));
                if from.rank() == color.pawn_start_rank() {
                    if let Some(two) = one.offset(step).filter(|&sq| self.is_empty(sq)) {
                        moves.push(Move::double_pawn_push(from, two));
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(to) = from.offset(step + side) else {
                continue;
            };
            match self.cell(to) {
                Cell::Piece(c, _) if c != color => {
                    if promotes(to) {
                        push_promotions(moves, from, to, true);
                    } else {
                        moves.push(Move::capture(from, to));
                    }
                }
                // the target square only belongs to the side to move
                Cell::Empty if self.en_passant == Some(to) && color == self.side_to_move => {
                    moves.push(Move::en_passant(from, to));
                }
                _ => {}
            }
        }
    }
}

fn push_promotions(moves: &mut MoveList, from: Square, to: Square, capture: bool) {
    for piece in PROMOTION_PIECES {
        moves.push(if capture {
            Move::new_promotion_capture(from, to, piece)
        } else {
            Move::new_promotion(from, to, piece)
        });
    }
}
