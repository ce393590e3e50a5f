use super::{Color, Move, Piece, Position, Square};

impl Position {
    /// Play a move and return the resulting position.
    ///
    /// The move is trusted to come from the generator for this position; a move
    /// whose origin square is empty yields an unchanged copy.
    ///
    /// # Example
    /// ```
    /// use mailbox_chess::board::Position;
    ///
    /// let position = Position::new();
    /// let mv = position.parse_move("e2e4").unwrap();
    /// let next = position.apply_move(mv);
    /// assert_eq!(
    ///     next.to_fen(),
    ///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    /// );
    /// ```
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Position {
        let mut next = self.clone();
        let (from, to) = (mv.from(), mv.to());
        let Some((color, piece)) = self.piece_at(from) else {
            return next;
        };
        let is_capture = !self.is_empty(to) || mv.is_en_passant();

        next.clear_square(from);
        next.set_piece(to, color, mv.promotion().unwrap_or(piece));

        if mv.is_en_passant() {
            if let Some(captured) = to.offset(-color.pawn_step()) {
                next.clear_square(captured);
            }
        }

        if mv.is_castling() {
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (to.offset(1), to.offset(-1))
            } else {
                (to.offset(-2), to.offset(1))
            };
            if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                next.clear_square(rook_from);
                next.set_piece(rook_to, color, Piece::Rook);
            }
        }

        if piece == Piece::King {
            next.castling_rights.remove_color(color);
        }
        // a rook leaving or captured on its home square takes its right with it
        for sq in [from, to] {
            match sq {
                Square::A1 => next.castling_rights.remove(Color::White, false),
                Square::H1 => next.castling_rights.remove(Color::White, true),
                Square::A8 => next.castling_rights.remove(Color::Black, false),
                Square::H8 => next.castling_rights.remove(Color::Black, true),
                _ => {}
            }
        }

        next.en_passant = if mv.is_double_pawn_push() {
            from.offset(color.pawn_step())
        } else {
            None
        };

        if piece == Piece::Pawn || is_capture {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }
        if self.side_to_move == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.side_to_move = self.side_to_move.opponent();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(position: &Position, notation: &str) -> Position {
        position.apply_move(position.parse_move(notation).unwrap())
    }

    #[test]
    fn test_double_push_sets_en_passant() {
        let next = play(&Position::new(), "e2e4");
        assert_eq!(next.en_passant(), Some("e3".parse().unwrap()));
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.fullmove_number(), 1);

        let next = play(&next, "g8f6");
        assert_eq!(next.en_passant(), None);
        assert_eq!(next.halfmove_clock(), 1);
        assert_eq!(next.fullmove_number(), 2);
    }

    #[test]
    fn test_en_passant_capture_removes_pawn() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let next = play(&position, "e5f6");
        assert_eq!(
            next.to_fen(),
            "rnbqkbnr/ppp1p1pp/5P2/3p4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
        );
    }

    #[test]
    fn test_castling_moves_rook_and_clears_rights() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = play(&position, "e1g1");
        assert_eq!(next.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

        let next = play(&next, "e8c8");
        assert_eq!(next.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
    }

    #[test]
    fn test_rook_capture_clears_right() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = play(&position, "a1a8");
        assert_eq!(next.castling_rights().to_fen(), "Kk");
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn test_promotion() {
        let position = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let next = play(&position, "a7b8n");
        assert_eq!(next.to_fen(), "1N2k3/8/8/8/8/8/8/4K3 b - - 0 1");
        let next = play(&position, "a7a8");
        assert_eq!(next.piece_at(Square::A8), Some((Color::White, Piece::Queen)));
    }

    #[test]
    fn test_original_untouched() {
        let position = Position::new();
        let _ = play(&position, "d2d4");
        assert_eq!(position, Position::new());
    }
}
