mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attacks::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use super::error::UsageError;
use super::{Cell, Color, Move, MoveList, Piece, Position, Square};

impl Position {
    /// Pseudo-legal moves of the piece on `from`.
    ///
    /// Color and direction come from the piece itself, not from the side to
    /// move. Moves may leave the mover's own king attacked.
    pub fn pseudo_legal_moves_from(&self, from: Square) -> Result<MoveList, UsageError> {
        let (color, piece) = self
            .piece_at(from)
            .ok_or(UsageError::EmptySquare { square: from })?;
        let mut moves = MoveList::new();
        self.generate_piece_moves(from, color, piece, &mut moves);
        Ok(moves)
    }

    /// Pseudo-legal moves of every piece of the side to move.
    #[must_use]
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for (from, piece) in self.pieces_of(self.side_to_move) {
            self.generate_piece_moves(from, self.side_to_move, piece, &mut moves);
        }
        moves
    }

    /// Legal moves of the side to move, in generation order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.pseudo_legal_moves()
            .into_iter()
            .filter(|&mv| self.is_legal(mv))
            .collect()
    }

    /// Legal moves of the piece on `from`.
    pub fn legal_moves_from(&self, from: Square) -> Result<MoveList, UsageError> {
        Ok(self
            .pseudo_legal_moves_from(from)?
            .into_iter()
            .filter(|&mv| self.is_legal(mv))
            .collect())
    }

    /// Does the pseudo-legal move keep the mover's king safe?
    #[must_use]
    pub fn is_legal(&self, mv: Move) -> bool {
        let Some(color) = self.color_on(mv.from()) else {
            return false;
        };
        !self.apply_move(mv).is_in_check(color)
    }

    /// Stops at the first legal move found.
    #[must_use]
    pub fn has_legal_move(&self) -> bool {
        self.pseudo_legal_moves()
            .into_iter()
            .any(|mv| self.is_legal(mv))
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move) && !self.has_legal_move()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move) && !self.has_legal_move()
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .iter()
            .map(|&mv| self.apply_move(mv).perft(depth - 1))
            .sum()
    }

    /// Per-move perft counts, useful for locating generator bugs.
    #[must_use]
    pub fn perft_divide(&self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        self.legal_moves()
            .iter()
            .map(|&mv| (mv, self.apply_move(mv).perft(depth - 1)))
            .collect()
    }

    fn generate_piece_moves(&self, from: Square, color: Color, piece: Piece, moves: &mut MoveList) {
        match piece {
            Piece::Pawn => self.generate_pawn_moves(from, color, moves),
            Piece::Knight => self.generate_knight_moves(from, color, moves),
            Piece::Bishop => self.generate_sliding_moves(from, color, &BISHOP_DIRECTIONS, moves),
            Piece::Rook => self.generate_sliding_moves(from, color, &ROOK_DIRECTIONS, moves),
            Piece::Queen => {
                self.generate_sliding_moves(from, color, &ROOK_DIRECTIONS, moves);
                self.generate_sliding_moves(from, color, &BISHOP_DIRECTIONS, moves);
            }
            Piece::King => self.generate_king_moves(from, color, moves),
        }
    }

    /// Single-step move to `from + offset`: quiet onto an empty cell, capture
    /// onto an enemy, nothing onto a friendly piece or the border.
    fn step_move(&self, from: Square, color: Color, offset: isize) -> Option<Move> {
        let idx = from.index() as isize + offset;
        match self.cell_at_index(idx) {
            Cell::Empty => Some(Move::quiet(from, Square::from_index_unchecked(idx as u8))),
            Cell::Piece(c, _) if c != color => {
                Some(Move::capture(from, Square::from_index_unchecked(idx as u8)))
            }
            _ => None,
        }
    }
}
