//! Attack detection on the padded board.
//!
//! Every offset table is expressed in mailbox steps; a step that lands on a
//! border cell reads [`Cell::OffBoard`] and ends the walk, so no per-direction
//! edge checks are needed.

use super::{Cell, Color, Piece, Position, Square};

pub(crate) const KNIGHT_OFFSETS: [isize; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
pub(crate) const KING_OFFSETS: [isize; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];
pub(crate) const ROOK_DIRECTIONS: [isize; 4] = [-10, -1, 1, 10];
pub(crate) const BISHOP_DIRECTIONS: [isize; 4] = [-11, -9, 9, 11];

/// Offsets from a target square back to the pawns of `by` that attack it.
#[inline]
const fn pawn_attacker_offsets(by: Color) -> [isize; 2] {
    match by {
        Color::White => [-9, -11],
        Color::Black => [9, 11],
    }
}

impl Position {
    /// Walk a ray from `sq` and return the first non-empty cell.
    #[inline]
    pub(crate) fn first_along(&self, sq: Square, step: isize) -> Cell {
        let mut idx = sq.index() as isize + step;
        loop {
            match self.cell_at_index(idx) {
                Cell::Empty => idx += step,
                other => return other,
            }
        }
    }

    /// Is `sq` attacked by any piece of color `by`?
    ///
    /// Attacks are pseudo-legal: a pinned piece still attacks, and the king of
    /// `by` counts as an attacker of its neighbours.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.attackers(sq, by).next().is_some()
    }

    /// Number of pieces of color `by` attacking `sq`.
    #[must_use]
    pub fn attackers_count(&self, sq: Square, by: Color) -> usize {
        self.attackers(sq, by).count()
    }

    /// Is the king of `color` under attack?
    ///
    /// A position without a king of that color is never in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opponent()))
    }

    /// Every attacker of `sq`, reported as the piece type that attacks.
    fn attackers(&self, sq: Square, by: Color) -> impl Iterator<Item = Piece> + '_ {
        let origin = sq.index() as isize;
        let at = move |offset: isize, piece: Piece| {
            self.cell_at_index(origin + offset).is(by, piece).then_some(piece)
        };

        let pawns = pawn_attacker_offsets(by)
            .into_iter()
            .filter_map(move |offset| at(offset, Piece::Pawn));
        let knights = KNIGHT_OFFSETS
            .into_iter()
            .filter_map(move |offset| at(offset, Piece::Knight));
        let king = KING_OFFSETS
            .into_iter()
            .filter_map(move |offset| at(offset, Piece::King));
        let straight = ROOK_DIRECTIONS.into_iter().filter_map(move |step| {
            match self.first_along(sq, step) {
                Cell::Piece(color, piece) if color == by && piece.attacks_straight() => Some(piece),
                _ => None,
            }
        });
        let diagonal = BISHOP_DIRECTIONS.into_iter().filter_map(move |step| {
            match self.first_along(sq, step) {
                Cell::Piece(color, piece) if color == by && piece.attacks_diagonal() => Some(piece),
                _ => None,
            }
        });

        pawns.chain(knights).chain(king).chain(straight).chain(diagonal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_position_pawn_attacks() {
        let position = Position::new();
        assert!(!position.is_square_attacked(sq("e4"), Color::White));
        assert!(position.is_square_attacked(sq("d3"), Color::White));
        assert!(position.is_square_attacked(sq("f3"), Color::White));
        assert!(position.is_square_attacked(sq("f6"), Color::Black));
        assert!(!position.is_square_attacked(sq("e5"), Color::Black));
    }

    #[test]
    fn test_pawn_attack_direction() {
        let position = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(position.is_square_attacked(sq("d5"), Color::White));
        assert!(position.is_square_attacked(sq("f5"), Color::White));
        assert!(!position.is_square_attacked(sq("d3"), Color::White));
        assert!(!position.is_square_attacked(sq("e5"), Color::White));
    }

    #[test]
    fn test_rook_ray_blocked() {
        let position = Position::from_fen("4k3/8/8/8/R2p4/8/8/4K3 w - - 0 1").unwrap();
        assert!(position.is_square_attacked(sq("c4"), Color::White));
        assert!(position.is_square_attacked(sq("d4"), Color::White));
        assert!(!position.is_square_attacked(sq("e4"), Color::White));
        assert!(position.is_square_attacked(sq("a8"), Color::White));
    }

    #[test]
    fn test_lone_rook_covers_file_and_rank() {
        let position = crate::board::PositionBuilder::new()
            .piece(sq("d4"), Color::White, Piece::Rook)
            .build();
        let attacked: Vec<Square> = Square::all()
            .filter(|&s| position.is_square_attacked(s, Color::White))
            .collect();
        assert_eq!(attacked.len(), 14);
        assert!(attacked.iter().all(|s| s.file() == 3 || s.rank() == 3));
        assert!(!position.is_square_attacked(sq("d4"), Color::White));
    }

    #[test]
    fn test_knight_does_not_wrap() {
        let position = Position::from_fen("4k3/8/8/8/7N/8/8/4K3 w - - 0 1").unwrap();
        assert!(position.is_square_attacked(sq("g6"), Color::White));
        assert!(position.is_square_attacked(sq("f3"), Color::White));
        assert!(!position.is_square_attacked(sq("a5"), Color::White));
        assert!(!position.is_square_attacked(sq("a3"), Color::White));
    }

    #[test]
    fn test_queen_and_king_attacks() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        assert!(position.is_square_attacked(sq("h8"), Color::White));
        assert!(position.is_square_attacked(sq("a8"), Color::White));
        assert!(position.is_square_attacked(sq("f2"), Color::White));
        assert!(position.is_square_attacked(sq("d7"), Color::Black));
    }

    #[test]
    fn test_check_and_attacker_count() {
        let position = Position::from_fen("4k3/8/3N4/8/8/8/8/4RK2 b - - 0 1").unwrap();
        assert!(position.is_in_check(Color::Black));
        assert!(!position.is_in_check(Color::White));
        assert_eq!(position.attackers_count(sq("e8"), Color::White), 2);
    }
}
