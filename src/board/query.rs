//! Read-only views for a presentation layer.

use super::error::UsageError;
use super::{Color, Piece, Position, Square};

/// Legal destinations of one piece, split the way a board UI highlights them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Destinations {
    /// Moves onto empty squares (castling included)
    pub quiet: Vec<Square>,
    /// Moves that take a piece, en passant included
    pub captures: Vec<Square>,
}

impl Destinations {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quiet.is_empty() && self.captures.is_empty()
    }

    #[must_use]
    pub fn contains(&self, sq: Square) -> bool {
        self.quiet.contains(&sq) || self.captures.contains(&sq)
    }
}

impl Position {
    /// All 64 squares from a1 to h8 with their occupants.
    #[must_use]
    pub fn squares(&self) -> Vec<(Square, Option<(Color, Piece)>)> {
        Square::all().map(|sq| (sq, self.piece_at(sq))).collect()
    }

    /// Squares attacked by `by`, indexed a1 = 0 to h8 = 63.
    #[must_use]
    pub fn attack_map(&self, by: Color) -> [bool; 64] {
        let mut map = [false; 64];
        for sq in Square::all() {
            map[sq.sq64()] = self.is_square_attacked(sq, by);
        }
        map
    }

    /// Squares the side to move must watch: those attacked by the opponent.
    #[must_use]
    pub fn threat_map(&self) -> [bool; 64] {
        self.attack_map(self.side_to_move.opponent())
    }

    /// Where the piece on `from` can legally go.
    ///
    /// Promotions to different pieces collapse into one destination.
    pub fn destinations(&self, from: Square) -> Result<Destinations, UsageError> {
        let mut result = Destinations::default();
        for mv in &self.legal_moves_from(from)? {
            let bucket = if mv.is_capture() {
                &mut result.captures
            } else {
                &mut result.quiet
            };
            if !bucket.contains(&mv.to()) {
                bucket.push(mv.to());
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_squares_listing() {
        let squares = Position::new().squares();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], (Square::A1, Some((Color::White, Piece::Rook))));
        assert_eq!(squares[63], (Square::H8, Some((Color::Black, Piece::Rook))));
        assert_eq!(squares[28], (sq("e4"), None));
    }

    #[test]
    fn test_threat_map_start() {
        let threats = Position::new().threat_map();
        // ranks 6 and 7 plus rank 8 except the corners
        assert!(threats[sq("e6").sq64()]);
        assert!(threats[sq("b8").sq64()]);
        assert!(!threats[sq("e5").sq64()]);
        assert!(!threats[sq("a8").sq64()]);
        assert_eq!(threats.iter().filter(|&&t| t).count(), 22);
    }

    #[test]
    fn test_destinations_partition() {
        let position =
            Position::from_fen("rnbqkbnr/ppp2ppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        let dest = position.destinations(sq("e5")).unwrap();
        assert_eq!(dest.quiet, vec![sq("e6")]);
        assert_eq!(dest.captures, vec![sq("d6")]);
    }

    #[test]
    fn test_destinations_promotion_collapsed() {
        let position = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let dest = position.destinations(sq("a7")).unwrap();
        assert_eq!(dest.quiet, vec![sq("a8")]);
        assert_eq!(dest.captures, vec![sq("b8")]);
    }

    #[test]
    fn test_destinations_empty_square() {
        assert_eq!(
            Position::new().destinations(sq("e4")),
            Err(UsageError::EmptySquare { square: sq("e4") })
        );
    }

    #[test]
    fn test_pinned_piece_has_no_destinations() {
        let position = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(position.destinations(sq("e2")).unwrap().is_empty());
    }
}
