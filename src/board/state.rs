use std::fmt;

use super::{CastlingRights, Cell, Color, Piece, Square, BOARD_CELLS};

/// Halfmove clock value at which the fifty-move rule ends the game.
pub(crate) const FIFTY_MOVE_LIMIT: u32 = 100;

/// A chess position on a padded 10x12 mailbox.
///
/// Positions are plain values: queries borrow them, [`Position::apply_move`]
/// returns a new one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) cells: [Cell; BOARD_CELLS],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in (0u8..).zip(back_rank) {
            position.put(file, 0, Color::White, piece);
            position.put(file, 1, Color::White, Piece::Pawn);
            position.put(file, 6, Color::Black, Piece::Pawn);
            position.put(file, 7, Color::Black, piece);
        }
        position.castling_rights = CastlingRights::all();
        position
    }

    /// A board with no pieces: every playable cell empty, every border cell off-board.
    pub(crate) fn empty() -> Self {
        let mut cells = [Cell::OffBoard; BOARD_CELLS];
        for sq in Square::all() {
            cells[sq.index()] = Cell::Empty;
        }
        Position {
            cells,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    fn put(&mut self, file: u8, rank: u8, color: Color, piece: Piece) {
        if let Some(sq) = Square::new(file, rank) {
            self.set_piece(sq, color, piece);
        }
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.cells[sq.index()] = Cell::Piece(color, piece);
    }

    pub(crate) fn clear_square(&mut self, sq: Square) {
        self.cells[sq.index()] = Cell::Empty;
    }

    /// Cell at a raw padded index; indices past the array read as off-board.
    #[inline]
    pub(crate) fn cell_at_index(&self, idx: isize) -> Cell {
        if idx < 0 {
            return Cell::OffBoard;
        }
        self.cells.get(idx as usize).copied().unwrap_or(Cell::OffBoard)
    }

    /// The full padded board.
    #[must_use]
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.cell(sq).piece()
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.cell(sq).color()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cell(sq).is_empty()
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Squares and types of every piece of one color, a1 to h8.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.cell(sq) {
            Cell::Piece(c, piece) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Number of pieces of a given color and type.
    #[must_use]
    pub fn count(&self, color: Color, piece: Piece) -> usize {
        self.pieces_of(color).filter(|&(_, p)| p == piece).count()
    }

    /// Square of the king of `color`, if it has one.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|&(_, piece)| piece == Piece::King)
            .map(|(sq, _)| sq)
    }

    /// Checkmate or a draw by stalemate, the fifty-move rule or insufficient material.
    ///
    /// Repetition needs game history and is tracked by [`crate::game::Game`].
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_fifty_move_draw() || self.is_insufficient_material() || !self.has_legal_move()
    }

    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_LIMIT
    }

    /// Neither side can mate: bare kings, a single minor piece, or only
    /// bishops that all stand on one square color.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishop_shades = [0usize; 2];

        for color in Color::BOTH {
            for (sq, piece) in self.pieces_of(color) {
                match piece {
                    Piece::Pawn | Piece::Rook | Piece::Queen => return false,
                    Piece::Knight => knights += 1,
                    Piece::Bishop => {
                        bishop_shades[usize::from((sq.file() + sq.rank()) % 2)] += 1;
                    }
                    Piece::King => {}
                }
            }
        }

        let bishops = bishop_shades[0] + bishop_shades[1];
        if knights + bishops <= 1 {
            return true;
        }
        knights == 0 && (bishop_shades[0] == 0 || bishop_shades[1] == 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

/// Board diagram from White's side followed by the non-placement fields.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..8u8 {
                let ch = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(color, piece)| piece.to_fen_char(color));
                write!(f, " {ch} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\n    a  b  c  d  e  f  g  h\n")?;
        writeln!(f, "{} moves next", self.side_to_move)?;
        writeln!(f, "Castling: {}", self.castling_rights.to_fen())?;
        match self.en_passant {
            Some(sq) => writeln!(f, "En passant square: {sq}")?,
            None => writeln!(f, "En passant square: -")?,
        }
        writeln!(f, "Halfmove clock: {}", self.halfmove_clock)?;
        write!(f, "Fullmove number: {}", self.fullmove_number)
    }
}
