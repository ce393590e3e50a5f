//! Zobrist hashing for chess positions.
//!
//! Provides 64-bit position keys; two positions with the same placement, side
//! to move, castling rights and en passant file share a key. The game session
//! uses them to detect repetitions.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Cell, Color, Position, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[piece_type][color][square 0..64]
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move_key: u64,
    // one key per castling-right bit (WK, WQ, BK, BQ)
    pub(crate) castling_keys: [u64; 4],
    // only the file of the en passant square matters
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // fixed seed, keys stable across runs
        let mut piece_keys = [[[0; 64]; 2]; 6];
        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let black_to_move_key = rng.gen();
        let castling_keys = std::array::from_fn(|_| rng.gen());
        let en_passant_keys = std::array::from_fn(|_| rng.gen());

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

impl Position {
    /// Zobrist key of this position.
    #[must_use]
    pub fn zobrist_key(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut key = 0;

        for sq in Square::all() {
            if let Cell::Piece(color, piece) = self.cell(sq) {
                key ^= keys.piece_keys[piece.index()][color.index()][sq.sq64()];
            }
        }
        if self.side_to_move() == Color::Black {
            key ^= keys.black_to_move_key;
        }
        let rights = self.castling_rights().as_u8();
        for (bit, castle_key) in keys.castling_keys.iter().enumerate() {
            if rights & (1 << bit) != 0 {
                key ^= castle_key;
            }
        }
        if let Some(ep) = self.en_passant() {
            key ^= keys.en_passant_keys[usize::from(ep.file())];
        }
        key
    }
}
