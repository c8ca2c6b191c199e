//! Zobrist keys for incremental position fingerprints.
//!
//! A table is built from an explicit seed so fingerprints are reproducible
//! across runs. Tables are immutable once built and shared between positions
//! through `Arc`; two positions only compare equal when their tables do.

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::arimaa_rules::DEFAULT_ZOBRIST_SEED;
use crate::game_state::arimaa_types::{Board, Color, Piece, PieceKind, Square};
use crate::moves::step_masks::squares_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    seed: u64,
    piece_square: [[[u64; 64]; 6]; 2],
}

impl ZobristKeys {
    /// Build a key table from `seed`. Every key is non-zero and unique.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut seen = HashSet::with_capacity(2 * 6 * 64);
        let mut piece_square = [[[0u64; 64]; 6]; 2];

        for color in &mut piece_square {
            for kind in color {
                for key in kind {
                    *key = loop {
                        let candidate: u64 = rng.random();
                        if candidate != 0 && seen.insert(candidate) {
                            break candidate;
                        }
                    };
                }
            }
        }

        Self { seed, piece_square }
    }

    /// Table built from the crate's default seed.
    pub fn standard() -> Self {
        Self::new(DEFAULT_ZOBRIST_SEED)
    }

    pub fn shared(seed: u64) -> Arc<Self> {
        Arc::new(Self::new(seed))
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Key for a `(piece, square)` occupancy term.
    #[inline]
    pub fn piece_square_key(&self, piece: Piece, square: Square) -> u64 {
        self.piece_square[piece.color.index()][piece.kind.index()][square as usize]
    }

    /// Fingerprint of a board computed from scratch.
    pub fn compute_fingerprint(&self, board: &Board) -> u64 {
        let mut key = 0u64;

        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let piece = Piece::new(color, kind);
                for sq in squares_of(board.bits(piece)) {
                    key ^= self.piece_square_key(piece, sq);
                }
            }
        }

        key
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ZobristKeys;
    use crate::game_state::arimaa_types::{Board, Color, Piece, PieceKind};

    #[test]
    fn same_seed_builds_same_table() {
        assert_eq!(ZobristKeys::new(7), ZobristKeys::new(7));
        assert_ne!(ZobristKeys::new(7), ZobristKeys::new(8));
    }

    #[test]
    fn keys_are_nonzero_and_unique() {
        let keys = ZobristKeys::standard();
        let mut seen = HashSet::new();
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                for sq in 0..64u8 {
                    let key = keys.piece_square_key(Piece::new(color, kind), sq);
                    assert_ne!(key, 0);
                    assert!(seen.insert(key), "duplicate key for {kind:?} on {sq}");
                }
            }
        }
    }

    #[test]
    fn empty_board_has_zero_fingerprint() {
        let keys = ZobristKeys::standard();
        assert_eq!(keys.compute_fingerprint(&Board::empty()), 0);
        assert_ne!(keys.compute_fingerprint(&Board::standard_setup()), 0);
    }
}
