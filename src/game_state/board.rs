//! Bitboard piece placement.
//!
//! `Board` is a plain `Copy` value: twelve piece bitboards laid out as
//! `[color][kind]`, plus per-side placement and empty-square caches. Every
//! mutator keeps the caches in step with the piece bitboards.

use crate::errors::InvariantViolation;
use crate::game_state::arimaa_rules::STANDARD_LAYOUT;
use crate::game_state::arimaa_types::{Color, Piece, PieceKind, Square};
use crate::moves::step_masks::{neighbors, neighbors_of, square_bit, TRAPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    placement: [u64; 2],
    empty: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            placement: [0; 2],
            empty: u64::MAX,
        }
    }

    /// The standard opening layout with both sides set up.
    pub fn standard_setup() -> Self {
        let mut board = Self::empty();
        for (index, ch) in STANDARD_LAYOUT.chars().enumerate() {
            if let Some(piece) = Piece::from_letter(ch) {
                let rank = 7 - index / 8;
                let file = index % 8;
                board.add_piece(piece, (rank * 8 + file) as Square);
            }
        }
        board
    }

    #[inline]
    pub fn bits(&self, piece: Piece) -> u64 {
        self.pieces[piece.color.index()][piece.kind.index()]
    }

    #[inline]
    pub fn placement(&self, color: Color) -> u64 {
        self.placement[color.index()]
    }

    #[inline]
    pub fn empty_squares(&self) -> u64 {
        self.empty
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        !self.empty
    }

    #[inline]
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.empty & square_bit(square) != 0
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let bit = square_bit(square);
        if self.empty & bit != 0 {
            return None;
        }

        let color = if self.placement[Color::Gold.index()] & bit != 0 {
            Color::Gold
        } else {
            Color::Silver
        };
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & bit != 0)
            .map(|kind| Piece::new(color, kind))
    }

    /// Squares holding pieces of `color` strictly stronger than `kind`.
    pub fn stronger_than(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index() + 1..]
            .iter()
            .fold(0u64, |acc, bits| acc | bits)
    }

    /// Squares holding pieces of `color` strictly weaker than `kind`.
    pub fn weaker_than(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][..kind.index()]
            .iter()
            .fold(0u64, |acc, bits| acc | bits)
    }

    /// A piece is frozen when it has no friendly neighbor and at least one
    /// strictly stronger enemy neighbor. Empty squares are never frozen.
    pub fn is_frozen(&self, square: Square) -> bool {
        let Some(piece) = self.piece_at(square) else {
            return false;
        };
        let around = neighbors(square);
        if around & self.placement(piece.color) != 0 {
            return false;
        }
        around & self.stronger_than(piece.color.opposite(), piece.kind) != 0
    }

    /// Bitboard of every frozen piece of `color`.
    pub fn frozen(&self, color: Color) -> u64 {
        let own = self.placement(color);
        let unsupported = own & !neighbors_of(own);
        let mut frozen = 0u64;
        for kind in PieceKind::ALL {
            let bits = self.pieces[color.index()][kind.index()] & unsupported;
            if bits != 0 {
                let threats = neighbors_of(self.stronger_than(color.opposite(), kind));
                frozen |= bits & threats;
            }
        }
        frozen
    }

    #[inline]
    pub fn rabbits(&self, color: Color) -> u64 {
        self.pieces[color.index()][PieceKind::Rabbit.index()]
    }

    /// Pieces of each kind for `color`, indexed by `PieceKind::index()`.
    pub fn piece_counts(&self, color: Color) -> [u8; 6] {
        let mut counts = [0u8; 6];
        for kind in PieceKind::ALL {
            counts[kind.index()] = self.pieces[color.index()][kind.index()].count_ones() as u8;
        }
        counts
    }

    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        let bit = square_bit(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= bit;
        self.placement[piece.color.index()] |= bit;
        self.empty &= !bit;
    }

    pub(crate) fn remove_piece(&mut self, piece: Piece, square: Square) {
        let bit = square_bit(square);
        self.pieces[piece.color.index()][piece.kind.index()] &= !bit;
        self.placement[piece.color.index()] &= !bit;
        self.empty |= bit;
    }

    pub(crate) fn move_piece(&mut self, piece: Piece, from: Square, to: Square) {
        let swap = square_bit(from) | square_bit(to);
        self.pieces[piece.color.index()][piece.kind.index()] ^= swap;
        self.placement[piece.color.index()] ^= swap;
        self.empty ^= swap;
    }

    /// Find the piece of `color` left unsupported on a trap after one of its
    /// pieces stepped `from` -> `to`. Only the traps next to `from`, and `to`
    /// itself, can lose support, and at most one piece can fall.
    pub fn unsupported_trap_piece(
        &self,
        color: Color,
        from: Square,
        to: Square,
    ) -> Option<(Piece, Square)> {
        let own = self.placement(color);
        let candidates = (neighbors(from) | square_bit(to)) & TRAPS & own;
        if candidates == 0 {
            return None;
        }

        let mut bits = candidates;
        while bits != 0 {
            let trap = bits.trailing_zeros() as Square;
            bits &= bits - 1;
            if neighbors(trap) & own == 0 {
                return self.piece_at(trap).map(|piece| (piece, trap));
            }
        }
        None
    }

    /// Recompute the caches and compare with the stored ones.
    pub fn verify_caches(&self) -> Result<(), InvariantViolation> {
        let mut seen = 0u64;
        for color in Color::ALL {
            let mut union = 0u64;
            for kind in PieceKind::ALL {
                let bits = self.pieces[color.index()][kind.index()];
                if bits & seen != 0 {
                    return Err(InvariantViolation::OverlappingPieces);
                }
                seen |= bits;
                union |= bits;
            }
            if union != self.placement[color.index()] {
                return Err(InvariantViolation::StalePlacement(color));
            }
        }
        if self.empty != !seen {
            return Err(InvariantViolation::StaleEmpty);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::arimaa_types::{Color, Piece, PieceKind};

    #[test]
    fn standard_setup_fills_home_ranks() {
        let board = Board::standard_setup();
        assert_eq!(board.placement(Color::Gold), 0xFFFF);
        assert_eq!(board.placement(Color::Silver), 0xFFFF_0000_0000_0000);
        assert_eq!(board.piece_at(4), Some(Piece::new(Color::Gold, PieceKind::Rabbit)));
        assert_eq!(board.piece_at(12), Some(Piece::new(Color::Gold, PieceKind::Elephant)));
        assert_eq!(board.piece_at(52), Some(Piece::new(Color::Silver, PieceKind::Camel)));
        assert_eq!(board.piece_at(27), None);
        board.verify_caches().expect("standard setup caches should agree");
    }

    #[test]
    fn lone_piece_next_to_stronger_enemy_is_frozen() {
        let mut board = Board::empty();
        board.add_piece(Piece::new(Color::Gold, PieceKind::Cat), 27);
        board.add_piece(Piece::new(Color::Silver, PieceKind::Dog), 28);
        assert!(board.is_frozen(27));
        assert!(!board.is_frozen(28));
        assert_eq!(board.frozen(Color::Gold), 1 << 27);

        board.add_piece(Piece::new(Color::Gold, PieceKind::Rabbit), 19);
        assert!(!board.is_frozen(27));
        assert_eq!(board.frozen(Color::Gold), 0);
    }

    #[test]
    fn equal_strength_does_not_freeze() {
        let mut board = Board::empty();
        board.add_piece(Piece::new(Color::Gold, PieceKind::Horse), 27);
        board.add_piece(Piece::new(Color::Silver, PieceKind::Horse), 28);
        assert!(!board.is_frozen(27));
        assert!(!board.is_frozen(28));
    }

    #[test]
    fn trap_piece_falls_when_last_supporter_leaves() {
        let mut board = Board::empty();
        let cat = Piece::new(Color::Gold, PieceKind::Cat);
        let dog = Piece::new(Color::Gold, PieceKind::Dog);
        board.add_piece(cat, 18);
        board.add_piece(dog, 19);
        board.move_piece(dog, 19, 27);
        assert_eq!(board.unsupported_trap_piece(Color::Gold, 19, 27), Some((cat, 18)));
        assert_eq!(board.unsupported_trap_piece(Color::Silver, 19, 27), None);
        board.verify_caches().expect("move should keep caches in step");
    }
}
