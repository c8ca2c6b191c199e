//! Orthogonal neighbor bitboards and fixed board regions.
//!
//! Step generation and freeze/trap checks only ever look one square away in
//! the four orthogonal directions, so a precomputed neighbor table plus a
//! bulk shift helper covers every lookup.

use crate::game_state::arimaa_types::{Color, Piece, PieceKind, Square};

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = 0x8080_8080_8080_8080;
pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
pub const RANK_2: u64 = 0x0000_0000_0000_FF00;
pub const RANK_7: u64 = 0x00FF_0000_0000_0000;
pub const RANK_8: u64 = 0xFF00_0000_0000_0000;

/// c3, f3, c6 and f6.
pub const TRAPS: u64 = 0x0000_2400_0024_0000;
pub const TRAP_SQUARES: [Square; 4] = [18, 21, 42, 45];

pub const NEIGHBORS: [u64; 64] = generate_neighbors();

#[inline]
pub const fn square_bit(square: Square) -> u64 {
    1u64 << square
}

#[inline]
pub const fn neighbors(square: Square) -> u64 {
    NEIGHBORS[square as usize]
}

/// Union of the orthogonal neighbors of every set bit.
#[inline]
pub const fn neighbors_of(bits: u64) -> u64 {
    ((bits & !FILE_A) >> 1) | ((bits & !FILE_H) << 1) | (bits << 8) | (bits >> 8)
}

#[inline]
pub const fn is_trap(square: Square) -> bool {
    TRAPS & square_bit(square) != 0
}

/// Square a rabbit of `color` may never step onto from `square`.
#[inline]
pub const fn rabbit_backward_square(color: Color, square: Square) -> Option<Square> {
    match color {
        Color::Gold if square >= 8 => Some(square - 8),
        Color::Silver if square < 56 => Some(square + 8),
        _ => None,
    }
}

/// Destination mask for a piece on `square`, before occupancy is applied.
#[inline]
pub fn step_targets(piece: Piece, square: Square) -> u64 {
    let mut targets = neighbors(square);
    if piece.kind == PieceKind::Rabbit {
        if let Some(back) = rabbit_backward_square(piece.color, square) {
            targets &= !square_bit(back);
        }
    }
    targets
}

/// The two ranks a side may place its pieces on during setup.
#[inline]
pub const fn home_ranks(color: Color) -> u64 {
    match color {
        Color::Gold => RANK_1 | RANK_2,
        Color::Silver => RANK_7 | RANK_8,
    }
}

/// The rank a rabbit of `color` must reach to win by goal.
#[inline]
pub const fn goal_rank(color: Color) -> u64 {
    match color {
        Color::Gold => RANK_8,
        Color::Silver => RANK_1,
    }
}

/// Iterate the set bits of a bitboard as square indices, lowest first.
#[inline]
pub fn squares_of(mut bits: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bits == 0 {
            return None;
        }
        let square = bits.trailing_zeros() as Square;
        bits &= bits - 1;
        Some(square)
    })
}

const fn generate_neighbors() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut bits = 0u64;

        bits |= set_if_valid(file, rank + 1);
        bits |= set_if_valid(file, rank - 1);
        bits |= set_if_valid(file + 1, rank);
        bits |= set_if_valid(file - 1, rank);

        table[sq] = bits;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_center_neighbor_counts() {
        assert_eq!(neighbors(0).count_ones(), 2);
        assert_eq!(neighbors(63).count_ones(), 2);
        assert_eq!(neighbors(27).count_ones(), 4);
        assert_eq!(neighbors(7), square_bit(6) | square_bit(15));
    }

    #[test]
    fn bulk_shift_matches_table() {
        for sq in 0..64u8 {
            assert_eq!(neighbors_of(square_bit(sq)), neighbors(sq), "square {sq}");
        }
    }

    #[test]
    fn trap_constants_agree() {
        let from_list = TRAP_SQUARES.iter().fold(0u64, |acc, sq| acc | square_bit(*sq));
        assert_eq!(from_list, TRAPS);
        assert!(is_trap(18));
        assert!(!is_trap(19));
    }

    #[test]
    fn rabbits_never_step_home() {
        let gold = Piece::new(Color::Gold, PieceKind::Rabbit);
        let silver = Piece::new(Color::Silver, PieceKind::Rabbit);
        assert_eq!(step_targets(gold, 27) & square_bit(19), 0);
        assert_ne!(step_targets(gold, 27) & square_bit(35), 0);
        assert_eq!(step_targets(silver, 27) & square_bit(35), 0);
        assert_eq!(step_targets(gold, 3), square_bit(2) | square_bit(4) | square_bit(11));
    }

    #[test]
    fn squares_iterate_low_to_high() {
        let squares: Vec<_> = squares_of(TRAPS).collect();
        assert_eq!(squares, TRAP_SQUARES.to_vec());
    }
}
