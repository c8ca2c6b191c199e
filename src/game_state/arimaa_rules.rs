//! Canonical Arimaa rule constants.
//!
//! Turn length, setup quotas, and the standard starting layout used to
//! initialize test and analysis positions.

use crate::game_state::arimaa_types::PieceKind;

/// Maximum number of steps a side may take in one turn.
pub const STEPS_PER_TURN: u8 = 4;

/// Pieces each side places during setup, indexed by `PieceKind::index()`.
pub const SETUP_QUOTA: [u8; 6] = [8, 2, 2, 2, 1, 1];

#[inline]
pub const fn setup_quota(kind: PieceKind) -> u8 {
    SETUP_QUOTA[kind.index()]
}

/// Standard opening layout, rank 8 to rank 1 and file a to h within a rank.
pub const STANDARD_LAYOUT: &str =
    "rrrrrrrrdhcemchd                                DHCMECHDRRRRRRRR";

/// Seed of the key table used when a caller does not supply one.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x4172_696D_6161_2021;
