//! Board fixtures shared by the rule and generator unit tests.

use std::sync::{Arc, OnceLock};

use crate::game_state::arimaa_types::{Board, Color, Piece, Position, Square};
use crate::game_state::zobrist::ZobristKeys;

pub const CHECK_STEP: [&str; 8] = [
    "rrrrrr.r", "dhce.h.d", ".Cx..c..", "....mCr.", "....ED..", "..x..x.R", "DH.M..H.",
    "RRRRRRR.",
];

pub const CHECK_TRAP_STEP: [&str; 8] = [
    "rrrrrc.r", "dhce.hMd", "..x..x..", "..C.mCr.", "....ED..", ".Hx..x.R", "D.....H.",
    "RRRRRRR.",
];

pub const GOLD_GOAL: [&str; 8] = [
    "rRrr.rrr", "..d.....", ".Dxc.x..", "....Rm..", "........", "..x..x..", ".....d..",
    "R.RRRR..",
];

pub const SILVER_GOAL: [&str; 8] = [
    "r.rr.rrr", "..d.....", ".Dxc.x..", "....Rm..", "........", "..x..x..", ".....d..",
    "R.RRRRr.",
];

pub const DOUBLE_GOAL: [&str; 8] = [
    "rRrr.rrr", "..d.....", ".Dxc.x..", "....Rm..", "........", "..x..x..", ".....d..",
    "R.RRRRr.",
];

pub const GOLD_RABBIT_LOSS: [&str; 8] = [
    "r.rr.rrr", "..d.....", ".Dxc.x..", ".....m..", "........", "..x..x..", ".....d..",
    "........",
];

pub const SILVER_RABBIT_LOSS: [&str; 8] = [
    "........", "..d.....", ".Dxc.x..", "....Rm..", "........", "..x..x..", ".....d..",
    "R.RRRR..",
];

pub const DOUBLE_RABBIT_LOSS: [&str; 8] = [
    "........", "..d.....", ".Dxc.x..", ".....m..", "........", "..x..x..", ".....d..",
    "........",
];

pub const DOUBLE_IMMOBILIZATION: [&str; 8] = [
    "rEmH....", "RdH.....", ".Cx..x..", "........", "........", "..x..xc.", ".....hDr",
    "....hMeR",
];

pub const INDUCE_NULL_MOVE: [&str; 8] = [
    "rrrr.rrr", "..hreh..", ".dcC.d..", "...cRm..", "........", "..x..x..", "........",
    "........",
];

/// One key table for every fixture so positions built in different tests
/// compare equal.
pub fn keys() -> Arc<ZobristKeys> {
    static KEYS: OnceLock<Arc<ZobristKeys>> = OnceLock::new();
    KEYS.get_or_init(|| Arc::new(ZobristKeys::standard())).clone()
}

/// Build a board from eight rank strings, rank 8 first.
pub fn board_from_ranks(ranks: &[&str; 8]) -> Board {
    let mut board = Board::empty();
    for (row, line) in ranks.iter().enumerate() {
        for (file, ch) in line.chars().enumerate() {
            if let Some(piece) = Piece::from_letter(ch) {
                board.add_piece(piece, ((7 - row) * 8 + file) as Square);
            }
        }
    }
    board
}

pub fn position(ranks: &[&str; 8], side: Color) -> Position {
    Position::new(side, board_from_ranks(ranks), keys())
}

pub fn opening() -> Position {
    Position::standard_opening(keys())
}

pub fn check_step_position() -> Position {
    position(&CHECK_STEP, Color::Gold)
}

pub fn check_trap_position() -> Position {
    position(&CHECK_TRAP_STEP, Color::Gold)
}
