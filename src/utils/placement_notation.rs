//! Board contents as a pair of setup moves (`g Ra1 Rb1 ...`, `s ra8 ...`).

use crate::game_state::arimaa_types::{Board, Color, Piece, PieceKind};
use crate::moves::step_masks::squares_of;
use crate::utils::algebraic::square_to_algebraic;

/// Setup-move text for one side, pieces ordered by kind then square.
/// `legacy_tags` writes the `w`/`b` side prefixes instead of `g`/`s`.
pub fn side_placement(board: &Board, color: Color, legacy_tags: bool) -> String {
    let tag = match (color, legacy_tags) {
        (Color::Gold, false) => "g",
        (Color::Silver, false) => "s",
        (Color::Gold, true) => "w",
        (Color::Silver, true) => "b",
    };

    let mut tokens = vec![tag.to_owned()];
    for kind in PieceKind::ALL {
        let piece = Piece::new(color, kind);
        for square in squares_of(board.bits(piece)) {
            if let Some(name) = square_to_algebraic(square) {
                tokens.push(format!("{}{name}", piece.letter()));
            }
        }
    }
    tokens.join(" ")
}

/// Gold and silver setup moves reproducing `board`.
pub fn to_placement(board: &Board, legacy_tags: bool) -> (String, String) {
    (
        side_placement(board, Color::Gold, legacy_tags),
        side_placement(board, Color::Silver, legacy_tags),
    )
}
