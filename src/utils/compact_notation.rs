//! Compact one-line board notation: 64 squares from a8 to h1 inside
//! brackets, with spaces for empty squares.

use std::sync::Arc;

use crate::errors::{ArimaaError, ParseError};
use crate::game_state::arimaa_rules::STEPS_PER_TURN;
use crate::game_state::arimaa_types::{Board, Color, Piece, Position, Square};
use crate::game_state::zobrist::ZobristKeys;

/// Compact index `i` (0 = a8) to board square.
#[inline]
fn compact_square(index: usize) -> Square {
    let rank = 7 - index / 8;
    let file = index % 8;
    (rank * 8 + file) as Square
}

pub fn to_compact(board: &Board) -> String {
    let mut out = String::with_capacity(66);
    out.push('[');
    for index in 0..64 {
        let ch = board
            .piece_at(compact_square(index))
            .map_or(' ', Piece::letter);
        out.push(ch);
    }
    out.push(']');
    out
}

/// Build a position from compact board text. Side and steps left are not
/// part of the notation; a position with fewer than four steps left starts
/// without push or previous-step state.
pub fn parse_compact(
    side: Color,
    steps_left: u8,
    text: &str,
    keys: &Arc<ZobristKeys>,
) -> Result<Position, ArimaaError> {
    if !(1..=STEPS_PER_TURN).contains(&steps_left) {
        return Err(ParseError::BadStepsLeft(steps_left).into());
    }

    let squares: Vec<char> = text
        .trim()
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .ok_or_else(|| ParseError::BadCompactLength(text.trim().chars().count()))?
        .chars()
        .collect();
    if squares.len() != 64 {
        return Err(ParseError::BadCompactLength(squares.len()).into());
    }

    let mut board = Board::empty();
    for (index, &ch) in squares.iter().enumerate() {
        if ch == ' ' {
            continue;
        }
        let piece = Piece::from_letter(ch).ok_or(ParseError::BadPiece(ch))?;
        board.add_piece(piece, compact_square(index));
    }

    if steps_left == STEPS_PER_TURN {
        Ok(Position::new(side, board, Arc::clone(keys)))
    } else {
        Ok(Position::with_turn_state(
            side,
            steps_left,
            board,
            false,
            None,
            Arc::clone(keys),
        )?)
    }
}
