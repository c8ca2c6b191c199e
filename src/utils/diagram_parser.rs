//! Long diagram parser.
//!
//! Accepts the output of `diagram_generator` as well as hand-written boards
//! with leading commentary. Lines following the board that carry moves
//! (`12g Ee2n Ee3n ...`) are replayed under strict checks until a blank line
//! or a `#` comment.

use std::sync::Arc;

use crate::errors::{ArimaaError, ParseError};
use crate::game_state::arimaa_rules::STEPS_PER_TURN;
use crate::game_state::arimaa_types::{Board, Color, LastStep, Piece, Position, Square};
use crate::game_state::zobrist::ZobristKeys;
use crate::move_generation::turn_apply::{apply_move_str, MoveChecks};
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::compact_notation::parse_compact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    move_number: u32,
    side: Color,
    steps_left: u8,
    last_step: Option<LastStep>,
    in_push: bool,
}

/// Parse a diagram into its move number and position.
pub fn parse_diagram(
    text: &str,
    keys: &Arc<ZobristKeys>,
) -> Result<(u32, Position), ArimaaError> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let start = lines
        .iter()
        .position(|line| line.starts_with(|ch: char| ch.is_ascii_digit()))
        .ok_or(ParseError::UnexpectedEnd)?;

    let header = parse_header(lines[start])?;

    let border = lines.get(start + 1).ok_or(ParseError::UnexpectedEnd)?;
    if !border.starts_with('+') {
        return Err(ParseError::MissingBorder { line: start + 2 }.into());
    }

    let mut board = Board::empty();
    for (offset, expected_rank) in (1..=8u8).rev().enumerate() {
        let line = lines
            .get(start + 2 + offset)
            .ok_or(ParseError::UnexpectedEnd)?;
        parse_rank_line(line, expected_rank, &mut board)?;
    }

    let mut position = if header.steps_left == STEPS_PER_TURN
        && header.last_step.is_none()
        && !header.in_push
    {
        Position::new(header.side, board, Arc::clone(keys))
    } else {
        Position::with_turn_state(
            header.side,
            header.steps_left,
            board,
            header.in_push,
            header.last_step,
            Arc::clone(keys),
        )?
    };

    // Bottom border and file labels, then optional move lines.
    let mut move_number = header.move_number;
    for line in lines.iter().skip(start + 12) {
        if line.is_empty() || line.starts_with('#') {
            break;
        }
        let move_text = match line.split_once(char::is_whitespace) {
            Some((_, rest)) if !rest.trim().is_empty() => rest.trim(),
            _ => break,
        };
        let mover = position.side_to_move();
        position = apply_move_str(&position, move_text, MoveChecks::Strict).map_err(|err| {
            ArimaaError::EmbeddedMove {
                move_number,
                side: mover.letter(),
                source: Box::new(err),
            }
        })?;
        if position.side_to_move() == Color::Gold {
            move_number += 1;
        }
    }

    Ok((move_number, position))
}

/// Parse a position file: either a full diagram, or a `<number><side>` line
/// followed by a compact board line.
pub fn parse_position_file(
    text: &str,
    keys: &Arc<ZobristKeys>,
) -> Result<(u32, Position), ArimaaError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    if let (Some(first), Some(second)) = (lines.next(), lines.next()) {
        if second.starts_with('[') {
            let header = parse_header(first)?;
            if header.steps_left != STEPS_PER_TURN || header.last_step.is_some() || header.in_push
            {
                return Err(ParseError::PartialTurn(first.to_owned()).into());
            }
            let position = parse_compact(header.side, STEPS_PER_TURN, second, keys)?;
            return Ok((header.move_number, position));
        }
    }
    parse_diagram(text, keys)
}

fn parse_header(line: &str) -> Result<Header, ParseError> {
    let digits_end = line
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(line.len());
    let (digits, rest) = line.split_at(digits_end);
    let move_number = digits
        .parse::<u32>()
        .map_err(|_| ParseError::BadMoveNumber(line.to_owned()))?;

    let mut rest_chars = rest.chars();
    let side_char = rest_chars
        .next()
        .ok_or_else(|| ParseError::BadSide(line.to_owned()))?;
    let side = Color::from_letter(side_char).ok_or_else(|| ParseError::BadSide(line.to_owned()))?;

    let mut header = Header {
        move_number,
        side,
        steps_left: STEPS_PER_TURN,
        last_step: None,
        in_push: false,
    };

    let annotations = rest_chars.as_str().trim();
    for token in annotations.split_whitespace() {
        if token == "push" {
            header.in_push = true;
        } else if let Some(value) = token.strip_prefix("steps=") {
            header.steps_left = value
                .parse::<u8>()
                .ok()
                .filter(|steps| (1..=STEPS_PER_TURN).contains(steps))
                .ok_or_else(|| ParseError::BadAnnotation(token.to_owned()))?;
        } else if let Some(value) = token.strip_prefix("last=") {
            header.last_step = Some(parse_last_step(value, token)?);
        } else {
            return Err(ParseError::PartialTurn(annotations.to_owned()));
        }
    }

    Ok(header)
}

fn parse_last_step(value: &str, token: &str) -> Result<LastStep, ParseError> {
    let mut chars = value.chars();
    let piece = chars
        .next()
        .and_then(Piece::from_letter)
        .ok_or_else(|| ParseError::BadAnnotation(token.to_owned()))?;
    let from = algebraic_to_square(chars.as_str())
        .map_err(|_| ParseError::BadAnnotation(token.to_owned()))?;
    Ok(LastStep { piece, from })
}

fn parse_rank_line(line: &str, expected_rank: u8, board: &mut Board) -> Result<(), ParseError> {
    let bad_line = || ParseError::BadRankLine {
        expected: expected_rank,
        found: line.to_owned(),
    };

    let chars: Vec<char> = line.chars().collect();
    let rank_digit = chars.first().and_then(|ch| ch.to_digit(10)).ok_or_else(bad_line)?;
    if rank_digit != u32::from(expected_rank) {
        return Err(bad_line());
    }

    for file in 0..8u8 {
        let column = 3 + 2 * file as usize;
        let ch = *chars.get(column).ok_or_else(bad_line)?;
        if matches!(ch, ' ' | 'x' | 'X' | '.') {
            continue;
        }
        let piece = Piece::from_letter(ch).ok_or(ParseError::BadPiece(ch))?;
        let square: Square = (expected_rank - 1) * 8 + file;
        board.add_piece(piece, square);
    }
    Ok(())
}
