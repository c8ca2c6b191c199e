//! Whole-turn application for moves coming from outside the generator.
//!
//! `apply_move` replays a step list and always completes the turn, passing
//! control to the opponent. `Strict` checking validates every step and the
//! turn as a whole; `Permissive` only reports structural errors so recorded
//! games with irregular steps can still be loaded. Setup moves go through
//! `apply_setup` instead.

use tracing::debug;

use crate::errors::{ArimaaError, IllegalMove};
use crate::game_state::arimaa_rules::setup_quota;
use crate::game_state::arimaa_types::{Piece, PieceKind, Position, Square};
use crate::move_generation::step_apply::do_step;
use crate::move_generation::step_checks::check_step;
use crate::moves::step_descriptions::Step;
use crate::moves::step_masks::{home_ranks, square_bit};
use crate::utils::step_notation::{parse_move_tokens, MoveToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveChecks {
    #[default]
    Strict,
    Permissive,
}

impl MoveChecks {
    #[inline]
    pub fn is_strict(self) -> bool {
        self == MoveChecks::Strict
    }
}

/// Apply the steps of one turn and hand the move to the opponent.
pub fn apply_move(
    position: &Position,
    steps: &[Step],
    checks: MoveChecks,
) -> Result<Position, IllegalMove> {
    apply_steps(position, steps, None, checks).inspect_err(|err| {
        debug!(%err, steps = steps.len(), "rejected move");
    })
}

/// Place a side's pieces and hand the move to the opponent.
pub fn apply_setup(
    position: &Position,
    placements: &[(Piece, Square)],
    checks: MoveChecks,
) -> Result<Position, IllegalMove> {
    place_setup(position, placements, checks).inspect_err(|err| {
        debug!(%err, pieces = placements.len(), "rejected setup");
    })
}

/// Parse a move in token notation (`Ee2n Md2n` or `Ra1 Rb1 ...`) and apply it.
pub fn apply_move_str(
    position: &Position,
    text: &str,
    checks: MoveChecks,
) -> Result<Position, ArimaaError> {
    let tokens = parse_move_tokens(text)?;

    let placements: Vec<(Piece, Square)> = tokens
        .iter()
        .filter_map(|token| match *token {
            MoveToken::Placement { piece, square } => Some((piece, square)),
            _ => None,
        })
        .collect();
    let moves: Vec<(Piece, Step)> = tokens
        .iter()
        .filter_map(|token| match *token {
            MoveToken::Step { piece, step } => Some((piece, step)),
            _ => None,
        })
        .collect();

    if !placements.is_empty() && !moves.is_empty() {
        debug!(text, "rejected move mixing setup and steps");
        return Err(IllegalMove::MixedSetupAndSteps.into());
    }
    if !placements.is_empty() {
        return Ok(apply_setup(position, &placements, checks)?);
    }

    let steps: Vec<Step> = moves.iter().map(|(_, step)| *step).collect();
    let pieces: Vec<Piece> = moves.iter().map(|(piece, _)| *piece).collect();
    apply_steps(position, &steps, Some(&pieces), checks)
        .inspect_err(|err| debug!(%err, text, "rejected move"))
        .map_err(ArimaaError::from)
}

fn apply_steps(
    position: &Position,
    steps: &[Step],
    named_pieces: Option<&[Piece]>,
    checks: MoveChecks,
) -> Result<Position, IllegalMove> {
    if steps.len() > position.steps_left() as usize {
        return Err(IllegalMove::TooManySteps {
            given: steps.len(),
            left: position.steps_left(),
        });
    }

    let side = position.side_to_move();
    let mut current = position.clone();
    for (index, &step) in steps.iter().enumerate() {
        if checks.is_strict() {
            if let (Some(named), Some(found)) = (
                named_pieces.and_then(|pieces| pieces.get(index)),
                current.piece_at(step.from),
            ) {
                // Case is ignored: recorded games letter pushed pieces either way.
                if named.kind != found.kind {
                    return Err(IllegalMove::PieceMismatch {
                        square: step.from,
                        expected: named.letter(),
                        found: found.letter(),
                    });
                }
            }
            check_step(&current, step)
                .map_err(|rejection| IllegalMove::Step { index, rejection })?;
        }
        current =
            do_step(&current, step).map_err(|rejection| IllegalMove::Step { index, rejection })?;
    }

    if current.side_to_move() == side {
        if checks.is_strict() && current.in_push() {
            return Err(IllegalMove::UnfinishedPush);
        }
        current = current.pass_turn();
    }

    if checks.is_strict() && current.board() == position.board() {
        return Err(IllegalMove::UnchangedBoard);
    }
    Ok(current)
}

fn place_setup(
    position: &Position,
    placements: &[(Piece, Square)],
    checks: MoveChecks,
) -> Result<Position, IllegalMove> {
    let side = position.side_to_move();
    if checks.is_strict() && position.board().placement(side) != 0 {
        return Err(IllegalMove::SetupAlreadyPlaced(side));
    }

    let mut claimed = 0u64;
    let mut counts = [0u8; 6];
    let mut current = position.clone();
    for &(piece, square) in placements {
        if square > 63 {
            return Err(IllegalMove::SetupOutsideHome(square));
        }
        let bit = square_bit(square);
        if claimed & bit != 0 {
            return Err(IllegalMove::SetupDoubled(square));
        }
        claimed |= bit;

        if checks.is_strict() {
            if piece.color != side {
                return Err(IllegalMove::SetupWrongColor(square));
            }
            if home_ranks(side) & bit == 0 {
                return Err(IllegalMove::SetupOutsideHome(square));
            }
        }
        counts[piece.kind.index()] += 1;
        current = current.place_piece(piece, square)?;
    }

    if checks.is_strict() {
        for kind in PieceKind::ALL {
            let placed = counts[kind.index()];
            let expected = setup_quota(kind);
            if placed != expected {
                return Err(IllegalMove::SetupQuota {
                    piece: Piece::new(side, kind).letter(),
                    placed,
                    expected,
                });
            }
        }
    }

    Ok(current.pass_turn())
}
