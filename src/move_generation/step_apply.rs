use crate::errors::StepRejection;
use crate::game_state::arimaa_types::{LastStep, Piece, Position, Square};
use crate::move_generation::step_checks::is_pull;
use crate::moves::step_descriptions::Step;

/// Apply one step without checking the movement rules.
///
/// Only structural errors are reported: squares off the board, an empty
/// source, or an occupied destination. Use `check_step` first when the step
/// comes from an untrusted source.
pub fn do_step(position: &Position, step: Step) -> Result<Position, StepRejection> {
    do_step_with_capture(position, step).map(|(next, _)| next)
}

/// Same as `do_step`, also reporting the piece removed from a trap, if any.
pub fn do_step_with_capture(
    position: &Position,
    step: Step,
) -> Result<(Position, Option<(Piece, Square)>), StepRejection> {
    let Step { from, to } = step;
    if from > 63 || to > 63 {
        return Err(StepRejection::OffBoard { from, to });
    }
    let piece = position
        .piece_at(from)
        .ok_or(StepRejection::EmptySource(from))?;
    if !position.board().is_empty_square(to) {
        return Err(StepRejection::OccupiedTarget(to));
    }

    Ok(apply_step(position, piece, step))
}

/// Apply a step already known to be legal.
pub(crate) fn do_step_unchecked(position: &Position, piece: Piece, step: Step) -> Position {
    apply_step(position, piece, step).0
}

fn apply_step(
    position: &Position,
    piece: Piece,
    step: Step,
) -> (Position, Option<(Piece, Square)>) {
    let Step { from, to } = step;
    let keys = position.keys();
    let mut next = position.clone();

    next.board.move_piece(piece, from, to);
    next.fingerprint ^= keys.piece_square_key(piece, from) ^ keys.piece_square_key(piece, to);

    let captured = next.board.unsupported_trap_piece(piece.color, from, to);
    if let Some((victim, trap)) = captured {
        next.board.remove_piece(victim, trap);
        next.fingerprint ^= keys.piece_square_key(victim, trap);
    }

    if piece.color == position.side_to_move() {
        if position.in_push() {
            next.in_push = false;
            next.last_step = None;
        } else {
            next.last_step = Some(LastStep { piece, from });
        }
    } else if !position.in_push() && is_pull(position, piece, to) {
        next.last_step = None;
    } else {
        next.in_push = true;
        next.last_step = Some(LastStep { piece, from });
    }

    next.steps_left = next.steps_left.saturating_sub(1);
    if next.steps_left == 0 {
        next.end_turn();
    }

    debug_assert!(
        next.verify_integrity().is_ok(),
        "step {from}->{to} broke position integrity"
    );
    (next, captured)
}
