use crate::errors::StepRejection;
use crate::game_state::arimaa_types::{Piece, PieceKind, Position, Square};
use crate::moves::step_descriptions::Step;
use crate::moves::step_masks::{neighbors, rabbit_backward_square, square_bit};

/// Decide whether `step` is legal in `position`.
///
/// Structural problems (squares, occupancy, adjacency) are reported before
/// any rule about the moving piece.
pub fn check_step(position: &Position, step: Step) -> Result<(), StepRejection> {
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
    if neighbors(from) & square_bit(to) == 0 {
        return Err(StepRejection::NotAdjacent { from, to });
    }

    if piece.color == position.side_to_move() {
        check_own_step(position, piece, from, to)
    } else {
        check_opponent_step(position, piece, from, to)
    }
}

#[inline]
pub fn is_legal_step(position: &Position, step: Step) -> bool {
    check_step(position, step).is_ok()
}

/// True when moving the opponent `piece` onto `to` completes a pull with the
/// previous own step.
pub fn is_pull(position: &Position, piece: Piece, to: Square) -> bool {
    if position.in_push() {
        return false;
    }
    match position.last_step() {
        Some(last) => {
            last.piece.color == position.side_to_move()
                && last.from == to
                && last.piece.is_stronger_than(piece)
        }
        None => false,
    }
}

/// True when an unfrozen piece of the side to move, strictly stronger than
/// the opponent piece on `square`, stands next to it.
pub fn has_pusher(position: &Position, square: Square) -> bool {
    let Some(victim) = position.piece_at(square) else {
        return false;
    };
    let board = position.board();
    let mut candidates =
        neighbors(square) & board.stronger_than(position.side_to_move(), victim.kind);
    while candidates != 0 {
        let sq = candidates.trailing_zeros() as Square;
        if !board.is_frozen(sq) {
            return true;
        }
        candidates &= candidates - 1;
    }
    false
}

fn check_own_step(
    position: &Position,
    piece: Piece,
    from: Square,
    to: Square,
) -> Result<(), StepRejection> {
    if position.is_frozen(from) {
        return Err(StepRejection::Frozen(from));
    }
    if piece.kind == PieceKind::Rabbit && rabbit_backward_square(piece.color, from) == Some(to) {
        return Err(StepRejection::RabbitBackward(from));
    }

    if position.in_push() {
        if let Some(pushed) = position.last_step() {
            if to != pushed.from {
                return Err(StepRejection::PushNotFinished(pushed.from));
            }
            if !piece.is_stronger_than(pushed.piece) {
                return Err(StepRejection::PushTooWeak(from));
            }
        }
    }
    Ok(())
}

fn check_opponent_step(
    position: &Position,
    piece: Piece,
    from: Square,
    to: Square,
) -> Result<(), StepRejection> {
    if position.in_push() {
        return Err(StepRejection::AlreadyInPush(from));
    }
    if is_pull(position, piece, to) {
        return Ok(());
    }
    if position.steps_left() < 2 {
        return Err(StepRejection::PushOnLastStep(from));
    }
    if !has_pusher(position, from) {
        return Err(StepRejection::NoPusher(from));
    }
    Ok(())
}
