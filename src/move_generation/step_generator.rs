//! Step and action enumeration for a single position.
//!
//! `generate_steps` lists legal atomic steps, including the first half of a
//! push. `generate_actions` groups push and pull halves into one action so a
//! turn never stops between them; the turn assembler expands positions with
//! actions.

use crate::game_state::arimaa_types::{Piece, PieceKind, Position};
use crate::move_generation::step_apply::do_step_unchecked;
use crate::move_generation::step_checks::is_pull;
use crate::moves::step_descriptions::{Step, StepAction};
use crate::moves::step_masks::{neighbors, squares_of, step_targets};

#[derive(Debug, Clone)]
pub struct GeneratedStep {
    pub step: Step,
    pub position_after: Position,
}

#[derive(Debug, Clone)]
pub struct GeneratedAction {
    pub action: StepAction,
    pub position_after: Position,
}

/// Every legal atomic step from `position` with its resulting position.
pub fn generate_steps(position: &Position) -> Vec<GeneratedStep> {
    let mut steps = Vec::<Step>::with_capacity(64);

    if position.in_push() {
        generate_push_completions(position, &mut steps);
    } else {
        generate_continuing_pulls(position, &mut steps);
        generate_single_steps(position, &mut steps);
        if position.steps_left() > 1 {
            generate_push_starts(position, &mut steps);
        }
    }

    steps
        .into_iter()
        .filter_map(|step| {
            let piece = position.piece_at(step.from)?;
            Some(GeneratedStep {
                step,
                position_after: do_step_unchecked(position, piece, step),
            })
        })
        .collect()
}

/// Every legal action from `position`: single steps, plus complete push and
/// pull pairs when at least two steps are left.
pub fn generate_actions(position: &Position) -> Vec<GeneratedAction> {
    let mut singles = Vec::<Step>::with_capacity(64);
    if position.in_push() {
        generate_push_completions(position, &mut singles);
    } else {
        generate_continuing_pulls(position, &mut singles);
        generate_single_steps(position, &mut singles);
    }

    let mut actions = Vec::<GeneratedAction>::with_capacity(singles.len() * 2);
    for step in singles {
        if let Some(piece) = position.piece_at(step.from) {
            actions.push(GeneratedAction {
                action: StepAction::Single(step),
                position_after: do_step_unchecked(position, piece, step),
            });
        }
    }

    if !position.in_push() && position.steps_left() > 1 {
        generate_pairs(position, &mut actions);
    }

    actions
}

/// Steps of unfrozen own pieces to empty neighbors, rabbits never backward.
pub fn generate_single_steps(position: &Position, out: &mut Vec<Step>) {
    let board = position.board();
    let side = position.side_to_move();
    let movable = board.placement(side) & !board.frozen(side);

    for kind in PieceKind::ALL {
        let piece = Piece::new(side, kind);
        for from in squares_of(board.bits(piece) & movable) {
            for to in squares_of(step_targets(piece, from) & board.empty_squares()) {
                out.push(Step::new(from, to));
            }
        }
    }
}

/// Opponent pieces that may follow the previous own step into its origin.
pub fn generate_continuing_pulls(position: &Position, out: &mut Vec<Step>) {
    let Some(last) = position.last_step() else {
        return;
    };
    if last.piece.color != position.side_to_move() || last.piece.kind == PieceKind::Rabbit {
        return;
    }
    let board = position.board();
    if !board.is_empty_square(last.from) {
        return;
    }

    let victims =
        neighbors(last.from) & board.weaker_than(last.piece.color.opposite(), last.piece.kind);
    for from in squares_of(victims) {
        out.push(Step::new(from, last.from));
    }
}

/// First halves of pushes: an opponent piece with an unfrozen stronger own
/// neighbor moves to any empty neighbor. Steps that would count as a pull
/// are already listed by `generate_continuing_pulls`.
pub fn generate_push_starts(position: &Position, out: &mut Vec<Step>) {
    let board = position.board();
    let side = position.side_to_move();
    let enemy = side.opposite();
    let pushers = board.placement(side) & !board.frozen(side);

    for from in squares_of(board.placement(enemy)) {
        let Some(victim) = board.piece_at(from) else {
            continue;
        };
        if neighbors(from) & pushers & board.stronger_than(side, victim.kind) == 0 {
            continue;
        }
        for to in squares_of(neighbors(from) & board.empty_squares()) {
            if !is_pull(position, victim, to) {
                out.push(Step::new(from, to));
            }
        }
    }
}

/// Own pieces stronger than the pushed piece stepping into its origin.
pub fn generate_push_completions(position: &Position, out: &mut Vec<Step>) {
    let Some(pushed) = position.last_step() else {
        return;
    };
    let board = position.board();
    let side = position.side_to_move();
    let finishers = neighbors(pushed.from)
        & board.stronger_than(side, pushed.piece.kind)
        & !board.frozen(side);

    for from in squares_of(finishers) {
        out.push(Step::new(from, pushed.from));
    }
}

fn generate_pairs(position: &Position, out: &mut Vec<GeneratedAction>) {
    let mut starts = Vec::<Step>::with_capacity(32);
    generate_push_starts(position, &mut starts);
    let mut finishers = Vec::<Step>::with_capacity(4);

    for first in starts {
        let Some(victim) = position.piece_at(first.from) else {
            continue;
        };
        let mid = do_step_unchecked(position, victim, first);
        finishers.clear();
        generate_push_completions(&mid, &mut finishers);
        for &second in &finishers {
            let Some(pusher) = mid.piece_at(second.from) else {
                continue;
            };
            out.push(GeneratedAction {
                action: StepAction::Push {
                    victim: first,
                    pusher: second,
                },
                position_after: do_step_unchecked(&mid, pusher, second),
            });
        }
    }

    let board = position.board();
    let side = position.side_to_move();
    let pullers = board.placement(side) & !board.frozen(side) & !board.rabbits(side);

    for own_sq in squares_of(pullers) {
        let Some(own) = board.piece_at(own_sq) else {
            continue;
        };
        let victims = neighbors(own_sq) & board.weaker_than(side.opposite(), own.kind);
        if victims == 0 {
            continue;
        }

        for to in squares_of(neighbors(own_sq) & board.empty_squares()) {
            let first = Step::new(own_sq, to);
            let mid = do_step_unchecked(position, own, first);
            for victim_sq in squares_of(victims) {
                let Some(victim) = board.piece_at(victim_sq) else {
                    continue;
                };
                let second = Step::new(victim_sq, own_sq);
                out.push(GeneratedAction {
                    action: StepAction::Pull {
                        puller: first,
                        victim: second,
                    },
                    position_after: do_step_unchecked(&mid, victim, second),
                });
            }
        }
    }
}
