//! Seeded random play.
//!
//! `random_step_turn` builds a turn by picking atomic steps one at a time,
//! which is far cheaper than enumerating every turn and is what the playouts
//! use. `random_turn` picks uniformly among all distinct turns instead.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::trace;

use crate::game_state::arimaa_types::Position;
use crate::move_generation::step_generator::generate_steps;
use crate::move_generation::terminal::{
    elimination_winner, goal_winner, TerminalKind, Termination,
};
use crate::move_generation::turn_generator::generate_turns_with_nodes;
use crate::moves::step_descriptions::Step;

/// Random step walks that dead-end before falling back to full generation.
const MAX_STEP_WALKS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayoutOutcome {
    /// `None` when the turn limit was reached first.
    pub termination: Option<Termination>,
    pub turns_played: u32,
    pub final_position: Position,
}

/// A turn made of random legal steps, ending early at random once the board
/// differs from the start. `None` when the side to move is immobilized.
pub fn random_step_turn<R: Rng + ?Sized>(
    position: &Position,
    rng: &mut R,
) -> Option<(Vec<Step>, Position)> {
    if generate_steps(position).is_empty() {
        return None;
    }

    for _ in 0..MAX_STEP_WALKS {
        if let Some(turn) = random_step_walk(position, rng) {
            return Some(turn);
        }
    }

    trace!("random step walks dead-ended, choosing among all turns");
    random_turn(position, rng)
}

fn random_step_walk<R: Rng + ?Sized>(
    start: &Position,
    rng: &mut R,
) -> Option<(Vec<Step>, Position)> {
    let side = start.side_to_move();
    let mut current = start.clone();
    let mut taken = Vec::<Step>::new();

    while current.side_to_move() == side {
        let mut options = generate_steps(&current);
        let can_stop = !current.in_push() && current.board() != start.board();
        let choices = options.len() + usize::from(can_stop);
        if choices == 0 {
            return None;
        }

        let pick = rng.random_range(0..choices);
        if pick == options.len() {
            return Some((taken, current.pass_turn()));
        }

        let chosen = options.swap_remove(pick);
        taken.push(chosen.step);
        current = chosen.position_after;
    }

    // A turn that ran out of steps must still have changed the board.
    if current.board() == start.board() {
        return None;
    }
    Some((taken, current))
}

/// Uniform choice among every distinct turn. Turns are ordered by witness
/// before choosing so a seeded generator gives the same turn on every run.
pub fn random_turn<R: Rng + ?Sized>(
    position: &Position,
    rng: &mut R,
) -> Option<(Vec<Step>, Position)> {
    let generated = generate_turns_with_nodes(position);
    let ordered = generated.sorted();
    ordered
        .choose(rng)
        .map(|(next, steps)| ((*steps).clone(), (*next).clone()))
}

/// Play random step turns until the game ends or `max_turns` turns have been
/// played.
pub fn random_step_game<R: Rng + ?Sized>(
    position: &Position,
    rng: &mut R,
    max_turns: u32,
) -> PlayoutOutcome {
    let mut current = position.clone();
    let mut turns_played = 0u32;

    loop {
        if let Some(termination) = decided(&current) {
            return PlayoutOutcome {
                termination: Some(termination),
                turns_played,
                final_position: current,
            };
        }
        if turns_played >= max_turns {
            return PlayoutOutcome {
                termination: None,
                turns_played,
                final_position: current,
            };
        }

        match random_step_turn(&current, rng) {
            Some((_, next)) => {
                current = next;
                turns_played += 1;
            }
            None => {
                let winner = current.side_to_move().opposite();
                return PlayoutOutcome {
                    termination: Some(Termination {
                        kind: TerminalKind::Immobilization,
                        winner,
                    }),
                    turns_played,
                    final_position: current,
                };
            }
        }
    }
}

fn decided(position: &Position) -> Option<Termination> {
    if let Some(winner) = goal_winner(position) {
        return Some(Termination {
            kind: TerminalKind::Goal,
            winner,
        });
    }
    elimination_winner(position).map(|winner| Termination {
        kind: TerminalKind::Elimination,
        winner,
    })
}
