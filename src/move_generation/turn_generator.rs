//! Full-turn enumeration.
//!
//! Expands a position breadth-first by actions until the side to move
//! changes, merging intermediate positions reached by different step orders.
//! Each distinct final position is reported once with the first step
//! sequence found for it.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::game_state::arimaa_types::Position;
use crate::move_generation::step_generator::generate_actions;
use crate::moves::step_descriptions::Step;

#[derive(Debug, Clone, Default)]
pub struct GeneratedTurns {
    /// Final position (opponent to move) -> witness step sequence.
    pub turns: HashMap<Position, Vec<Step>>,
    /// Actions generated over every expanded intermediate position.
    pub nodes: u64,
}

impl GeneratedTurns {
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns ordered by witness sequence, for reproducible iteration.
    pub fn sorted(&self) -> Vec<(&Position, &Vec<Step>)> {
        let mut ordered: Vec<_> = self.turns.iter().collect();
        ordered.sort_by(|a, b| a.1.cmp(b.1));
        ordered
    }
}

pub trait TurnGenerator: Send + Sync {
    fn generate_turns(&self, position: &Position) -> GeneratedTurns;
}

/// Turn generator following the full rules.
pub struct LegalTurnGenerator;

impl TurnGenerator for LegalTurnGenerator {
    fn generate_turns(&self, position: &Position) -> GeneratedTurns {
        generate_turns_with_nodes(position)
    }
}

/// Every distinct legal turn from `position`, keyed by final position.
pub fn generate_turns(position: &Position) -> HashMap<Position, Vec<Step>> {
    generate_turns_with_nodes(position).turns
}

pub fn generate_turns_with_nodes(start: &Position) -> GeneratedTurns {
    let side = start.side_to_move();
    let mut finished = HashMap::<Position, Vec<Step>>::new();
    let mut nodes = 0u64;

    // One layer per action taken; positions are merged within a layer.
    let mut frontier = vec![(start.clone(), Vec::<Step>::new())];
    while !frontier.is_empty() {
        let mut next_layer = Vec::<(Position, Vec<Step>)>::new();
        let mut layer_seen = HashSet::<Position>::new();

        for (position, witness) in frontier {
            let actions = generate_actions(&position);
            nodes += actions.len() as u64;

            for generated in actions {
                let next = generated.position_after;
                let extend = || {
                    let mut sequence = witness.clone();
                    sequence.extend(generated.action.steps());
                    sequence
                };

                if next.side_to_move() != side {
                    finished.entry(next).or_insert_with(extend);
                } else if !layer_seen.contains(&next) {
                    layer_seen.insert(next.clone());
                    next_layer.push((next, extend()));
                }
            }

            if !position.in_push() {
                finished.entry(position.pass_turn()).or_insert(witness);
            }
        }

        frontier = next_layer;
    }

    finished.remove(&start.pass_turn());
    trace!(turns = finished.len(), nodes, "generated turns");

    GeneratedTurns {
        turns: finished,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_turns, generate_turns_with_nodes, LegalTurnGenerator, TurnGenerator};
    use crate::game_state::arimaa_types::{Board, Color, Position};
    use crate::move_generation::test_positions::{
        check_trap_position, keys, opening, position, CHECK_TRAP_STEP, DOUBLE_IMMOBILIZATION,
    };
    use crate::move_generation::turn_apply::{apply_move, MoveChecks};

    #[test]
    fn opening_turn_and_node_counts() {
        let generated = generate_turns_with_nodes(&opening());
        assert_eq!(generated.len(), 3353);
        assert_eq!(generated.nodes, 16440);
    }

    #[test]
    fn trap_position_turn_count() {
        let generated = LegalTurnGenerator.generate_turns(&check_trap_position());
        assert_eq!(generated.len(), 46370);
    }

    #[test]
    fn silver_and_short_turn_counts() {
        let silver = position(&CHECK_TRAP_STEP, Color::Silver);
        assert_eq!(generate_turns(&silver).len(), 3251);

        let board = *check_trap_position().board();
        let short = Position::with_turn_state(Color::Gold, 2, board, false, None, keys())
            .expect("two-step position should be valid");
        assert_eq!(generate_turns(&short).len(), 457);
    }

    #[test]
    fn every_turn_changes_the_board_and_replays() {
        let start = opening();
        let turns = generate_turns(&start);
        for (final_position, steps) in turns.iter().take(500) {
            assert_ne!(final_position.board(), start.board());
            assert_eq!(final_position.side_to_move(), Color::Silver);
            let replayed = apply_move(&start, steps, MoveChecks::Strict)
                .expect("witness sequence should replay strictly");
            assert_eq!(&replayed, final_position);
        }
    }

    #[test]
    fn immobilized_side_has_no_turns() {
        let pos = position(&DOUBLE_IMMOBILIZATION, Color::Gold);
        let generated = generate_turns_with_nodes(&pos);
        assert!(generated.is_empty());
        assert_eq!(generated.nodes, 0);
    }

    #[test]
    fn empty_board_has_no_turns() {
        let pos = Position::new(Color::Gold, Board::empty(), keys());
        assert!(generate_turns(&pos).is_empty());
    }
}
