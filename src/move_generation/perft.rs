use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::game_state::arimaa_types::Position;
use crate::move_generation::terminal::{elimination_winner, goal_winner};
use crate::move_generation::turn_generator::TurnGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    /// Distinct turns at the requested depth.
    pub turns: usize,
    /// Actions generated while assembling those turns.
    pub step_nodes: u64,
    pub goals: usize,
    pub eliminations: usize,
    /// Lines cut short because the game ended before the requested depth.
    pub terminated_early: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.turns += rhs.turns;
        self.step_nodes += rhs.step_nodes;
        self.goals += rhs.goals;
        self.eliminations += rhs.eliminations;
        self.terminated_early += rhs.terminated_early;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PerftError {
    #[error("perft worker thread panicked")]
    WorkerPanicked,
}

pub fn perft<G: TurnGenerator>(generator: &G, position: &Position, depth: u8) -> PerftCounts {
    perft_single_thread(generator, position, depth)
}

pub fn perft_single_thread<G: TurnGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.turns = 1;
        return total;
    }

    perft_recurse(generator, position, depth, &mut total);
    total
}

/// Split the root turns into chunks, one per available core.
pub fn perft_multi_threaded(
    generator: Arc<dyn TurnGenerator>,
    position: &Position,
    depth: u8,
) -> Result<PerftCounts, PerftError> {
    if depth <= 1 {
        let mut total = PerftCounts::default();
        if depth == 0 {
            total.turns = 1;
        } else {
            perft_recurse(generator.as_ref(), position, depth, &mut total);
        }
        return Ok(total);
    }

    let root = generator.generate_turns(position);
    let mut total = PerftCounts {
        step_nodes: root.nodes,
        ..PerftCounts::default()
    };

    let mut pending = Vec::with_capacity(root.turns.len());
    for (next, _) in root.turns {
        if is_decided(&next) {
            total.terminated_early += 1;
        } else {
            pending.push(next);
        }
    }
    if pending.is_empty() {
        return Ok(total);
    }

    let workers = thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(pending.len());
    let chunk_size = pending.len().div_ceil(workers);
    let generator = generator.as_ref();

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = pending
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    for next in chunk {
                        perft_recurse(generator, next, depth - 1, &mut local);
                    }
                    local
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    for local in results {
        total.merge(local.map_err(|_| PerftError::WorkerPanicked)?);
    }

    Ok(total)
}

fn is_decided(position: &Position) -> bool {
    goal_winner(position).is_some() || elimination_winner(position).is_some()
}

fn perft_recurse(
    generator: &dyn TurnGenerator,
    position: &Position,
    depth: u8,
    counts: &mut PerftCounts,
) {
    let generated = generator.generate_turns(position);
    counts.step_nodes += generated.nodes;

    for (next, _) in generated.turns {
        if depth == 1 {
            counts.turns += 1;
            if goal_winner(&next).is_some() {
                counts.goals += 1;
            } else if elimination_winner(&next).is_some() {
                counts.eliminations += 1;
            }
            continue;
        }

        if is_decided(&next) {
            counts.terminated_early += 1;
            continue;
        }
        perft_recurse(generator, &next, depth - 1, counts);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::game_state::arimaa_types::Color;
    use crate::move_generation::test_positions::{opening, position};
    use crate::move_generation::turn_generator::{GeneratedTurns, LegalTurnGenerator};

    struct MockTurnGenerator;

    impl TurnGenerator for MockTurnGenerator {
        fn generate_turns(&self, position: &Position) -> GeneratedTurns {
            let mut turns = HashMap::new();
            turns.insert(position.pass_turn(), Vec::new());
            let first_piece = position.board().occupied().trailing_zeros() as u8;
            if let Ok(smaller) = position.remove_piece(first_piece) {
                turns.insert(smaller.pass_turn(), Vec::new());
            }
            GeneratedTurns { turns, nodes: 5 }
        }
    }

    #[test]
    fn mock_generator_counts_leaves_and_nodes() {
        let counts = perft(&MockTurnGenerator, &opening(), 2);
        assert_eq!(counts.turns, 4);
        assert_eq!(counts.step_nodes, 15);
        assert_eq!(counts.goals, 0);
        assert_eq!(counts.terminated_early, 0);
    }

    #[test]
    fn depth_zero_is_one_leaf() {
        let counts = perft(&MockTurnGenerator, &opening(), 0);
        assert_eq!(counts.turns, 1);
        assert_eq!(counts.step_nodes, 0);
    }

    #[test]
    fn opening_depth_one_matches_turn_generation() {
        let counts = perft(&LegalTurnGenerator, &opening(), 1);
        assert_eq!(counts.turns, 3353);
        assert_eq!(counts.step_nodes, 16440);
    }

    #[test]
    fn multi_threaded_matches_single_thread() {
        let generator: Arc<dyn TurnGenerator> = Arc::new(MockTurnGenerator);
        let threaded = perft_multi_threaded(generator, &opening(), 3)
            .expect("mock workers should not panic");
        let single = perft(&MockTurnGenerator, &opening(), 3);
        assert_eq!(threaded, single);
        assert_eq!(single.turns, 8);
    }

    #[test]
    fn multi_threaded_legal_generator_matches_single_thread() {
        let ranks = [
            "........", ".......r", ".R......", "........", "...E....", "..x..x..", "..c.....",
            "........",
        ];
        let start = position(&ranks, Color::Gold);
        let generator: Arc<dyn TurnGenerator> = Arc::new(LegalTurnGenerator);
        let threaded = perft_multi_threaded(generator, &start, 2)
            .expect("legal workers should not panic");
        let single = perft(&LegalTurnGenerator, &start, 2);
        assert_eq!(threaded, single);
        assert!(single.turns > 0);
        assert!(single.terminated_early > 0, "the b6 rabbit can reach goal");
    }
}
