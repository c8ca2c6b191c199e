//! Game-end detection: goal, elimination, and immobilization, checked in
//! that order.

use crate::game_state::arimaa_rules::STEPS_PER_TURN;
use crate::game_state::arimaa_types::{Color, Position};
use crate::move_generation::step_generator::generate_steps;
use crate::move_generation::turn_generator::generate_turns;
use crate::moves::step_masks::goal_rank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    Goal,
    Elimination,
    Immobilization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Termination {
    pub kind: TerminalKind,
    pub winner: Color,
}

impl Termination {
    /// `1` if `side` won, `-1` if it lost.
    #[inline]
    pub fn value_for(&self, side: Color) -> i32 {
        if self.winner == side {
            1
        } else {
            -1
        }
    }
}

/// Winner by goal. When both sides have a rabbit on their goal rank the side
/// that just moved wins.
pub fn goal_winner(position: &Position) -> Option<Color> {
    let board = position.board();
    let reached = |color: Color| board.rabbits(color) & goal_rank(color) != 0;

    match (reached(Color::Gold), reached(Color::Silver)) {
        (true, true) => Some(position.side_to_move().opposite()),
        (true, false) => Some(Color::Gold),
        (false, true) => Some(Color::Silver),
        (false, false) => None,
    }
}

/// Winner by elimination. A side without rabbits loses; when both have none
/// the side that just moved wins.
pub fn elimination_winner(position: &Position) -> Option<Color> {
    let board = position.board();
    let gold_out = board.rabbits(Color::Gold) == 0;
    let silver_out = board.rabbits(Color::Silver) == 0;

    match (gold_out, silver_out) {
        (true, true) => Some(position.side_to_move().opposite()),
        (true, false) => Some(Color::Silver),
        (false, true) => Some(Color::Gold),
        (false, false) => None,
    }
}

/// True when the side to move has no legal turn.
pub fn is_immobilized(position: &Position) -> bool {
    let steps = generate_steps(position);
    if steps.is_empty() {
        return true;
    }
    if position.steps_left() == STEPS_PER_TURN && !position.in_push() {
        // On a fresh turn any generated step starts a board-changing turn.
        return false;
    }
    generate_turns(position).is_empty()
}

pub fn terminal_state(position: &Position) -> Option<Termination> {
    if let Some(winner) = goal_winner(position) {
        return Some(Termination {
            kind: TerminalKind::Goal,
            winner,
        });
    }
    if let Some(winner) = elimination_winner(position) {
        return Some(Termination {
            kind: TerminalKind::Elimination,
            winner,
        });
    }
    if is_immobilized(position) {
        return Some(Termination {
            kind: TerminalKind::Immobilization,
            winner: position.side_to_move().opposite(),
        });
    }
    None
}
