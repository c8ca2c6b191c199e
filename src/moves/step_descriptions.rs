use crate::game_state::arimaa_types::Square;

/// One atomic relocation of a piece from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step {
    pub from: Square,
    pub to: Square,
}

impl Step {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Orthogonal direction of this step, or `None` when the squares are not
    /// neighbors.
    #[inline]
    pub fn direction(self) -> Option<Direction> {
        Direction::between(self.from, self.to)
    }
}

impl From<(Square, Square)> for Step {
    fn from((from, to): (Square, Square)) -> Self {
        Step::new(from, to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        match ch {
            'n' => Some(Direction::North),
            's' => Some(Direction::South),
            'e' => Some(Direction::East),
            'w' => Some(Direction::West),
            _ => None,
        }
    }

    /// Destination of a step in this direction, if it stays on the board.
    #[inline]
    pub fn apply(self, square: Square) -> Option<Square> {
        if square >= 64 {
            return None;
        }
        let file = square % 8;
        match self {
            Direction::North if square < 56 => Some(square + 8),
            Direction::South if square >= 8 => Some(square - 8),
            Direction::East if file < 7 => Some(square + 1),
            Direction::West if file > 0 => Some(square - 1),
            _ => None,
        }
    }

    pub fn between(from: Square, to: Square) -> Option<Self> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.apply(from) == Some(to))
    }
}

/// A unit of turn expansion: either a lone step or a push/pull pair that
/// must be taken together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepAction {
    Single(Step),
    /// The opponent `victim` is displaced first, then `pusher` takes its square.
    Push { victim: Step, pusher: Step },
    /// The own `puller` moves away first, then `victim` follows into its origin.
    Pull { puller: Step, victim: Step },
}

impl StepAction {
    /// Steps in the order they are applied.
    pub fn steps(&self) -> Vec<Step> {
        match *self {
            StepAction::Single(step) => vec![step],
            StepAction::Push { victim, pusher } => vec![victim, pusher],
            StepAction::Pull { puller, victim } => vec![puller, victim],
        }
    }

    pub fn step_count(&self) -> u8 {
        match self {
            StepAction::Single(_) => 1,
            StepAction::Push { .. } | StepAction::Pull { .. } => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Step, StepAction};

    #[test]
    fn directions_respect_board_edges() {
        assert_eq!(Direction::North.apply(0), Some(8));
        assert_eq!(Direction::South.apply(0), None);
        assert_eq!(Direction::West.apply(8), None);
        assert_eq!(Direction::East.apply(7), None);
        assert_eq!(Direction::North.apply(63), None);
        assert_eq!(Direction::East.apply(62), Some(63));
    }

    #[test]
    fn direction_between_rejects_wraparound() {
        assert_eq!(Step::new(9, 1).direction(), Some(Direction::South));
        assert_eq!(Step::new(7, 8).direction(), None);
        assert_eq!(Step::new(10, 26).direction(), None);
    }

    #[test]
    fn pair_actions_list_steps_in_application_order() {
        let push = StepAction::Push {
            victim: Step::new(36, 35),
            pusher: Step::new(28, 36),
        };
        assert_eq!(push.steps(), vec![Step::new(36, 35), Step::new(28, 36)]);
        assert_eq!(push.step_count(), 2);
        assert_eq!(StepAction::Single(Step::new(0, 8)).step_count(), 1);
    }
}
