//! Long diagram output.
//!
//! ```text
//! 12g steps=2 last=Ee4
//!  +-----------------+
//! 8| r r r r r r r r |
//! ...
//! 1| R R R R R R R R |
//!  +-----------------+
//!    a b c d e f g h
//! ```

use crate::game_state::arimaa_rules::STEPS_PER_TURN;
use crate::game_state::arimaa_types::{Board, Position, Square};
use crate::moves::step_masks::is_trap;
use crate::utils::algebraic::square_to_algebraic;

pub const BORDER: &str = " +-----------------+";
pub const FILE_LABELS: &str = "   a b c d e f g h  ";

/// Board block only: border, eight rank lines, border, file labels.
/// Empty squares print `.` when `dots` is set and a space otherwise; empty
/// traps always print `x`.
pub fn board_to_diagram(board: &Board, dots: bool) -> String {
    let mut lines = Vec::with_capacity(11);
    lines.push(BORDER.to_owned());

    for rank in (0..8u8).rev() {
        let mut line = format!("{}| ", rank + 1);
        for file in 0..8u8 {
            let square: Square = rank * 8 + file;
            let ch = match board.piece_at(square) {
                Some(piece) => piece.letter(),
                None if is_trap(square) => 'x',
                None if dots => '.',
                None => ' ',
            };
            line.push(ch);
            line.push(' ');
        }
        line.push('|');
        lines.push(line);
    }

    lines.push(BORDER.to_owned());
    lines.push(FILE_LABELS.to_owned());
    lines.join("\n")
}

/// Header line plus board. Mid-turn state is written as header annotations
/// so the diagram parses back to an equal position.
pub fn position_to_diagram(move_number: u32, position: &Position) -> String {
    format!(
        "{}\n{}",
        diagram_header(move_number, position),
        board_to_diagram(position.board(), true)
    )
}

pub fn diagram_header(move_number: u32, position: &Position) -> String {
    let mut header = format!("{move_number}{}", position.side_to_move().letter());
    if position.steps_left() != STEPS_PER_TURN {
        header.push_str(&format!(" steps={}", position.steps_left()));
    }
    if let Some(last) = position.last_step() {
        if let Some(name) = square_to_algebraic(last.from) {
            header.push_str(&format!(" last={}{name}", last.piece.letter()));
        }
    }
    if position.in_push() {
        header.push_str(" push");
    }
    header
}

#[cfg(test)]
mod tests {
    use super::{board_to_diagram, position_to_diagram};
    use crate::game_state::arimaa_types::Board;
    use crate::move_generation::step_apply::do_step;
    use crate::move_generation::test_positions::{check_step_position, opening};
    use crate::moves::step_descriptions::Step;

    const OPENING_DIAGRAM: &str = "\
1g
 +-----------------+
8| r r r r r r r r |
7| d h c e m c h d |
6| . . x . . x . . |
5| . . . . . . . . |
4| . . . . . . . . |
3| . . x . . x . . |
2| D H C M E C H D |
1| R R R R R R R R |
 +-----------------+
   a b c d e f g h  ";

    #[test]
    fn opening_diagram() {
        assert_eq!(position_to_diagram(1, &opening()), OPENING_DIAGRAM);
    }

    #[test]
    fn blank_squares_without_dots() {
        let text = board_to_diagram(&Board::empty(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "6|     x     x     |");
        assert_eq!(lines[5], "4|                 |");
    }

    #[test]
    fn mid_turn_header() {
        let pos = check_step_position();
        let pushed = do_step(&pos, Step::new(36, 35)).expect("push start should apply");
        let text = position_to_diagram(7, &pushed);
        assert_eq!(
            text.lines().next(),
            Some("7g steps=3 last=me5 push")
        );
    }
}
