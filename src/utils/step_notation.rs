//! Move token notation: `Ee2n` steps, `Cc3x` capture notes, `Ra1` setup
//! placements.

use crate::errors::{ArimaaError, ParseError};
use crate::game_state::arimaa_types::{Piece, Position, Square};
use crate::move_generation::step_apply::do_step_with_capture;
use crate::moves::step_descriptions::{Direction, Step};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveToken {
    Step { piece: Piece, step: Step },
    Capture { piece: Piece, square: Square },
    Placement { piece: Piece, square: Square },
}

pub fn parse_move_token(token: &str) -> Result<MoveToken, ParseError> {
    let mut chars = token.chars();
    let piece_char = chars
        .next()
        .ok_or_else(|| ParseError::BadStepToken(token.to_owned()))?;
    let piece = Piece::from_letter(piece_char).ok_or(ParseError::BadPiece(piece_char))?;

    let square_text: String = chars.by_ref().take(2).collect();
    if square_text.len() != 2 {
        return Err(ParseError::BadStepToken(token.to_owned()));
    }
    let square = algebraic_to_square(&square_text)?;

    let suffix: String = chars.collect();
    match suffix.as_str() {
        "" => Ok(MoveToken::Placement { piece, square }),
        "x" => Ok(MoveToken::Capture { piece, square }),
        dir if dir.len() == 1 => {
            let direction = dir
                .chars()
                .next()
                .and_then(Direction::from_letter)
                .ok_or_else(|| ParseError::BadStepToken(token.to_owned()))?;
            let to = direction
                .apply(square)
                .ok_or_else(|| ParseError::BadStepToken(token.to_owned()))?;
            Ok(MoveToken::Step {
                piece,
                step: Step::new(square, to),
            })
        }
        _ => Err(ParseError::BadStepToken(token.to_owned())),
    }
}

/// Split a move on whitespace and parse every token.
pub fn parse_move_tokens(text: &str) -> Result<Vec<MoveToken>, ParseError> {
    text.split_whitespace().map(parse_move_token).collect()
}

/// Parse a movement-only move into its steps. Capture notes are dropped;
/// setup placements are rejected.
pub fn parse_move(text: &str) -> Result<Vec<Step>, ParseError> {
    let mut steps = Vec::new();
    for token in text.split_whitespace() {
        match parse_move_token(token)? {
            MoveToken::Step { step, .. } => steps.push(step),
            MoveToken::Capture { .. } => {}
            MoveToken::Placement { .. } => {
                return Err(ParseError::MissingDirection(token.to_owned()));
            }
        }
    }
    if steps.is_empty() {
        return Err(ParseError::BadStepToken(text.trim().to_owned()));
    }
    Ok(steps)
}

/// Write `steps`, taken from `position`, as move tokens. Trap captures
/// caused by a step follow it as `<piece><square>x`.
pub fn steps_to_str(position: &Position, steps: &[Step]) -> Result<String, ArimaaError> {
    let mut tokens = Vec::<String>::with_capacity(steps.len() + 1);
    let mut current = position.clone();

    for &step in steps {
        let piece = current
            .piece_at(step.from)
            .ok_or(ParseError::StepFromEmpty(step.from))?;
        let from = square_to_algebraic(step.from).ok_or(ParseError::StepFromEmpty(step.from))?;
        match step.direction() {
            Some(direction) => tokens.push(format!("{}{from}{}", piece.letter(), direction.letter())),
            None => {
                let to = square_to_algebraic(step.to)
                    .ok_or_else(|| ParseError::BadSquare(step.to.to_string()))?;
                tokens.push(format!("{}{from},{to}", piece.letter()));
            }
        }

        let (next, captured) = do_step_with_capture(&current, step)?;
        if let Some((victim, square)) = captured {
            if let Some(name) = square_to_algebraic(square) {
                tokens.push(format!("{}{name}x", victim.letter()));
            }
        }
        current = next;
    }

    Ok(tokens.join(" "))
}

#[cfg(test)]
mod tests {
    use super::{parse_move, parse_move_tokens, steps_to_str, MoveToken};
    use crate::errors::{ArimaaError, ParseError};
    use crate::game_state::arimaa_types::{Color, Piece, PieceKind};
    use crate::move_generation::test_positions::opening;
    use crate::moves::step_descriptions::Step;

    fn pairs(text: &str) -> Vec<(u8, u8)> {
        parse_move(text)
            .expect("move should parse")
            .into_iter()
            .map(|step| (step.from, step.to))
            .collect()
    }

    #[test]
    fn directional_steps() {
        assert_eq!(pairs("Ea1n Ea2e Eb2s Eb1w"), vec![(0, 8), (8, 9), (9, 1), (1, 0)]);
    }

    #[test]
    fn capture_notes_are_dropped() {
        assert_eq!(pairs("Eb2w Cc3x Ea2n"), vec![(9, 8), (8, 16)]);
    }

    #[test]
    fn malformed_moves() {
        assert!(matches!(parse_move("Ed4d"), Err(ParseError::BadStepToken(_))));
        assert!(matches!(parse_move("Ea1"), Err(ParseError::MissingDirection(_))));
        assert!(parse_move(" ").is_err());
        assert!(matches!(parse_move("Xa1n"), Err(ParseError::BadPiece('X'))));
        assert!(parse_move("Ea1s").is_err());
    }

    #[test]
    fn setup_tokens_parse_as_placements() {
        let tokens = parse_move_tokens("Ra1 ed7").expect("placements should parse");
        assert_eq!(
            tokens,
            vec![
                MoveToken::Placement {
                    piece: Piece::new(Color::Gold, PieceKind::Rabbit),
                    square: 0
                },
                MoveToken::Placement {
                    piece: Piece::new(Color::Silver, PieceKind::Elephant),
                    square: 51
                },
            ]
        );
    }

    #[test]
    fn steps_are_written_with_captures() {
        let pos = opening();
        let write = |pairs: &[(u8, u8)]| {
            let steps: Vec<Step> = pairs.iter().map(|&(f, t)| Step::new(f, t)).collect();
            steps_to_str(&pos, &steps)
        };
        assert_eq!(
            write(&[(10, 18), (12, 20)]).expect("steps should write"),
            "Cc2n Cc3x Ee2n"
        );
        assert_eq!(
            write(&[(11, 19), (10, 18), (19, 27)]).expect("steps should write"),
            "Md2n Cc2n Md3n Cc3x"
        );
        assert!(matches!(
            write(&[(18, 19)]),
            Err(ArimaaError::Parse(ParseError::StepFromEmpty(18)))
        ));
        assert_eq!(write(&[(10, 26)]).expect("jump should write"), "Cc2,c4");
    }
}
