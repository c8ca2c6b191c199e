//! Error types for step legality, move application, notation parsing, and
//! internal consistency checks.

use thiserror::Error;

use crate::game_state::arimaa_types::{Color, Square};
use crate::utils::algebraic::square_to_algebraic;

fn sq(square: &Square) -> String {
    square_to_algebraic(*square).unwrap_or_else(|| format!("#{square}"))
}

/// Why a single step is illegal in the current position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepRejection {
    #[error("step off the board: {from} -> {to}")]
    OffBoard { from: Square, to: Square },

    #[error("step from an empty square {}", sq(.0))]
    EmptySource(Square),

    #[error("step to a non-empty square {}", sq(.0))]
    OccupiedTarget(Square),

    #[error("step from {} to non-adjacent square {}", sq(.from), sq(.to))]
    NotAdjacent { from: Square, to: Square },

    #[error("step of a frozen piece on {}", sq(.0))]
    Frozen(Square),

    #[error("rabbit back step from {}", sq(.0))]
    RabbitBackward(Square),

    #[error("neglect finishing the push onto {}", sq(.0))]
    PushNotFinished(Square),

    #[error("piece on {} too weak to finish the push", sq(.0))]
    PushTooWeak(Square),

    #[error("opponent step from {} while already in push", sq(.0))]
    AlreadyInPush(Square),

    #[error("push of the piece on {} started on the last step", sq(.0))]
    PushOnLastStep(Square),

    #[error("no pusher next to the piece on {}", sq(.0))]
    NoPusher(Square),
}

/// Why a whole turn or a setup cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("step {index}: {rejection}")]
    Step {
        index: usize,
        #[source]
        rejection: StepRejection,
    },

    #[error("{given} steps given with only {left} left in the turn")]
    TooManySteps { given: usize, left: u8 },

    #[error("turn ends in the middle of a push")]
    UnfinishedPush,

    #[error("turn leaves the board unchanged")]
    UnchangedBoard,

    #[error("token names piece {expected} but {} holds {found}", sq(.square))]
    PieceMismatch {
        square: Square,
        expected: char,
        found: char,
    },

    #[error("setup square {} already occupied", sq(.0))]
    SetupOccupied(Square),

    #[error("setup places two pieces on {}", sq(.0))]
    SetupDoubled(Square),

    #[error("setup piece on {} belongs to the side not placing", sq(.0))]
    SetupWrongColor(Square),

    #[error("setup square {} outside the home ranks", sq(.0))]
    SetupOutsideHome(Square),

    #[error("setup places {placed} of piece {piece}, expected {expected}")]
    SetupQuota { piece: char, placed: u8, expected: u8 },

    #[error("{0:?} has already placed its pieces")]
    SetupAlreadyPlaced(Color),

    #[error("setup and movement tokens mixed in one move")]
    MixedSetupAndSteps,
}

/// Structural failures while reading any of the text notations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid square: {0:?}")]
    BadSquare(String),

    #[error("invalid piece symbol: {0:?}")]
    BadPiece(char),

    #[error("invalid step token: {0:?}")]
    BadStepToken(String),

    #[error("step token without direction: {0:?}")]
    MissingDirection(String),

    #[error("invalid side tag: {0:?}")]
    BadSide(String),

    #[error("invalid move number: {0:?}")]
    BadMoveNumber(String),

    #[error("position header carries steps already taken: {0:?}")]
    PartialTurn(String),

    #[error("invalid header annotation: {0:?}")]
    BadAnnotation(String),

    #[error("expected board border on line {line}")]
    MissingBorder { line: usize },

    #[error("expected rank {expected} line, found {found:?}")]
    BadRankLine { expected: u8, found: String },

    #[error("notation ended before the board was complete")]
    UnexpectedEnd,

    #[error("compact board must be 64 squares in brackets, got {0} characters")]
    BadCompactLength(usize),

    #[error("steps left must be 1 to 4, got {0}")]
    BadStepsLeft(u8),

    #[error("cannot write a step from empty square {}", sq(.0))]
    StepFromEmpty(Square),
}

/// A cached value of a position disagrees with its recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("fingerprint {stored:#018x} differs from recomputed {computed:#018x}")]
    FingerprintMismatch { stored: u64, computed: u64 },

    #[error("piece bitboards overlap")]
    OverlappingPieces,

    #[error("placement cache of {0:?} is stale")]
    StalePlacement(Color),

    #[error("empty-square cache is stale")]
    StaleEmpty,

    #[error("steps left out of range: {0}")]
    StepsOutOfRange(u8),

    #[error("push in progress without a pushed piece record")]
    PushWithoutRecord,
}

/// Umbrella error for entry points that both parse and apply.
#[derive(Debug, Error)]
pub enum ArimaaError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Illegal(#[from] IllegalMove),

    #[error(transparent)]
    Step(#[from] StepRejection),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error("embedded move {move_number}{side} failed: {source}")]
    EmbeddedMove {
        move_number: u32,
        side: char,
        #[source]
        source: Box<ArimaaError>,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
