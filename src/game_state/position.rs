//! Immutable position value.
//!
//! `Position` pairs a `Board` with the turn bookkeeping needed to decide step
//! legality: side to move, steps left, the push flag, and the record of the
//! previous step. Every transition builds a new value. The fingerprint is
//! maintained incrementally from the shared key table.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::errors::{IllegalMove, InvariantViolation, StepRejection};
use crate::game_state::arimaa_rules::STEPS_PER_TURN;
use crate::game_state::arimaa_types::{Board, Color, Piece, Square};
use crate::game_state::zobrist::ZobristKeys;

/// The piece that made (or, for a push start, suffered) the previous step of
/// the turn, and the square it left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastStep {
    pub piece: Piece,
    pub from: Square,
}

#[derive(Debug, Clone)]
pub struct Position {
    pub(crate) side_to_move: Color,
    pub(crate) steps_left: u8,
    pub(crate) board: Board,
    pub(crate) in_push: bool,
    pub(crate) last_step: Option<LastStep>,
    pub(crate) fingerprint: u64,
    pub(crate) keys: Arc<ZobristKeys>,
}

impl Position {
    /// Fresh-turn position: four steps left, no push, no previous step.
    pub fn new(side_to_move: Color, board: Board, keys: Arc<ZobristKeys>) -> Self {
        let fingerprint = keys.compute_fingerprint(&board);
        Self {
            side_to_move,
            steps_left: STEPS_PER_TURN,
            board,
            in_push: false,
            last_step: None,
            fingerprint,
            keys,
        }
    }

    /// Position in the middle of a turn.
    pub fn with_turn_state(
        side_to_move: Color,
        steps_left: u8,
        board: Board,
        in_push: bool,
        last_step: Option<LastStep>,
        keys: Arc<ZobristKeys>,
    ) -> Result<Self, InvariantViolation> {
        let mut position = Self::new(side_to_move, board, keys);
        position.steps_left = steps_left;
        position.in_push = in_push;
        position.last_step = last_step;
        position.verify_integrity()?;
        Ok(position)
    }

    /// Empty board with gold to place its pieces.
    pub fn setup_start(keys: Arc<ZobristKeys>) -> Self {
        Self::new(Color::Gold, Board::empty(), keys)
    }

    /// Standard opening layout with gold to move.
    pub fn standard_opening(keys: Arc<ZobristKeys>) -> Self {
        Self::new(Color::Gold, Board::standard_setup(), keys)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn steps_left(&self) -> u8 {
        self.steps_left
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn in_push(&self) -> bool {
        self.in_push
    }

    #[inline]
    pub fn last_step(&self) -> Option<LastStep> {
        self.last_step
    }

    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    #[inline]
    pub fn keys(&self) -> &Arc<ZobristKeys> {
        &self.keys
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn is_frozen(&self, square: Square) -> bool {
        self.board.is_frozen(square)
    }

    /// No step of the current turn has been taken yet.
    #[inline]
    pub fn is_fresh_turn(&self) -> bool {
        self.steps_left == STEPS_PER_TURN && !self.in_push && self.last_step.is_none()
    }

    /// A side has no piece on the board yet, so the game has not started.
    #[inline]
    pub fn awaiting_setup(&self) -> bool {
        Color::ALL
            .iter()
            .any(|&color| self.board.placement(color) == 0)
    }

    /// Add a piece during setup or analysis editing.
    pub fn place_piece(&self, piece: Piece, square: Square) -> Result<Self, IllegalMove> {
        if !self.board.is_empty_square(square) {
            return Err(IllegalMove::SetupOccupied(square));
        }
        let mut next = self.clone();
        next.board.add_piece(piece, square);
        next.fingerprint ^= self.keys.piece_square_key(piece, square);
        Ok(next)
    }

    pub fn remove_piece(&self, square: Square) -> Result<Self, StepRejection> {
        let piece = self
            .board
            .piece_at(square)
            .ok_or(StepRejection::EmptySource(square))?;
        let mut next = self.clone();
        next.board.remove_piece(piece, square);
        next.fingerprint ^= self.keys.piece_square_key(piece, square);
        Ok(next)
    }

    /// End the turn without further steps: the board is kept and the other
    /// side gets a fresh turn.
    pub fn pass_turn(&self) -> Self {
        let mut next = self.clone();
        next.end_turn();
        next
    }

    pub(crate) fn end_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        self.steps_left = STEPS_PER_TURN;
        self.in_push = false;
        self.last_step = None;
    }

    #[inline]
    pub fn recompute_fingerprint(&self) -> u64 {
        self.keys.compute_fingerprint(&self.board)
    }

    /// Check every cached value against its recomputation.
    pub fn verify_integrity(&self) -> Result<(), InvariantViolation> {
        self.board.verify_caches()?;

        let computed = self.recompute_fingerprint();
        if computed != self.fingerprint {
            return Err(InvariantViolation::FingerprintMismatch {
                stored: self.fingerprint,
                computed,
            });
        }
        if self.steps_left == 0 || self.steps_left > STEPS_PER_TURN {
            return Err(InvariantViolation::StepsOutOfRange(self.steps_left));
        }
        if self.in_push && self.last_step.is_none() {
            return Err(InvariantViolation::PushWithoutRecord);
        }
        Ok(())
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
            && self.side_to_move == other.side_to_move
            && self.steps_left == other.steps_left
            && self.in_push == other.in_push
            && self.last_step == other.last_step
            && self.board == other.board
            && (Arc::ptr_eq(&self.keys, &other.keys) || self.keys == other.keys)
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
        self.side_to_move.hash(state);
        self.steps_left.hash(state);
        self.in_push.hash(state);
        self.last_step.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::Position;
    use crate::game_state::arimaa_types::{Color, Piece, PieceKind};
    use crate::game_state::zobrist::ZobristKeys;

    fn keys() -> Arc<ZobristKeys> {
        Arc::new(ZobristKeys::standard())
    }

    #[test]
    fn place_and_remove_keep_fingerprint_in_step() {
        let start = Position::setup_start(keys());
        let elephant = Piece::new(Color::Gold, PieceKind::Elephant);
        let placed = start.place_piece(elephant, 12).expect("empty square should accept piece");
        placed.verify_integrity().expect("placement should keep integrity");
        assert_eq!(placed.piece_at(12), Some(elephant));
        assert!(placed.place_piece(elephant, 12).is_err());

        let removed = placed.remove_piece(12).expect("occupied square should release piece");
        assert_eq!(removed, start);
        assert!(removed.remove_piece(12).is_err());
    }

    #[test]
    fn pass_turn_flips_side_and_keeps_board() {
        let opening = Position::standard_opening(keys());
        let passed = opening.pass_turn();
        assert_eq!(passed.side_to_move(), Color::Silver);
        assert_eq!(passed.board(), opening.board());
        assert_eq!(passed.fingerprint(), opening.fingerprint());
        assert_ne!(passed, opening);
    }

    #[test]
    fn equal_positions_hash_together() {
        let shared = keys();
        let a = Position::standard_opening(shared.clone());
        let b = Position::standard_opening(shared);
        let c = Position::standard_opening(keys());
        let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&a));
    }

    #[test]
    fn different_key_tables_never_compare_equal() {
        let a = Position::standard_opening(keys());
        let b = Position::standard_opening(Arc::new(ZobristKeys::new(99)));
        assert_ne!(a, b);
    }

    #[test]
    fn setup_is_pending_until_both_sides_have_pieces() {
        let start = Position::setup_start(keys());
        assert!(start.awaiting_setup());

        let gold_only = start
            .place_piece(Piece::new(Color::Gold, PieceKind::Rabbit), 8)
            .expect("empty square should accept gold rabbit");
        assert!(gold_only.awaiting_setup());

        let both = gold_only
            .place_piece(Piece::new(Color::Silver, PieceKind::Rabbit), 48)
            .expect("empty square should accept silver rabbit");
        assert!(!both.awaiting_setup());
        assert!(!Position::standard_opening(keys()).awaiting_setup());
    }

    #[test]
    fn turn_state_is_validated() {
        let board = *Position::standard_opening(keys()).board();
        assert!(Position::with_turn_state(Color::Gold, 0, board, false, None, keys()).is_err());
        assert!(Position::with_turn_state(Color::Gold, 3, board, true, None, keys()).is_err());
        assert!(Position::with_turn_state(Color::Gold, 3, board, false, None, keys()).is_ok());
    }
}
