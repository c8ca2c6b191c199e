//! Core value types shared by the board model, step logic, and notation codecs.
//!
//! Colors and piece kinds are kept separate (as in `Piece`) so bitboards can
//! be laid out as `[color][kind]` arrays.

pub use crate::game_state::board::Board;
pub use crate::game_state::position::{LastStep, Position};

/// Board square index (`0..=63`, `a1 == 0`, `h1 == 7`, `h8 == 63`).
pub type Square = u8;

/// Side to move. Gold moves first and starts on ranks 1-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Gold,
    Silver,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Gold, Color::Silver];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Gold => 0,
            Color::Silver => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Gold => Color::Silver,
            Color::Silver => Color::Gold,
        }
    }

    /// Single-letter side tag used by move numbers (`12g`, `12s`).
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Color::Gold => 'g',
            Color::Silver => 's',
        }
    }

    /// Parse a side tag, accepting the legacy `w`/`b` letters as well.
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'g' | 'w' => Some(Color::Gold),
            's' | 'b' => Some(Color::Silver),
            _ => None,
        }
    }
}

/// Piece rank, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Rabbit,
    Cat,
    Dog,
    Horse,
    Camel,
    Elephant,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Rabbit,
        PieceKind::Cat,
        PieceKind::Dog,
        PieceKind::Horse,
        PieceKind::Camel,
        PieceKind::Elephant,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Rabbit => 0,
            PieceKind::Cat => 1,
            PieceKind::Dog => 2,
            PieceKind::Horse => 3,
            PieceKind::Camel => 4,
            PieceKind::Elephant => 5,
        }
    }

    #[inline]
    const fn gold_letter(self) -> char {
        match self {
            PieceKind::Rabbit => 'R',
            PieceKind::Cat => 'C',
            PieceKind::Dog => 'D',
            PieceKind::Horse => 'H',
            PieceKind::Camel => 'M',
            PieceKind::Elephant => 'E',
        }
    }
}

/// A colored piece. Empty squares are represented as `Option::<Piece>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Notation letter: uppercase for gold, lowercase for silver.
    #[inline]
    pub const fn letter(self) -> char {
        let ch = self.kind.gold_letter();
        match self.color {
            Color::Gold => ch,
            Color::Silver => ch.to_ascii_lowercase(),
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Gold
        } else if ch.is_ascii_lowercase() {
            Color::Silver
        } else {
            return None;
        };

        let kind = match ch.to_ascii_uppercase() {
            'R' => PieceKind::Rabbit,
            'C' => PieceKind::Cat,
            'D' => PieceKind::Dog,
            'H' => PieceKind::Horse,
            'M' => PieceKind::Camel,
            'E' => PieceKind::Elephant,
            _ => return None,
        };

        Some(Piece::new(color, kind))
    }

    /// True if this piece outranks `other`, regardless of color.
    #[inline]
    pub fn is_stronger_than(self, other: Piece) -> bool {
        self.kind > other.kind
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Piece, PieceKind};

    #[test]
    fn piece_letters_round_trip() {
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_letter(piece.letter()), Some(piece));
            }
        }
        assert_eq!(Piece::from_letter('x'), None);
        assert_eq!(Piece::from_letter('1'), None);
    }

    #[test]
    fn strength_order_is_rabbit_to_elephant() {
        let elephant = Piece::new(Color::Silver, PieceKind::Elephant);
        let camel = Piece::new(Color::Gold, PieceKind::Camel);
        assert!(elephant.is_stronger_than(camel));
        assert!(!camel.is_stronger_than(elephant));
        assert!(!camel.is_stronger_than(Piece::new(Color::Silver, PieceKind::Camel)));
    }

    #[test]
    fn side_letters_accept_legacy_tags() {
        assert_eq!(Color::from_letter('w'), Some(Color::Gold));
        assert_eq!(Color::from_letter('B'), Some(Color::Silver));
        assert_eq!(Color::from_letter('f'), None);
        assert_eq!(Color::Silver.letter(), 's');
    }
}
