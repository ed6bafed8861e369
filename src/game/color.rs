//! Side identifiers shared by every game variant.

use std::fmt;

/// Side to move. Black moves first in both supported games and is always the
/// maximizing side of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// `+1` for Black, `-1` for White.
    #[inline]
    pub const fn sign(self) -> i64 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    #[inline]
    pub const fn is_maximizer(self) -> bool {
        matches!(self, Color::Black)
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'B' | 'b' => Some(Color::Black),
            'W' | 'w' => Some(Color::White),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}
