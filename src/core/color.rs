//! The eight colours a button face can take.

use serde::{Deserialize, Serialize};

/// Button and arrow colour.
///
/// The discriminant is the colour's index into the required-press table and
/// into the rule-index formula, so the order is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
    Cyan = 4,
    Magenta = 5,
    Yellow = 6,
    White = 7,
}

impl Color {
    /// Number of colours.
    pub const COUNT: usize = 8;

    /// All colours in index order.
    pub const ALL: [Color; Self::COUNT] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    /// Colour for an index in `0..8`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Table index of this colour.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Cyan => "Cyan",
            Color::Magenta => "Magenta",
            Color::Yellow => "Yellow",
            Color::White => "White",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(Color::from_index(i), Some(*color));
        }
        assert_eq!(Color::from_index(8), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Color::Magenta), "Magenta");
        assert_eq!(Color::Black.to_string(), "Black");
    }
}
