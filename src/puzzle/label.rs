//! Three-letter button labels and the rule index they select.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Color, GameRng};
use crate::rules::ACTIVE_RULES;

/// Letters a label is drawn from.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Bytes that are not three uppercase ASCII letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("label {0:?} is not three uppercase letters")]
pub struct InvalidLabel(pub [u8; 3]);

/// Uppercase three-letter label printed on the main button.
///
/// Always three letters `A..=Z`; deserialization goes through the same
/// check as [`ButtonLabel::try_from`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 3]", into = "[u8; 3]")]
pub struct ButtonLabel([u8; 3]);

impl ButtonLabel {
    /// Parse a label from text. Returns `None` unless it is exactly three
    /// ASCII letters; lowercase is accepted.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let bytes: [u8; 3] = text.as_bytes().try_into().ok()?;
        Self::try_from(bytes.map(|b| b.to_ascii_uppercase())).ok()
    }

    /// The three letters.
    #[must_use]
    pub fn letters(&self) -> [u8; 3] {
        self.0
    }

    /// Draw three letters uniformly.
    pub fn random(rng: &mut GameRng) -> Self {
        Self(std::array::from_fn(|_| {
            ALPHABET[rng.gen_range_usize(0..ALPHABET.len())]
        }))
    }

    /// Rule slot selected by this label on a button of `color`:
    /// `(∏(ordinal + 2) + color) mod 8`, with A at ordinal 0.
    #[must_use]
    pub fn rule_index(&self, color: Color) -> usize {
        let product: u64 = self
            .0
            .iter()
            .map(|&letter| u64::from(letter - b'A') + 2)
            .product();
        let index = ((product + color.index() as u64) % ACTIVE_RULES as u64) as usize;
        assert!(index < ACTIVE_RULES, "rule index {} out of range", index);
        index
    }
}

impl Default for ButtonLabel {
    fn default() -> Self {
        Self(*b"AAA")
    }
}

impl TryFrom<[u8; 3]> for ButtonLabel {
    type Error = InvalidLabel;

    fn try_from(letters: [u8; 3]) -> Result<Self, Self::Error> {
        if letters.iter().all(u8::is_ascii_uppercase) {
            Ok(Self(letters))
        } else {
            Err(InvalidLabel(letters))
        }
    }
}

impl From<ButtonLabel> for [u8; 3] {
    fn from(label: ButtonLabel) -> Self {
        label.0
    }
}

impl std::fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &letter in &self.0 {
            write!(f, "{}", letter as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ButtonLabel::parse("abc"), Some(ButtonLabel(*b"ABC")));
        assert_eq!(ButtonLabel::parse("AB"), None);
        assert_eq!(ButtonLabel::parse("A1C"), None);
        assert_eq!(ButtonLabel::parse("ABCD"), None);
    }

    #[test]
    fn test_rule_index() {
        // A=2, B=3, C=4 -> 24
        let label = ButtonLabel(*b"ABC");
        assert_eq!(label.rule_index(Color::Black), 0);
        assert_eq!(label.rule_index(Color::Red), 1);
        assert_eq!(label.rule_index(Color::White), 7);

        // Z=27 -> 27^3 = 19683 = 8 * 2460 + 3
        let label = ButtonLabel(*b"ZZZ");
        assert_eq!(label.rule_index(Color::Black), 3);
        assert_eq!(label.rule_index(Color::Magenta), 0);
    }

    #[test]
    fn test_random_is_uppercase() {
        let mut rng = GameRng::new(3);
        for _ in 0..100 {
            let label = ButtonLabel::random(&mut rng);
            assert!(label.0.iter().all(u8::is_ascii_uppercase));
        }
    }

    #[test]
    fn test_try_from_rejects_non_letters() {
        assert_eq!(ButtonLabel::try_from(*b"AB1"), Err(InvalidLabel(*b"AB1")));
        assert_eq!(ButtonLabel::try_from(*b"abc"), Err(InvalidLabel(*b"abc")));
        assert_eq!(ButtonLabel::try_from(*b"XYZ").map(|l| l.letters()), Ok(*b"XYZ"));
    }

    #[test]
    fn test_deserialize_checks_letters() {
        let json = serde_json::to_string(&ButtonLabel(*b"KEY")).unwrap();
        assert_eq!(serde_json::from_str::<ButtonLabel>(&json).unwrap(), ButtonLabel(*b"KEY"));
        assert!(serde_json::from_str::<ButtonLabel>("[65,66,48]").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ButtonLabel(*b"QED").to_string(), "QED");
    }
}
