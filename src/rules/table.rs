//! Required-press lookup table.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Press counts that may appear in the table.
pub const PRESS_COUNTS: [u8; 4] = [3, 4, 5, 6];

/// How often each press count appears.
pub const COPIES_PER_COUNT: usize = 16;

/// 8×8 table of required presses, indexed by (down colour, up colour).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressTable {
    rows: [[u8; Color::COUNT]; Color::COUNT],
}

impl PressTable {
    /// Build the table from 64 values in column-major order:
    /// `table[i][j] = values[8 * j + i]`.
    ///
    /// # Panics
    ///
    /// Panics if any value is outside [`PRESS_COUNTS`]. Such a table can only
    /// come from a broken generator.
    #[must_use]
    pub fn from_column_major(values: &[u8; Color::COUNT * Color::COUNT]) -> Self {
        assert!(
            values.iter().all(|v| PRESS_COUNTS.contains(v)),
            "press table value outside 3..=6"
        );

        let mut rows = [[0u8; Color::COUNT]; Color::COUNT];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = values[Color::COUNT * j + i];
            }
        }
        Self { rows }
    }

    /// Presses required for an arrow pair.
    #[must_use]
    pub fn required(&self, down: Color, up: Color) -> u8 {
        self.rows[down.index()][up.index()]
    }

    /// Raw rows, indexed `[down][up]`.
    #[must_use]
    pub fn rows(&self) -> &[[u8; Color::COUNT]; Color::COUNT] {
        &self.rows
    }

    /// Occurrences of `value` across all cells.
    #[must_use]
    pub fn count_of(&self, value: u8) -> usize {
        self.rows.iter().flatten().filter(|&&v| v == value).count()
    }
}

impl std::fmt::Display for PressTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_values() -> [u8; 64] {
        let mut values = [0u8; 64];
        for (k, v) in values.iter_mut().enumerate() {
            *v = PRESS_COUNTS[k / COPIES_PER_COUNT];
        }
        values
    }

    #[test]
    fn test_column_major_layout() {
        let values = sorted_values();
        let table = PressTable::from_column_major(&values);

        // Column j holds values[8j..8j+8]
        assert_eq!(table.required(Color::Black, Color::Black), 3);
        assert_eq!(table.required(Color::White, Color::Red), 3);
        assert_eq!(table.required(Color::Black, Color::Green), 4);
        assert_eq!(table.required(Color::Red, Color::White), 6);
    }

    #[test]
    fn test_counts() {
        let table = PressTable::from_column_major(&sorted_values());
        for v in PRESS_COUNTS {
            assert_eq!(table.count_of(v), COPIES_PER_COUNT);
        }
        assert_eq!(table.count_of(7), 0);
    }

    #[test]
    #[should_panic(expected = "press table value outside 3..=6")]
    fn test_rejects_out_of_range() {
        let mut values = sorted_values();
        values[10] = 7;
        let _ = PressTable::from_column_major(&values);
    }

    #[test]
    fn test_display() {
        let table = PressTable::from_column_major(&sorted_values());
        let text = table.to_string();
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().next(), Some("33445566"));
    }
}
