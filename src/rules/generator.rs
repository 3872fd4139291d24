//! Rule-seed generation.
//!
//! A rule seed fixes everything a defuser's manual would print: the
//! required-press table and which eight press/release rule pairs are in
//! play, in which order.
//!
//! ## Draw order
//!
//! All values come from one [`GameRng`] stream, consumed in this order:
//!
//! 1. 64 keys shuffling the press-count multiset
//! 2. the four rule constants `c1..c4`
//! 3. 13 keys shuffling the rule-slot indices
//!
//! Changing the order changes every derived rule set.
//!
//! ## Slot pairing
//!
//! The press pool and the release pool are indexed by the same permutation,
//! so slot `k` always pairs the press rule and the release rule that were
//! authored side by side. At most one rule of each pair is conditional.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Color, GameRng};

use super::predicate::RuleKind;
use super::table::{PressTable, COPIES_PER_COUNT, PRESS_COUNTS};

/// Number of rules in each pool.
pub const POOL_SIZE: usize = 13;

/// Number of rule slots in play.
pub const ACTIVE_RULES: usize = 8;

/// Seeded constants used by the parameterised rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConstants {
    /// Press rule digit, `0..10`.
    pub press_digit: u8,
    /// Press rule digit sum, `6..11`.
    pub press_sum: u8,
    /// Release rule digit, `0..10`.
    pub release_digit: u8,
    /// Release rule digit sum, `6..11`.
    pub release_sum: u8,
}

impl RuleConstants {
    fn draw(rng: &mut GameRng) -> Self {
        let press_digit = rng.next_below(10);
        let press_sum = rng.next_below(5) + 6;
        let release_digit = rng.next_below(10);
        let release_sum = rng.next_below(5) + 6;
        Self {
            press_digit,
            press_sum,
            release_digit,
            release_sum,
        }
    }
}

/// Press rules in authoring order.
#[must_use]
pub fn press_pool(c: &RuleConstants) -> [RuleKind; POOL_SIZE] {
    use RuleKind::{Always, SecondsDigitIs, SecondsDigitsSumTo};
    [
        Always,
        SecondsDigitIs(c.press_digit),
        RuleKind::SecondsDigitIsUnsolvedCount,
        RuleKind::SecondsDigitIsSolvedCount,
        RuleKind::SecondsDigitMatchesMinutes,
        SecondsDigitsSumTo(c.press_sum),
        RuleKind::SecondsDigitsPrime,
        Always,
        Always,
        Always,
        Always,
        Always,
        Always,
    ]
}

/// Release rules in authoring order.
#[must_use]
pub fn release_pool(c: &RuleConstants) -> [RuleKind; POOL_SIZE] {
    use RuleKind::{Always, SecondsDigitIs, SecondsDigitsSumTo};
    [
        Always,
        Always,
        Always,
        Always,
        Always,
        Always,
        Always,
        SecondsDigitIs(c.release_digit),
        RuleKind::SecondsDigitIsUnsolvedCount,
        RuleKind::SecondsDigitIsSolvedCount,
        RuleKind::SecondsDigitMatchesMinutes,
        SecondsDigitsSumTo(c.release_sum),
        RuleKind::SecondsDigitsPrime,
    ]
}

/// The press and release rule bound to one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePair {
    /// Must hold when the button is pressed.
    pub press: RuleKind,
    /// Must hold when the button is released.
    pub release: RuleKind,
}

/// Everything derived from one rule seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    seed: u64,
    table: PressTable,
    constants: RuleConstants,
    permutation: [usize; POOL_SIZE],
    active: [RulePair; ACTIVE_RULES],
}

impl RuleSet {
    /// Derive the rule set for `seed`. Pure and infallible.
    #[must_use]
    pub fn generate(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);

        let multiset: Vec<u8> = PRESS_COUNTS
            .iter()
            .flat_map(|&v| std::iter::repeat(v).take(COPIES_PER_COUNT))
            .collect();
        let order = rng.shuffle_by_keys(multiset);
        let mut values = [0u8; Color::COUNT * Color::COUNT];
        values.copy_from_slice(&order);
        let table = PressTable::from_column_major(&values);

        let constants = RuleConstants::draw(&mut rng);

        let shuffled = rng.shuffle_by_keys((0..POOL_SIZE).collect());
        let mut permutation = [0usize; POOL_SIZE];
        permutation.copy_from_slice(&shuffled);

        let presses = press_pool(&constants);
        let releases = release_pool(&constants);
        let active = std::array::from_fn(|k| RulePair {
            press: presses[permutation[k]],
            release: releases[permutation[k]],
        });

        let order_digits: String = order.iter().map(u8::to_string).collect();
        debug!(
            seed,
            order = %order_digits,
            permutation = ?permutation,
            constants = ?constants,
            "generated rule set"
        );

        Self {
            seed,
            table,
            constants,
            permutation,
            active,
        }
    }

    /// The seed this set was generated from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Required-press table.
    #[must_use]
    pub fn table(&self) -> &PressTable {
        &self.table
    }

    /// Seeded rule constants.
    #[must_use]
    pub fn constants(&self) -> &RuleConstants {
        &self.constants
    }

    /// Permutation of pool indices; the first [`ACTIVE_RULES`] are in play.
    #[must_use]
    pub fn permutation(&self) -> &[usize; POOL_SIZE] {
        &self.permutation
    }

    /// All active rule pairs in slot order.
    #[must_use]
    pub fn active(&self) -> &[RulePair; ACTIVE_RULES] {
        &self.active
    }

    /// Rule pair bound to slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= ACTIVE_RULES`.
    #[must_use]
    pub fn pair(&self, index: usize) -> RulePair {
        assert!(index < ACTIVE_RULES, "rule index {} out of range", index);
        self.active[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(RuleSet::generate(42), RuleSet::generate(42));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(RuleSet::generate(1).table(), RuleSet::generate(2).table());
    }

    #[test]
    fn test_table_multiset() {
        let set = RuleSet::generate(1234);
        for v in PRESS_COUNTS {
            assert_eq!(set.table().count_of(v), COPIES_PER_COUNT);
        }
    }

    #[test]
    fn test_constants_in_range() {
        for seed in 0..200 {
            let c = *RuleSet::generate(seed).constants();
            assert!(c.press_digit < 10);
            assert!((6..11).contains(&c.press_sum));
            assert!(c.release_digit < 10);
            assert!((6..11).contains(&c.release_sum));
        }
    }

    #[test]
    fn test_permutation_is_complete() {
        let set = RuleSet::generate(77);
        let mut perm = set.permutation().to_vec();
        perm.sort_unstable();
        assert_eq!(perm, (0..POOL_SIZE).collect::<Vec<_>>());
    }

    #[test]
    fn test_active_pairs_follow_permutation() {
        let set = RuleSet::generate(5);
        let presses = press_pool(set.constants());
        let releases = release_pool(set.constants());

        for (k, pair) in set.active().iter().enumerate() {
            let slot = set.permutation()[k];
            assert_eq!(pair.press, presses[slot]);
            assert_eq!(pair.release, releases[slot]);
        }
    }

    #[test]
    fn test_pools_pair_one_condition_per_slot() {
        let c = RuleConstants {
            press_digit: 1,
            press_sum: 7,
            release_digit: 2,
            release_sum: 8,
        };
        let presses = press_pool(&c);
        let releases = release_pool(&c);

        for slot in 0..POOL_SIZE {
            assert!(presses[slot].is_unconditional() || releases[slot].is_unconditional());
        }
        assert_eq!(presses[1], RuleKind::SecondsDigitIs(1));
        assert_eq!(releases[11], RuleKind::SecondsDigitsSumTo(8));
    }

    #[test]
    fn test_pair_lookup() {
        let set = RuleSet::generate(9);
        assert_eq!(set.pair(3), set.active()[3]);
    }

    #[test]
    #[should_panic(expected = "rule index 8 out of range")]
    fn test_pair_out_of_range() {
        let _ = RuleSet::generate(9).pair(8);
    }

    #[test]
    fn test_rule_set_fixture_serde() {
        let set = RuleSet::generate(31);
        let json = serde_json::to_string(&set).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}
