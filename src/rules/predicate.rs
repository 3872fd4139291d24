//! Press and release rules.
//!
//! A rule is a condition on the countdown display and the bomb's module
//! counters. Rules are plain data; [`RuleEvaluator`] interprets them against
//! a [`RuleContext`] captured from the host at the moment of the press.

use serde::{Deserialize, Serialize};

use crate::core::{BombInfo, TimerReading};

/// Digits counted as prime on the countdown.
pub const PRIME_DIGITS: [u8; 4] = [2, 3, 5, 7];

/// A condition that must hold for a press or release to be correct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// Any time.
    Always,

    /// Ones-of-seconds digit equals a seeded constant.
    SecondsDigitIs(u8),

    /// Ones-of-seconds digit equals solvable minus solved module count.
    SecondsDigitIsUnsolvedCount,

    /// Ones-of-seconds digit equals the solved module count (by id).
    SecondsDigitIsSolvedCount,

    /// Ones-of-seconds digit equals the ones digit of the minutes.
    SecondsDigitMatchesMinutes,

    /// Both seconds digits add up to a seeded constant.
    SecondsDigitsSumTo(u8),

    /// Both seconds digits are prime.
    SecondsDigitsPrime,
}

impl RuleKind {
    /// True for rules that accept any time.
    #[must_use]
    pub fn is_unconditional(self) -> bool {
        self == RuleKind::Always
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Always => write!(f, "any time"),
            RuleKind::SecondsDigitIs(n) => write!(f, "last digit is {}", n),
            RuleKind::SecondsDigitIsUnsolvedCount => write!(f, "last digit is unsolved count"),
            RuleKind::SecondsDigitIsSolvedCount => write!(f, "last digit is solved count"),
            RuleKind::SecondsDigitMatchesMinutes => write!(f, "last digit matches minutes"),
            RuleKind::SecondsDigitsSumTo(n) => write!(f, "seconds digits sum to {}", n),
            RuleKind::SecondsDigitsPrime => write!(f, "both seconds digits prime"),
        }
    }
}

/// Host readings a rule may depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleContext {
    /// Countdown at the moment of evaluation.
    pub timer: TimerReading,
    /// Solvable module count minus solved module count (by name).
    pub unsolved: i64,
    /// Solved module count (by id).
    pub solved: i64,
}

impl RuleContext {
    /// Capture the current readings of a bomb.
    pub fn capture<B: BombInfo + ?Sized>(bomb: &B) -> Self {
        Self {
            timer: TimerReading::from_seconds(bomb.time_remaining()),
            unsolved: bomb.solvable_module_count() as i64 - bomb.solved_module_name_count() as i64,
            solved: bomb.solved_module_id_count() as i64,
        }
    }
}

/// Evaluator for rules.
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Check if a rule is satisfied.
    #[must_use]
    pub fn evaluate(rule: RuleKind, ctx: &RuleContext) -> bool {
        let d0 = ctx.timer.digit(0);
        let d1 = ctx.timer.digit(1);

        match rule {
            RuleKind::Always => true,

            RuleKind::SecondsDigitIs(n) => d0 == n,

            RuleKind::SecondsDigitIsUnsolvedCount => i64::from(d0) == ctx.unsolved,

            RuleKind::SecondsDigitIsSolvedCount => i64::from(d0) == ctx.solved,

            RuleKind::SecondsDigitMatchesMinutes => d0 == ctx.timer.digit(2),

            RuleKind::SecondsDigitsSumTo(n) => d0 + d1 == n,

            RuleKind::SecondsDigitsPrime => {
                PRIME_DIGITS.contains(&d0) && PRIME_DIGITS.contains(&d1)
            }
        }
    }
}
