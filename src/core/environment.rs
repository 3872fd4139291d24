//! Read-only view of the housing bomb.
//!
//! The puzzle never owns the countdown or the other modules. The host passes
//! an [`Environment`] into every operation that needs one:
//!
//! - [`BombInfo`]: countdown display and module counters
//! - [`Clock`]: monotonically non-decreasing scheduling time
//!
//! [`FixedBomb`] is a plain-data implementation for tests, simulations and
//! the Python bindings.

use serde::{Deserialize, Serialize};

/// Countdown and module counters of the housing bomb.
pub trait BombInfo {
    /// Countdown value in seconds.
    fn time_remaining(&self) -> f64;

    /// Number of solvable modules on the bomb (by name).
    fn solvable_module_count(&self) -> usize;

    /// Number of solved modules (by name).
    fn solved_module_name_count(&self) -> usize;

    /// Number of solved modules (by unique id).
    fn solved_module_id_count(&self) -> usize;
}

/// Elapsed scheduling time, used for hold durations and delays.
pub trait Clock {
    /// Seconds since the scheduler started. Never decreases.
    fn now(&self) -> f64;
}

/// Everything an operation may read from the host.
pub trait Environment: BombInfo + Clock {}

impl<T: BombInfo + Clock + ?Sized> Environment for T {}

/// The countdown display decomposed into decimal digit places.
///
/// Place 0 is the ones of seconds, place 1 the tens of seconds, and
/// places 2.. are the digits of the whole minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerReading {
    /// Whole seconds on the countdown.
    pub total_seconds: u64,
}

impl TimerReading {
    /// Truncate a countdown value to whole seconds. Negative values read as 0.
    #[must_use]
    pub fn from_seconds(seconds: f64) -> Self {
        let whole = if seconds.is_finite() && seconds > 0.0 {
            seconds.trunc() as u64
        } else {
            0
        };
        Self { total_seconds: whole }
    }

    /// Decimal digit at `place`.
    #[must_use]
    pub fn digit(self, place: u32) -> u8 {
        let value = match place {
            0 => self.total_seconds % 10,
            1 => (self.total_seconds % 60) / 10,
            _ => (self.total_seconds / 60 / 10u64.saturating_pow(place - 2)) % 10,
        };
        value as u8
    }

    /// Seconds past the minute, `0..60`.
    #[must_use]
    pub fn seconds_of_minute(self) -> u8 {
        (self.total_seconds % 60) as u8
    }
}

/// A bomb whose readings are plain fields.
///
/// ```
/// use directional_button::core::{BombInfo, Clock, FixedBomb};
///
/// let mut bomb = FixedBomb::new(125.0);
/// bomb.advance(2.5);
/// assert_eq!(bomb.time_remaining(), 122.5);
/// assert_eq!(bomb.now(), 2.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedBomb {
    /// Countdown in seconds.
    pub time_remaining: f64,
    /// Scheduling time in seconds.
    pub elapsed: f64,
    /// Solvable module count (by name).
    pub solvable: usize,
    /// Solved module count (by name).
    pub solved_names: usize,
    /// Solved module count (by id).
    pub solved_ids: usize,
}

impl FixedBomb {
    /// A bomb with the given countdown and no other modules.
    #[must_use]
    pub fn new(time_remaining: f64) -> Self {
        Self {
            time_remaining,
            elapsed: 0.0,
            solvable: 1,
            solved_names: 0,
            solved_ids: 0,
        }
    }

    /// Set the module counters (builder pattern).
    #[must_use]
    pub fn with_modules(mut self, solvable: usize, solved_names: usize, solved_ids: usize) -> Self {
        self.solvable = solvable;
        self.solved_names = solved_names;
        self.solved_ids = solved_ids;
        self
    }

    /// Let `dt` seconds pass: the clock moves forward and the countdown down.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        self.time_remaining = (self.time_remaining - dt).max(0.0);
    }
}

impl BombInfo for FixedBomb {
    fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    fn solvable_module_count(&self) -> usize {
        self.solvable
    }

    fn solved_module_name_count(&self) -> usize {
        self.solved_names
    }

    fn solved_module_id_count(&self) -> usize {
        self.solved_ids
    }
}

impl Clock for FixedBomb {
    fn now(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_places() {
        // 12:34 -> 754 seconds
        let reading = TimerReading::from_seconds(754.9);
        assert_eq!(reading.total_seconds, 754);
        assert_eq!(reading.digit(0), 4);
        assert_eq!(reading.digit(1), 3);
        assert_eq!(reading.digit(2), 2);
        assert_eq!(reading.digit(3), 1);
        assert_eq!(reading.digit(4), 0);
        assert_eq!(reading.seconds_of_minute(), 34);
    }

    #[test]
    fn test_negative_and_nan_read_zero() {
        assert_eq!(TimerReading::from_seconds(-3.0).total_seconds, 0);
        assert_eq!(TimerReading::from_seconds(f64::NAN).total_seconds, 0);
    }

    #[test]
    fn test_fixed_bomb_advance_clamps() {
        let mut bomb = FixedBomb::new(1.0);
        bomb.advance(5.0);
        assert_eq!(bomb.time_remaining(), 0.0);
        assert_eq!(bomb.now(), 5.0);
    }

    #[test]
    fn test_fixed_bomb_counters() {
        let bomb = FixedBomb::new(60.0).with_modules(11, 4, 5);
        assert_eq!(bomb.solvable_module_count(), 11);
        assert_eq!(bomb.solved_module_name_count(), 4);
        assert_eq!(bomb.solved_module_id_count(), 5);
    }
}
