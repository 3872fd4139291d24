//! Module configuration.
//!
//! Hosts configure a puzzle instance at startup by providing a
//! `ModuleConfig`: the rule seed, the gameplay seed, and the timing and
//! stage constants. Defaults match the standard module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Hold threshold must be a positive, finite number of seconds.
    #[error("hold threshold must be positive and finite, got {0}")]
    InvalidHoldThreshold(f64),

    /// A delay or duration must be non-negative and finite.
    #[error("{name} must be non-negative and finite, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },

    /// A module needs at least one stage.
    #[error("initial stage count must be at least 1")]
    NoStages,

    /// Uncapping must add at least one stage.
    #[error("uncap step must be at least 1")]
    ZeroUncapStep,

    /// The maximum cannot be reached from the initial count in whole steps.
    #[error("max stages {max} is not reachable from {initial} in steps of {step}")]
    UnreachableMaxStages { initial: u32, step: u32, max: u32 },
}

/// Complete module configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Seed for the required-press table and the rule assignment.
    pub rule_seed: u64,

    /// Seed for arrow colours, button colours and labels.
    pub session_seed: u64,

    /// Minimum seconds the main button must be held before release.
    pub hold_threshold: f64,

    /// Seconds the strike indicator stays lit.
    pub strike_flash_secs: f64,

    /// Stages required before any uncap.
    pub initial_stages: u32,

    /// Stages added per confirmed uncap.
    pub uncap_step: u32,

    /// Upper bound for stages required.
    pub max_stages: u32,

    /// Bonus points per stage beyond the first, awarded on a remote solve.
    pub bonus_points_per_stage: u32,

    /// Pause between inputs issued by the forced-solve driver.
    pub solver_step_delay: f64,
}

impl ModuleConfig {
    /// Default configuration for a rule seed.
    ///
    /// The session seed defaults to the rule seed; override it to vary
    /// gameplay draws under a fixed rule set.
    #[must_use]
    pub fn new(rule_seed: u64) -> Self {
        Self {
            rule_seed,
            session_seed: rule_seed,
            hold_threshold: 2.0,
            strike_flash_secs: 1.0,
            initial_stages: 1,
            uncap_step: 2,
            max_stages: 5,
            bonus_points_per_stage: 8,
            solver_step_delay: 0.1,
        }
    }

    /// Set the gameplay seed.
    #[must_use]
    pub fn with_session_seed(mut self, seed: u64) -> Self {
        self.session_seed = seed;
        self
    }

    /// Set the minimum hold time.
    #[must_use]
    pub fn with_hold_threshold(mut self, seconds: f64) -> Self {
        self.hold_threshold = seconds;
        self
    }

    /// Set the strike flash duration.
    #[must_use]
    pub fn with_strike_flash(mut self, seconds: f64) -> Self {
        self.strike_flash_secs = seconds;
        self
    }

    /// Set initial stages, uncap step and maximum together.
    #[must_use]
    pub fn with_stages(mut self, initial: u32, step: u32, max: u32) -> Self {
        self.initial_stages = initial;
        self.uncap_step = step;
        self.max_stages = max;
        self
    }

    /// Check every value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hold_threshold.is_finite() && self.hold_threshold > 0.0) {
            return Err(ConfigError::InvalidHoldThreshold(self.hold_threshold));
        }
        for (name, value) in [
            ("strike flash duration", self.strike_flash_secs),
            ("solver step delay", self.solver_step_delay),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        if self.initial_stages == 0 {
            return Err(ConfigError::NoStages);
        }
        if self.uncap_step == 0 {
            return Err(ConfigError::ZeroUncapStep);
        }
        if self.max_stages < self.initial_stages
            || (self.max_stages - self.initial_stages) % self.uncap_step != 0
        {
            return Err(ConfigError::UnreachableMaxStages {
                initial: self.initial_stages,
                step: self.uncap_step,
                max: self.max_stages,
            });
        }
        Ok(())
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
