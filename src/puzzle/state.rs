//! Puzzle state.
//!
//! ## PuzzleState
//!
//! Everything that changes while the module is played:
//! - Arrow and button faces, and the rule slot the button selects
//! - Press and stage counters
//! - Strike leeway and the hold in progress
//! - The pending uncap confirmation
//! - Indicator lights and the strike flash
//!
//! The rule set is not part of it; it is fixed by the rule seed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Color, ConfigError, GameRngState, ModuleConfig};
use crate::rules::PressTable;

use super::indicator::{Indicators, StrikeFlash};
use super::label::ButtonLabel;

/// Whether the main button is down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ButtonPhase {
    /// Not held.
    #[default]
    Idle,
    /// Held since the given scheduling time.
    Held { since: f64 },
}

/// Pending uncap confirmation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UncapDialog {
    /// Nothing pending.
    #[default]
    Idle,
    /// Waiting for confirmation of a raise to `stages`.
    AwaitingConfirmation { stages: u32 },
}

/// Coarse lifecycle phase, for hosts and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzlePhase {
    /// Waiting for input.
    Idle,
    /// Main button held.
    Held,
    /// Strike flash running.
    Striking,
    /// Solved; inputs are ignored.
    Solved,
}

/// Mutable state of one puzzle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleState {
    /// Up arrow colour.
    pub up_color: Color,
    /// Down arrow colour.
    pub down_color: Color,
    /// Main button colour.
    pub button_color: Color,
    /// Main button label.
    pub label: ButtonLabel,
    /// Rule slot selected by the button.
    pub rule_index: usize,

    /// Correct button presses this stage.
    pub presses: u32,
    /// Presses required before an arrow may be pressed.
    pub required_presses: u32,
    /// Stages cleared.
    pub stages_done: u32,
    /// Stages needed to solve.
    pub stages_required: u32,

    /// Terminal flag.
    pub solved: bool,
    /// Suppresses further strikes until the next button press.
    pub strike_leeway: bool,
    /// Main button hold.
    pub button: ButtonPhase,
    /// Uncap confirmation.
    pub uncap: UncapDialog,

    /// Stage lights.
    pub indicators: Indicators,
    /// Strike flash timer.
    pub flash: StrikeFlash,
}

impl PuzzleState {
    /// State before the first draw.
    #[must_use]
    pub fn new(initial_stages: u32) -> Self {
        Self {
            up_color: Color::Black,
            down_color: Color::Black,
            button_color: Color::Black,
            label: ButtonLabel::default(),
            rule_index: 0,
            presses: 0,
            required_presses: 0,
            stages_done: 0,
            stages_required: initial_stages,
            solved: false,
            strike_leeway: false,
            button: ButtonPhase::Idle,
            uncap: UncapDialog::Idle,
            indicators: Indicators::default(),
            flash: StrikeFlash::default(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> PuzzlePhase {
        if self.solved {
            PuzzlePhase::Solved
        } else if matches!(self.button, ButtonPhase::Held { .. }) {
            PuzzlePhase::Held
        } else if self.flash.is_active() {
            PuzzlePhase::Striking
        } else {
            PuzzlePhase::Idle
        }
    }
}

/// A snapshot that cannot be resumed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RestoreError {
    /// The stored configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The rule slot does not match the stored button.
    #[error("rule index {found} does not match the button (expected {expected})")]
    RuleIndexMismatch { found: usize, expected: usize },

    /// The required presses do not match the table entry for the arrows.
    #[error("required presses {found} do not match the press table (expected {expected})")]
    RequiredPressesMismatch { found: u32, expected: u32 },

    /// Stage count cannot be reached through uncaps.
    #[error("stages required {stages} is not reachable from {initial} up to {max}")]
    StagesOutOfRange { stages: u32, initial: u32, max: u32 },

    /// More stages cleared than required.
    #[error("stages done {done} exceeds stages required {required}")]
    StagesDoneOutOfRange { done: u32, required: u32 },

    /// A pending uncap that confirming would push past the maximum.
    #[error("pending uncap to {stages} is invalid with {required} required and a maximum of {max}")]
    UncapOutOfRange { stages: u32, required: u32, max: u32 },
}

/// Serializable snapshot: configuration, puzzle state and the gameplay RNG
/// position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    /// Configuration the puzzle runs with, rule seed included.
    pub config: ModuleConfig,
    /// Puzzle state.
    pub state: PuzzleState,
    /// Gameplay RNG position.
    pub rng: GameRngState,
}

impl PuzzleSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode with bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// Check that the state is one the puzzle can reach under `config` and
    /// the rule set's `table`.
    pub fn validate(&self, table: &PressTable) -> Result<(), RestoreError> {
        let config = &self.config;
        let state = &self.state;
        config.validate()?;

        let expected = state.label.rule_index(state.button_color);
        if state.rule_index != expected {
            return Err(RestoreError::RuleIndexMismatch {
                found: state.rule_index,
                expected,
            });
        }

        let expected = u32::from(table.required(state.down_color, state.up_color));
        if state.required_presses != expected {
            return Err(RestoreError::RequiredPressesMismatch {
                found: state.required_presses,
                expected,
            });
        }

        let stages = state.stages_required;
        if stages < config.initial_stages
            || stages > config.max_stages
            || (stages - config.initial_stages) % config.uncap_step != 0
        {
            return Err(RestoreError::StagesOutOfRange {
                stages,
                initial: config.initial_stages,
                max: config.max_stages,
            });
        }
        if state.stages_done > stages {
            return Err(RestoreError::StagesDoneOutOfRange {
                done: state.stages_done,
                required: stages,
            });
        }

        if let UncapDialog::AwaitingConfirmation { stages: pending } = state.uncap {
            if pending != stages + config.uncap_step || pending > config.max_stages {
                return Err(RestoreError::UncapOutOfRange {
                    stages: pending,
                    required: stages,
                    max: config.max_stages,
                });
            }
        }

        Ok(())
    }
}
