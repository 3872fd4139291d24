//! # directional-button
//!
//! Puzzle engine for the Bamboozling Directional Button bomb module: a main
//! button with a colour and a label, two coloured arrow buttons, and a
//! seed-randomised rule set deciding which presses are correct.
//!
//! ## Design Principles
//!
//! 1. **Seed-Reproducible**: The rule seed alone fixes the required-press
//!    table and the active rules. Same seed, same manual.
//!
//! 2. **Headless**: Rendering, audio and input hit-testing belong to the
//!    host. The puzzle reads the bomb through [`core::Environment`] and
//!    reports through [`puzzle::ModuleEvent`].
//!
//! 3. **Single Actor**: Every operation runs to completion. Background work
//!    (strike flash, timed commands, forced solve) is an explicit state
//!    object the host polls once per tick.
//!
//! ## Modules
//!
//! - `core`: Colours, ids, RNG, configuration, host environment
//! - `rules`: Rule predicates, the press table and the seeded generator
//! - `puzzle`: The state machine players interact with
//! - `command`: Remote command interpreter and forced solve
//!
//! ## Example
//!
//! ```
//! use directional_button::{DirectionalButton, FixedBomb, ModuleConfig, ModuleEvent};
//!
//! let mut module = DirectionalButton::new(ModuleConfig::new(42)).unwrap();
//! let bomb = FixedBomb::new(300.0);
//!
//! module.press_down(&bomb);
//! let events = module.drain_events();
//! assert!(events.iter().any(ModuleEvent::is_strike));
//! ```

pub mod command;
pub mod core;
pub mod puzzle;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    BombInfo, Clock, Color, ConfigError, Environment, FixedBomb, GameRng, GameRngState,
    ModuleConfig, ModuleId, TimerReading,
};

pub use crate::rules::{
    PressTable, RuleConstants, RuleContext, RuleEvaluator, RuleKind, RulePair, RuleSet,
};

pub use crate::puzzle::{
    Arrow, ButtonLabel, DirectionalButton, Light, ModuleEvent, PuzzlePhase, PuzzleSnapshot,
    PuzzleState, RestoreError, UncapResponse,
};

pub use crate::command::{
    Command, CommandInterpreter, CommandOutput, CommandRun, ForcedSolve, RunStatus, SolveStatus,
};
