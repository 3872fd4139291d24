//! The puzzle state machine.
//!
//! A [`DirectionalButton`] combines a seeded [`RuleSet`](crate::rules::RuleSet)
//! with per-instance gameplay state:
//!
//! - `state`: counters, faces, hold, uncap dialog
//! - `label`: button labels and the rule slot they select
//! - `indicator`: stage lights and the strike flash
//! - `event`: signals queued for the host
//! - `module`: the operations players (and remote commands) invoke

pub mod event;
pub mod indicator;
pub mod label;
pub mod module;
pub mod state;

pub use event::ModuleEvent;
pub use indicator::{Indicators, Light, StrikeFlash};
pub use label::{ButtonLabel, InvalidLabel};
pub use module::{Arrow, DirectionalButton, UncapResponse};
pub use state::{
    ButtonPhase, PuzzlePhase, PuzzleSnapshot, PuzzleState, RestoreError, UncapDialog,
};
