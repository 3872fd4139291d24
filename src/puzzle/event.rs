//! Signals the puzzle sends to its host.
//!
//! The puzzle never calls into the host. Every observable outcome is queued
//! as a [`ModuleEvent`] and collected with
//! [`DirectionalButton::drain_events`](super::DirectionalButton::drain_events).

use serde::{Deserialize, Serialize};

use crate::core::Color;

use super::label::ButtonLabel;

/// Something the host should react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleEvent {
    /// A strike was issued.
    Strike {
        /// Human-readable cause.
        reason: String,
    },

    /// A stage was cleared but more remain.
    StageCleared {
        stages_done: u32,
        stages_required: u32,
    },

    /// The module is solved. Sent once.
    Solved,

    /// New arrow colours were drawn.
    ArrowsGenerated {
        up: Color,
        down: Color,
        required_presses: u8,
    },

    /// A new button face was drawn.
    ButtonGenerated { color: Color, label: ButtonLabel },

    /// An uncap was confirmed.
    UncapApplied { stages_required: u32 },
}

impl ModuleEvent {
    /// True for strike events.
    #[must_use]
    pub fn is_strike(&self) -> bool {
        matches!(self, ModuleEvent::Strike { .. })
    }
}
