//! Headless model of the stage indicator lights and the strike flash.
//!
//! Renderers read [`Indicators`]; the puzzle only decides which state each
//! light is in.

use serde::{Deserialize, Serialize};

/// Number of stage lights on the module.
pub const LIGHT_COUNT: usize = 3;

/// State of one stage light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Light {
    /// Dark.
    #[default]
    Off,
    /// Grey: presses under way for this stage.
    Pending,
    /// Green: a stage was cleared.
    Cleared,
    /// Red: strike flash.
    Struck,
}

/// The row of stage lights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    lights: [Light; LIGHT_COUNT],
}

impl Indicators {
    /// All lights.
    #[must_use]
    pub fn lights(&self) -> &[Light; LIGHT_COUNT] {
        &self.lights
    }

    /// Mark lights from `first` onwards as pending.
    pub fn mark_pending_from(&mut self, first: usize) {
        for light in self.lights.iter_mut().skip(first) {
            *light = Light::Pending;
        }
    }

    /// Set every light.
    pub fn set_all(&mut self, light: Light) {
        self.lights = [light; LIGHT_COUNT];
    }
}

/// Timer for the red strike flash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrikeFlash {
    ends_at: Option<f64>,
}

impl StrikeFlash {
    /// Start (or restart) a flash lasting `duration` from `now`.
    pub fn start(&mut self, now: f64, duration: f64) {
        self.ends_at = Some(now + duration);
    }

    /// True while a flash is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.ends_at.is_some()
    }

    /// Advance to `now`. Returns true exactly once, when the flash ends.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.ends_at {
            Some(end) if now >= end => {
                self.ends_at = None;
                true
            }
            _ => false,
        }
    }
}
