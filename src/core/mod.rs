//! Core types: colours, instance ids, RNG, configuration, host environment.
//!
//! Nothing in here knows about rules or presses. The rule generator and the
//! puzzle build on these.

pub mod color;
pub mod config;
pub mod environment;
pub mod id;
pub mod rng;

pub use color::Color;
pub use config::{ConfigError, ModuleConfig};
pub use environment::{BombInfo, Clock, Environment, FixedBomb, TimerReading};
pub use id::ModuleId;
pub use rng::{GameRng, GameRngState};
