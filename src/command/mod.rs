//! Remote play.
//!
//! - `parse`: the chat command grammar
//! - `interpreter`: turns commands into puzzle operations, one tick at a time
//! - `autosolve`: drives a module to completion when the host forces a solve
//!
//! Nothing here bypasses the puzzle: every effect goes through the same
//! operations a player triggers by hand.

pub mod autosolve;
pub mod interpreter;
pub mod parse;

pub use autosolve::{ForcedSolve, SolveStatus};
pub use interpreter::{CommandInterpreter, CommandOutput, CommandRun, RunStatus, HELP_MESSAGE};
pub use parse::{Command, Times};
