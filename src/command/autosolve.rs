//! Forced solve.
//!
//! When a remote session gives up on a module, the host asks it to solve
//! itself. [`ForcedSolve`] drives the puzzle through the public operations,
//! waiting for the rules the way a careful player would:
//!
//! 1. release a button left held by the interpreter, once allowed
//! 2. press whenever the press rule holds, release whenever allowed,
//!    until the required presses are reached
//! 3. press the arrow with matching parity
//! 4. repeat until solved
//!
//! The driver is polled once per scheduler tick like any other run.

use tracing::info;

use crate::core::Environment;
use crate::puzzle::{Arrow, ButtonPhase, DirectionalButton};

use super::interpreter::CommandInterpreter;

/// Progress of a forced solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// More ticks are needed.
    Working,
    /// The module is solved.
    Solved,
    /// The module is in a state the driver cannot recover from.
    Abandoned,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    ReleaseHeld,
    Plan,
    AwaitPress,
    AwaitRelease,
}

/// Tick-driven solver for one module.
#[derive(Clone, Debug, PartialEq)]
pub struct ForcedSolve {
    step: Step,
    resume_at: f64,
}

impl ForcedSolve {
    /// Start a solve. A button held through `interpreter` is released first.
    #[must_use]
    pub fn new(interpreter: &CommandInterpreter) -> Self {
        Self {
            step: if interpreter.held() { Step::ReleaseHeld } else { Step::Plan },
            resume_at: f64::NEG_INFINITY,
        }
    }

    /// Advance by one tick.
    pub fn poll<E: Environment + ?Sized>(
        &mut self,
        interpreter: &mut CommandInterpreter,
        module: &mut DirectionalButton,
        env: &E,
    ) -> SolveStatus {
        let delay = module.config().solver_step_delay;

        loop {
            if env.now() < self.resume_at {
                return SolveStatus::Working;
            }

            match self.step {
                Step::ReleaseHeld => {
                    if !matches!(module.state().button, ButtonPhase::Held { .. }) {
                        interpreter.set_held(false);
                        self.step = Step::Plan;
                        continue;
                    }
                    if !module.release_allowed(env) {
                        return SolveStatus::Working;
                    }
                    module.release(env);
                    interpreter.set_held(false);
                    self.step = Step::Plan;
                }

                Step::Plan => {
                    if module.is_solved() {
                        info!(module = %module.id(), "forced solve finished");
                        return SolveStatus::Solved;
                    }
                    let presses = module.state().presses;
                    let required = module.state().required_presses;
                    if presses > required {
                        return SolveStatus::Abandoned;
                    }
                    if presses < required {
                        self.step = Step::AwaitPress;
                    } else {
                        module.press_arrow(Arrow::for_presses(presses), env);
                        self.resume_at = env.now() + delay;
                    }
                }

                Step::AwaitPress => {
                    if !module.press_rule_holds(env) {
                        return SolveStatus::Working;
                    }
                    module.press(env);
                    self.resume_at = env.now() + delay;
                    self.step = Step::AwaitRelease;
                }

                Step::AwaitRelease => {
                    if !module.release_allowed(env) {
                        return SolveStatus::Working;
                    }
                    module.release(env);
                    self.resume_at = env.now() + delay;
                    self.step = Step::Plan;
                }
            }
        }
    }
}
