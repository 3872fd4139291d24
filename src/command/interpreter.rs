//! Remote command interpreter.
//!
//! Turns chat commands into the same operations a player triggers by hand.
//! A recognised command becomes a [`CommandRun`]; the host polls it once per
//! scheduler tick until it completes. Timed runs wait for the countdown and
//! may be cancelled while waiting.
//!
//! ## Example
//!
//! ```
//! use directional_button::command::{CommandInterpreter, RunStatus};
//! use directional_button::core::{FixedBomb, ModuleConfig};
//! use directional_button::puzzle::DirectionalButton;
//!
//! let mut module = DirectionalButton::new(ModuleConfig::new(1)).unwrap();
//! let mut interpreter = CommandInterpreter::new();
//! let bomb = FixedBomb::new(300.0);
//!
//! let mut run = interpreter.handle("uncap").unwrap();
//! let status = interpreter.poll(&mut run, &mut module, &bomb);
//! assert!(matches!(status, RunStatus::Completed(_)));
//! assert!(interpreter.uncap_check());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Environment, TimerReading};
use crate::puzzle::{Arrow, DirectionalButton, UncapResponse};

use super::parse::{Command, Times};

/// Help text shown to chat. `{0}` stands for the module's chat id.
pub const HELP_MESSAGE: &str = "Use \"!{0} press ## ## ##\" to press the button at any of those times. \
Use \"!{0} release ## ## ##\" to release the button at any of those times. \
Use \"!{0} press up\" or \"!{0} press down\" to press that arrow button. \
Use \"!{0} uncap\" to break your soul.";

/// Output for the remote-play host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutput {
    /// Post a message to chat.
    SendToChat(String),
    /// Award bonus points to whoever solved the module.
    AwardPointsOnSolve(u32),
}

/// Result of polling a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Still waiting for the countdown; may be cancelled.
    Waiting,
    /// The action was performed.
    Completed(Vec<CommandOutput>),
    /// The run was cancelled before acting.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunAction {
    Press,
    Release,
    Arrow(Arrow),
    RequestUncap,
    ResolveUncap { confirm: bool },
}

/// A command accepted by the interpreter, waiting to be polled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRun {
    action: RunAction,
    times: Times,
    cancelled: bool,
    finished: bool,
}

impl CommandRun {
    fn immediate(action: RunAction) -> Self {
        Self::at(action, Times::new())
    }

    fn at(action: RunAction, times: Times) -> Self {
        Self {
            action,
            times,
            cancelled: false,
            finished: false,
        }
    }

    /// Ask a timed run to stop. Checked at every poll before acting;
    /// immediate runs do not wait and ignore it.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Seconds-of-minute this run waits for. Empty for immediate runs.
    #[must_use]
    pub fn times(&self) -> &[u8] {
        &self.times
    }

    /// True once the run has completed or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn ready<E: Environment + ?Sized>(&self, env: &E) -> bool {
        if self.times.is_empty() {
            return true;
        }
        let now = TimerReading::from_seconds(env.time_remaining()).seconds_of_minute();
        self.times.contains(&now)
    }
}

/// Per-module interpreter state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInterpreter {
    held: bool,
    uncap_check: bool,
}

impl CommandInterpreter {
    /// Create an interpreter with the button released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the button was pressed through this interpreter and not yet released.
    #[must_use]
    pub fn held(&self) -> bool {
        self.held
    }

    /// Whether an uncap confirmation is pending.
    #[must_use]
    pub fn uncap_check(&self) -> bool {
        self.uncap_check
    }

    pub(crate) fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    /// Accept or ignore a command. Returns `None` when the text is not a
    /// command or not valid in the current state.
    ///
    /// While an uncap confirmation is pending every text is accepted: `uncap`
    /// confirms and anything else cancels.
    #[must_use]
    pub fn handle(&self, text: &str) -> Option<CommandRun> {
        let command = Command::parse(text);

        if self.uncap_check {
            let confirm = command == Some(Command::Uncap);
            return Some(CommandRun::immediate(RunAction::ResolveUncap { confirm }));
        }

        let run = match command? {
            Command::Press(times) if !self.held => CommandRun::at(RunAction::Press, times),
            Command::Release(times) if self.held => CommandRun::at(RunAction::Release, times),
            Command::PressArrow(arrow) if !self.held => {
                CommandRun::immediate(RunAction::Arrow(arrow))
            }
            Command::Uncap => CommandRun::immediate(RunAction::RequestUncap),
            _ => return None,
        };
        let accepted = text.trim();
        debug!(command = %accepted, "accepted command");
        Some(run)
    }

    /// Parse and accept in one step, then poll until the run finishes.
    /// Only useful for immediate commands; timed runs return after the
    /// first poll that waits.
    pub fn execute<E: Environment + ?Sized>(
        &mut self,
        text: &str,
        module: &mut DirectionalButton,
        env: &E,
    ) -> Option<RunStatus> {
        let mut run = self.handle(text)?;
        Some(self.poll(&mut run, module, env))
    }

    /// Advance a run by one scheduler tick.
    pub fn poll<E: Environment + ?Sized>(
        &mut self,
        run: &mut CommandRun,
        module: &mut DirectionalButton,
        env: &E,
    ) -> RunStatus {
        if run.finished {
            return RunStatus::Completed(Vec::new());
        }

        if !run.times.is_empty() && run.cancelled {
            run.finished = true;
            return RunStatus::Cancelled;
        }
        if !run.ready(env) {
            return RunStatus::Waiting;
        }

        run.finished = true;
        RunStatus::Completed(self.perform(run.action, module, env))
    }

    fn perform<E: Environment + ?Sized>(
        &mut self,
        action: RunAction,
        module: &mut DirectionalButton,
        env: &E,
    ) -> Vec<CommandOutput> {
        let mut out = Vec::new();

        match action {
            RunAction::Press => {
                module.press(env);
                self.held = true;
            }

            RunAction::Release => {
                module.release(env);
                self.held = false;
            }

            RunAction::Arrow(arrow) => {
                let stages = module.state().stages_required;
                let was_solved = module.is_solved();
                module.press_arrow(arrow, env);
                if !was_solved && module.is_solved() && stages > 1 {
                    let points = module.config().bonus_points_per_stage * (stages - 1);
                    out.push(CommandOutput::AwardPointsOnSolve(points));
                }
            }

            RunAction::RequestUncap => {
                let initial = module.config().initial_stages;
                let current = module.state().stages_required;
                match module.request_uncap() {
                    UncapResponse::ConfirmationRequested { stages } => {
                        self.uncap_check = true;
                        out.push(chat(uncap_prompt(current == initial, stages)));
                    }
                    UncapResponse::Confirmed { .. } => out.push(chat("You've asked for it...")),
                    UncapResponse::Refused => out.push(chat("No more.")),
                    UncapResponse::Ignored => {}
                }
            }

            RunAction::ResolveUncap { confirm } => {
                self.uncap_check = false;
                let confirmed = confirm
                    && matches!(module.request_uncap(), UncapResponse::Confirmed { .. });
                if confirmed {
                    out.push(chat("You've asked for it..."));
                } else {
                    module.cancel_uncap();
                    out.push(chat("Aborting uncap."));
                }
            }
        }

        out
    }
}

fn chat(text: impl Into<String>) -> CommandOutput {
    CommandOutput::SendToChat(text.into())
}

fn uncap_prompt(first: bool, stages: u32) -> String {
    if first {
        format!(
            "Are you sure about that? Send the command again to confirm, or any other command to cancel. (You will get {} stages.)",
            stages
        )
    } else {
        format!("Again? Are you sure? (You will get {} stages.)", stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedBomb, ModuleConfig};

    fn setup() -> (CommandInterpreter, DirectionalButton, FixedBomb) {
        let module = DirectionalButton::new(ModuleConfig::new(11)).unwrap();
        (CommandInterpreter::new(), module, FixedBomb::new(600.0))
    }

    #[test]
    fn test_unrecognised_is_ignored() {
        let (interp, _, _) = setup();
        assert!(interp.handle("dance").is_none());
    }

    #[test]
    fn test_press_then_release_gating() {
        let (mut interp, mut module, bomb) = setup();

        assert!(interp.handle("release").is_none());
        assert!(interp.execute("press", &mut module, &bomb).is_some());
        assert!(interp.held());

        assert!(interp.handle("press").is_none());
        assert!(interp.handle("press up").is_none());
        assert!(interp.handle("release").is_some());
    }

    #[test]
    fn test_timed_press_waits_for_seconds() {
        let (mut interp, mut module, mut bomb) = setup();
        // 10:00 -> seconds-of-minute 0
        let mut run = interp.handle("press 57").unwrap();

        assert_eq!(interp.poll(&mut run, &mut module, &bomb), RunStatus::Waiting);
        bomb.advance(1.0);
        assert_eq!(interp.poll(&mut run, &mut module, &bomb), RunStatus::Waiting);
        assert!(!interp.held());

        bomb.advance(2.0);
        assert!(matches!(
            interp.poll(&mut run, &mut module, &bomb),
            RunStatus::Completed(_)
        ));
        assert!(interp.held());
        assert!(run.is_finished());
    }

    #[test]
    fn test_cancel_aborts_wait() {
        let (mut interp, mut module, bomb) = setup();
        let mut run = interp.handle("press 30").unwrap();
        module.drain_events();

        run.cancel();
        assert_eq!(interp.poll(&mut run, &mut module, &bomb), RunStatus::Cancelled);
        assert!(!interp.held());
        assert!(module.drain_events().is_empty());
    }

    #[test]
    fn test_uncap_dialog() {
        let (mut interp, mut module, bomb) = setup();

        let status = interp.execute("uncap", &mut module, &bomb).unwrap();
        assert_eq!(
            status,
            RunStatus::Completed(vec![chat(
                "Are you sure about that? Send the command again to confirm, or any other command to cancel. (You will get 3 stages.)"
            )])
        );

        let status = interp.execute("uncap", &mut module, &bomb).unwrap();
        assert_eq!(status, RunStatus::Completed(vec![chat("You've asked for it...")]));
        assert_eq!(module.state().stages_required, 3);

        let status = interp.execute("uncap", &mut module, &bomb).unwrap();
        assert_eq!(
            status,
            RunStatus::Completed(vec![chat("Again? Are you sure? (You will get 5 stages.)")])
        );
        interp.execute("UNCAP", &mut module, &bomb);
        assert_eq!(module.state().stages_required, 5);

        let status = interp.execute("uncap", &mut module, &bomb).unwrap();
        assert_eq!(status, RunStatus::Completed(vec![chat("No more.")]));
        assert!(!interp.uncap_check());
    }

    #[test]
    fn test_other_text_aborts_uncap() {
        let (mut interp, mut module, bomb) = setup();
        interp.execute("uncap", &mut module, &bomb);

        let status = interp.execute("something else", &mut module, &bomb).unwrap();
        assert_eq!(status, RunStatus::Completed(vec![chat("Aborting uncap.")]));
        assert!(!interp.uncap_check());
        assert!(!module.uncap_pending());
        assert_eq!(module.state().stages_required, 1);
    }

    #[test]
    fn test_pending_uncap_blocks_press() {
        let (mut interp, mut module, bomb) = setup();
        interp.execute("uncap", &mut module, &bomb);

        module.drain_events();
        let status = interp.execute("press", &mut module, &bomb).unwrap();
        assert_eq!(status, RunStatus::Completed(vec![chat("Aborting uncap.")]));
        assert!(!interp.held());
        assert!(module.drain_events().is_empty());
    }
}
