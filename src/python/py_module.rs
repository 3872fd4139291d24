//! Module bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::command::{
    CommandInterpreter, CommandOutput, CommandRun, ForcedSolve, RunStatus, SolveStatus,
};
use crate::core::{FixedBomb, ModuleConfig};
use crate::puzzle::{DirectionalButton, PuzzleSnapshot, UncapResponse};

/// Python wrapper for FixedBomb.
///
/// A bomb whose readings are set directly by the caller.
#[pyclass(name = "Bomb")]
#[derive(Clone, Debug)]
pub struct PyFixedBomb(pub FixedBomb);

#[pymethods]
impl PyFixedBomb {
    /// Create a bomb.
    ///
    /// # Arguments
    /// - time_remaining: Countdown in seconds
    /// - solvable: Solvable module count
    /// - solved_names: Solved module count (by name)
    /// - solved_ids: Solved module count (by id)
    #[new]
    #[pyo3(signature = (time_remaining = 300.0, solvable = 1, solved_names = 0, solved_ids = 0))]
    fn new(time_remaining: f64, solvable: usize, solved_names: usize, solved_ids: usize) -> Self {
        Self(FixedBomb::new(time_remaining).with_modules(solvable, solved_names, solved_ids))
    }

    /// Let `dt` seconds pass.
    fn advance(&mut self, dt: f64) {
        self.0.advance(dt);
    }

    #[getter]
    fn time_remaining(&self) -> f64 {
        self.0.time_remaining
    }

    #[setter]
    fn set_time_remaining(&mut self, value: f64) {
        self.0.time_remaining = value;
    }

    #[getter]
    fn elapsed(&self) -> f64 {
        self.0.elapsed
    }

    #[getter]
    fn solvable(&self) -> usize {
        self.0.solvable
    }

    #[setter]
    fn set_solvable(&mut self, value: usize) {
        self.0.solvable = value;
    }

    #[getter]
    fn solved_names(&self) -> usize {
        self.0.solved_names
    }

    #[setter]
    fn set_solved_names(&mut self, value: usize) {
        self.0.solved_names = value;
    }

    #[getter]
    fn solved_ids(&self) -> usize {
        self.0.solved_ids
    }

    #[setter]
    fn set_solved_ids(&mut self, value: usize) {
        self.0.solved_ids = value;
    }

    fn __repr__(&self) -> String {
        format!(
            "Bomb(time_remaining={:.2}, solvable={}, solved={})",
            self.0.time_remaining, self.0.solvable, self.0.solved_names
        )
    }
}

/// Python wrapper for a Directional Button module.
///
/// Bundles the puzzle with a command interpreter, the pending remote
/// command and an optional forced solve, all advanced by `tick`.
#[pyclass(name = "DirectionalButton")]
pub struct PyDirectionalButton {
    module: DirectionalButton,
    interpreter: CommandInterpreter,
    pending: Option<CommandRun>,
    solver: Option<ForcedSolve>,
    awarded_points: u32,
}

#[pymethods]
impl PyDirectionalButton {
    /// Create a module.
    ///
    /// # Arguments
    /// - rule_seed: Seed for the manual (press table and rules)
    /// - session_seed: Seed for arrows and buttons (default: rule_seed)
    /// - hold_threshold: Seconds the button must be held before release
    #[new]
    #[pyo3(signature = (rule_seed = 1, session_seed = None, hold_threshold = 2.0))]
    fn new(rule_seed: u64, session_seed: Option<u64>, hold_threshold: f64) -> PyResult<Self> {
        let mut config = ModuleConfig::new(rule_seed).with_hold_threshold(hold_threshold);
        if let Some(seed) = session_seed {
            config = config.with_session_seed(seed);
        }
        let module = DirectionalButton::new(config)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self::wrap(module))
    }

    /// Rebuild a module from `snapshot()` bytes, configuration included.
    ///
    /// Raises ValueError for bytes that do not decode or describe a state
    /// the module cannot reach.
    #[staticmethod]
    fn restore(data: &[u8]) -> PyResult<Self> {
        let snapshot =
            PuzzleSnapshot::from_bytes(data).map_err(|e| PyValueError::new_err(e.to_string()))?;
        let module =
            DirectionalButton::restore(snapshot).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self::wrap(module))
    }

    /// Serialize the puzzle state.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self
            .module
            .snapshot()
            .to_bytes()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    #[getter]
    fn id(&self) -> u32 {
        self.module.id().raw()
    }

    #[getter]
    fn rule_seed(&self) -> u64 {
        self.module.rules().seed()
    }

    #[getter]
    fn hold_threshold(&self) -> f64 {
        self.module.config().hold_threshold
    }

    #[getter]
    fn up_color(&self) -> &'static str {
        self.module.state().up_color.name()
    }

    #[getter]
    fn down_color(&self) -> &'static str {
        self.module.state().down_color.name()
    }

    #[getter]
    fn button_color(&self) -> &'static str {
        self.module.state().button_color.name()
    }

    #[getter]
    fn label(&self) -> String {
        self.module.state().label.to_string()
    }

    #[getter]
    fn presses(&self) -> u32 {
        self.module.state().presses
    }

    #[getter]
    fn required_presses(&self) -> u32 {
        self.module.state().required_presses
    }

    #[getter]
    fn stages_done(&self) -> u32 {
        self.module.state().stages_done
    }

    #[getter]
    fn stages_required(&self) -> u32 {
        self.module.state().stages_required
    }

    #[getter]
    fn solved(&self) -> bool {
        self.module.is_solved()
    }

    /// Points awarded so far for solving with extra stages.
    #[getter]
    fn awarded_points(&self) -> u32 {
        self.awarded_points
    }

    /// The press table, one row per down-arrow colour.
    fn press_table(&self) -> Vec<Vec<u8>> {
        self.module
            .rules()
            .table()
            .rows()
            .iter()
            .map(|row| row.to_vec())
            .collect()
    }

    /// Current (press, release) rule descriptions.
    fn current_rules(&self) -> (String, String) {
        let pair = self.module.current_rules();
        (pair.press.to_string(), pair.release.to_string())
    }

    fn press(&mut self, bomb: &PyFixedBomb) {
        self.module.press(&bomb.0);
    }

    fn release(&mut self, bomb: &PyFixedBomb) {
        self.module.release(&bomb.0);
    }

    fn press_up(&mut self, bomb: &PyFixedBomb) {
        self.module.press_up(&bomb.0);
    }

    fn press_down(&mut self, bomb: &PyFixedBomb) {
        self.module.press_down(&bomb.0);
    }

    /// Ask for more stages. Returns one of "requested", "confirmed",
    /// "refused" or "ignored".
    fn request_uncap(&mut self) -> &'static str {
        match self.module.request_uncap() {
            UncapResponse::ConfirmationRequested { .. } => "requested",
            UncapResponse::Confirmed { .. } => "confirmed",
            UncapResponse::Refused => "refused",
            UncapResponse::Ignored => "ignored",
        }
    }

    /// Send a remote command. Returns false if it was not accepted.
    ///
    /// The command replaces any still-pending one and runs on the next tick.
    fn send_command(&mut self, text: &str) -> bool {
        match self.interpreter.handle(text) {
            Some(run) => {
                self.pending = Some(run);
                true
            }
            None => false,
        }
    }

    /// Cancel a pending timed command.
    fn cancel_command(&mut self) {
        if let Some(run) = self.pending.as_mut() {
            run.cancel();
        }
    }

    /// Start solving the module automatically.
    fn force_solve(&mut self) {
        if self.solver.is_none() {
            self.solver = Some(ForcedSolve::new(&self.interpreter));
        }
    }

    /// Advance one scheduler tick. Returns chat messages produced.
    fn tick(&mut self, bomb: &PyFixedBomb) -> Vec<String> {
        let mut chat = Vec::new();
        self.module.tick(&bomb.0);

        if let Some(run) = self.pending.as_mut() {
            match self.interpreter.poll(run, &mut self.module, &bomb.0) {
                RunStatus::Waiting => {}
                RunStatus::Cancelled => self.pending = None,
                RunStatus::Completed(outputs) => {
                    for output in outputs {
                        match output {
                            CommandOutput::SendToChat(msg) => chat.push(msg),
                            CommandOutput::AwardPointsOnSolve(points) => {
                                self.awarded_points += points
                            }
                        }
                    }
                    self.pending = None;
                }
            }
        }

        if let Some(solver) = self.solver.as_mut() {
            let status = solver.poll(&mut self.interpreter, &mut self.module, &bomb.0);
            if status != SolveStatus::Working {
                self.solver = None;
            }
        }

        chat
    }

    /// Drain queued events as their debug strings.
    fn drain_events(&mut self) -> Vec<String> {
        self.module
            .drain_events()
            .into_iter()
            .map(|e| format!("{:?}", e))
            .collect()
    }

    fn __repr__(&self) -> String {
        let state = self.module.state();
        format!(
            "DirectionalButton(id={}, button={} {}, stages={}/{}, solved={})",
            self.module.id(),
            state.button_color,
            state.label,
            state.stages_done,
            state.stages_required,
            state.solved
        )
    }
}

impl PyDirectionalButton {
    fn wrap(module: DirectionalButton) -> Self {
        Self {
            module,
            interpreter: CommandInterpreter::new(),
            pending: None,
            solver: None,
            awarded_points: 0,
        }
    }
}
