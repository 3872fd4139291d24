//! Python bindings for the directional-button puzzle engine.
//!
//! These bindings let simulation harnesses drive modules without a game host.
//!
//! # Quick Start
//!
//! ```python
//! import directional_button as db
//!
//! bomb = db.Bomb(time_remaining=300.0, solvable=10, solved_names=5, solved_ids=5)
//! module = db.DirectionalButton(rule_seed=42)
//!
//! module.force_solve()
//! while not module.solved:
//!     module.tick(bomb)
//!     bomb.advance(0.1)
//! ```

use pyo3::prelude::*;

mod py_module;

pub use py_module::*;

/// directional_button: the Bamboozling Directional Button puzzle engine.
#[pymodule]
fn directional_button(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFixedBomb>()?;
    m.add_class::<PyDirectionalButton>()?;
    Ok(())
}
