//! The directional button state machine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    Clock, Color, ConfigError, Environment, GameRng, ModuleConfig, ModuleId, TimerReading,
};
use crate::rules::{RuleContext, RuleEvaluator, RulePair, RuleSet};

use super::event::ModuleEvent;
use super::indicator::Light;
use super::label::ButtonLabel;
use super::state::{
    ButtonPhase, PuzzlePhase, PuzzleSnapshot, PuzzleState, RestoreError, UncapDialog,
};

/// One of the two directional sub-buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arrow {
    Up,
    Down,
}

impl Arrow {
    /// Press-count parity at which this arrow clears a stage.
    #[must_use]
    pub const fn parity(self) -> u32 {
        match self {
            Arrow::Up => 1,
            Arrow::Down => 0,
        }
    }

    /// The arrow that clears a stage after `presses` presses.
    #[must_use]
    pub const fn for_presses(presses: u32) -> Self {
        if presses % 2 == 1 {
            Arrow::Up
        } else {
            Arrow::Down
        }
    }

    fn strike_reason(self) -> &'static str {
        match self {
            Arrow::Up => "Bad up press.",
            Arrow::Down => "Bad down press.",
        }
    }
}

/// Outcome of an uncap request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UncapResponse {
    /// A confirmation is now pending; confirming raises to `stages`.
    ConfirmationRequested { stages: u32 },
    /// A pending request was confirmed.
    Confirmed { stages: u32 },
    /// Already at the maximum.
    Refused,
    /// The module is solved.
    Ignored,
}

/// A Bamboozling Directional Button module.
///
/// Owns its rule set, its gameplay RNG and its [`PuzzleState`]. Every
/// operation runs to completion before returning; outcomes are queued as
/// [`ModuleEvent`]s.
///
/// ```
/// use directional_button::core::{FixedBomb, ModuleConfig};
/// use directional_button::puzzle::DirectionalButton;
///
/// let mut module = DirectionalButton::new(ModuleConfig::new(1)).unwrap();
/// let bomb = FixedBomb::new(300.0);
///
/// // No presses yet, so neither arrow can be right
/// module.press_up(&bomb);
/// assert!(module.drain_events().iter().any(|e| e.is_strike()));
/// assert_eq!(module.state().stages_done, 0);
/// ```
#[derive(Clone, Debug)]
pub struct DirectionalButton {
    id: ModuleId,
    config: ModuleConfig,
    rules: RuleSet,
    rng: GameRng,
    state: PuzzleState,
    events: Vec<ModuleEvent>,
}

impl DirectionalButton {
    /// Module name used in logs.
    pub const NAME: &'static str = "Bamboozling Directional Button";

    /// Build a module and draw its first arrows and button.
    pub fn new(config: ModuleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let id = ModuleId::next();
        let rules = RuleSet::generate(config.rule_seed);
        info!(module = %id, seed = config.rule_seed, "Using Rule Seed {}.", config.rule_seed);

        let mut module = Self {
            id,
            rng: GameRng::new(config.session_seed),
            state: PuzzleState::new(config.initial_stages),
            rules,
            config,
            events: Vec::new(),
        };
        module.generate_arrows();
        module.generate_button();
        Ok(module)
    }

    /// Rebuild a module from a snapshot, with the configuration it was
    /// taken under. The snapshot is checked against its rule set first, so
    /// a restored module upholds the same invariants as a fresh one.
    pub fn restore(snapshot: PuzzleSnapshot) -> Result<Self, RestoreError> {
        let rules = RuleSet::generate(snapshot.config.rule_seed);
        snapshot.validate(rules.table())?;

        let id = ModuleId::next();
        info!(module = %id, seed = snapshot.config.rule_seed, "restored from snapshot");
        Ok(Self {
            id,
            rules,
            rng: GameRng::from_state(&snapshot.rng),
            state: snapshot.state,
            config: snapshot.config,
            events: Vec::new(),
        })
    }

    // === Queries ===

    /// Instance id used in logs.
    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Rule set derived from the rule seed.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> PuzzlePhase {
        self.state.phase()
    }

    /// True once solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.state.solved
    }

    /// Rule pair selected by the current button.
    #[must_use]
    pub fn current_rules(&self) -> RulePair {
        self.rules.pair(self.state.rule_index)
    }

    /// Whether a button press right now would be accepted.
    pub fn press_rule_holds<E: Environment + ?Sized>(&self, env: &E) -> bool {
        RuleEvaluator::evaluate(self.current_rules().press, &RuleContext::capture(env))
    }

    /// Whether releasing right now would be accepted: the release rule
    /// holds and the button has been held long enough.
    pub fn release_allowed<E: Environment + ?Sized>(&self, env: &E) -> bool {
        let held_long_enough = match self.state.button {
            ButtonPhase::Held { since } => env.now() - since >= self.config.hold_threshold,
            ButtonPhase::Idle => false,
        };
        held_long_enough
            && RuleEvaluator::evaluate(self.current_rules().release, &RuleContext::capture(env))
    }

    /// Whether pressing `arrow` now would clear the stage.
    #[must_use]
    pub fn arrow_would_advance(&self, arrow: Arrow) -> bool {
        self.state.presses == self.state.required_presses
            && self.state.presses % 2 == arrow.parity()
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Capture the state and the gameplay RNG position.
    #[must_use]
    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            config: self.config.clone(),
            state: self.state.clone(),
            rng: self.rng.state(),
        }
    }

    // === Draws ===

    /// Draw new arrow colours and look up the required presses.
    pub fn generate_arrows(&mut self) {
        let up = self.draw_color();
        let down = self.draw_color();
        let required = self.rules.table().required(down, up);

        self.state.up_color = up;
        self.state.down_color = down;
        self.state.required_presses = u32::from(required);

        info!(module = %self.id, "Arrow colors are: Up: {} Down: {}", up, down);
        info!(module = %self.id, "Required presses: {}", required);
        self.events.push(ModuleEvent::ArrowsGenerated {
            up,
            down,
            required_presses: required,
        });
    }

    /// Draw a new button colour and label and bind the rule pair they select.
    pub fn generate_button(&mut self) {
        let color = self.draw_color();
        let label = ButtonLabel::random(&mut self.rng);
        let index = label.rule_index(color);

        self.state.button_color = color;
        self.state.label = label;
        self.state.rule_index = index;

        info!(module = %self.id, "Button color is: {} Label: {}", color, label);
        debug!(module = %self.id, rule = index, "bound rule slot");
        self.events.push(ModuleEvent::ButtonGenerated { color, label });
    }

    fn draw_color(&mut self) -> Color {
        let index = self.rng.gen_range_usize(0..Color::COUNT);
        Color::ALL[index]
    }

    // === Player inputs ===

    /// Press the up arrow.
    pub fn press_up<E: Environment + ?Sized>(&mut self, env: &E) {
        self.press_arrow(Arrow::Up, env);
    }

    /// Press the down arrow.
    pub fn press_down<E: Environment + ?Sized>(&mut self, env: &E) {
        self.press_arrow(Arrow::Down, env);
    }

    /// Press an arrow. Clears the stage when the press count is reached and
    /// its parity matches the arrow; strikes otherwise. New arrows are drawn
    /// either way.
    pub fn press_arrow<E: Environment + ?Sized>(&mut self, arrow: Arrow, env: &E) {
        if self.state.solved {
            return;
        }

        if self.arrow_would_advance(arrow) {
            info!(module = %self.id, "Next stage!");
            self.next_stage();
        } else {
            self.strike(arrow.strike_reason(), env);
        }
        self.generate_arrows();
    }

    /// Push the main button down.
    pub fn press<E: Environment + ?Sized>(&mut self, env: &E) {
        if self.state.solved {
            return;
        }

        self.state.button = ButtonPhase::Held { since: env.now() };
        self.state.strike_leeway = false;

        if self.press_rule_holds(env) {
            self.state.presses += 1;
            info!(module = %self.id, "Good button press!");
            self.state
                .indicators
                .mark_pending_from(self.state.stages_done as usize);
        } else {
            let time = TimerReading::from_seconds(env.time_remaining()).total_seconds;
            self.strike(&format!("Bad button press. (Time = {})", time), env);
        }
    }

    /// Let go of the main button. A new button is drawn either way.
    pub fn release<E: Environment + ?Sized>(&mut self, env: &E) {
        if self.state.solved {
            return;
        }

        if !self.release_allowed(env) {
            let time = TimerReading::from_seconds(env.time_remaining()).total_seconds;
            self.strike(&format!("Bad button release. (Time = {})", time), env);
        }
        self.state.button = ButtonPhase::Idle;
        self.generate_button();
    }

    // === Progress ===

    fn next_stage(&mut self) {
        self.state.stages_done += 1;
        self.state.presses = 0;
        self.state.indicators.set_all(Light::Cleared);

        if self.state.stages_done >= self.state.stages_required {
            self.state.solved = true;
            self.state.uncap = UncapDialog::Idle;
            info!(module = %self.id, "Module solved!");
            self.events.push(ModuleEvent::Solved);
            return;
        }

        self.events.push(ModuleEvent::StageCleared {
            stages_done: self.state.stages_done,
            stages_required: self.state.stages_required,
        });
    }

    /// Issue a strike and reset all progress, unless the leeway from a
    /// previous strike is still in place.
    pub fn strike<C: Clock + ?Sized>(&mut self, reason: &str, clock: &C) {
        if self.state.strike_leeway {
            return;
        }

        info!(module = %self.id, "{}", reason);
        info!(module = %self.id, "Strike! Resetting...");
        self.events.push(ModuleEvent::Strike {
            reason: reason.to_owned(),
        });

        self.state.indicators.set_all(Light::Struck);
        self.state.flash.start(clock.now(), self.config.strike_flash_secs);

        self.state.presses = 0;
        self.state.stages_done = 0;
        self.state.stages_required = self.config.initial_stages;
        self.state.strike_leeway = true;
    }

    /// Advance background timers. Ends the strike flash once it has run for
    /// its configured duration.
    pub fn tick<C: Clock + ?Sized>(&mut self, clock: &C) {
        if self.state.flash.tick(clock.now()) {
            self.state.indicators.set_all(Light::Off);
        }
    }

    // === Uncap ===

    /// Ask to raise the stage count. The first call records a pending
    /// request; a second call confirms it.
    pub fn request_uncap(&mut self) -> UncapResponse {
        if self.state.solved {
            return UncapResponse::Ignored;
        }

        if let UncapDialog::AwaitingConfirmation { .. } = self.state.uncap {
            self.state.uncap = UncapDialog::Idle;
            self.state.stages_required += self.config.uncap_step;
            assert!(
                self.state.stages_required <= self.config.max_stages,
                "stages required {} exceeds maximum {}",
                self.state.stages_required,
                self.config.max_stages
            );
            info!(module = %self.id, stages = self.state.stages_required, "Uncapped.");
            self.events.push(ModuleEvent::UncapApplied {
                stages_required: self.state.stages_required,
            });
            return UncapResponse::Confirmed {
                stages: self.state.stages_required,
            };
        }

        let stages = self.state.stages_required + self.config.uncap_step;
        if stages > self.config.max_stages {
            return UncapResponse::Refused;
        }
        self.state.uncap = UncapDialog::AwaitingConfirmation { stages };
        UncapResponse::ConfirmationRequested { stages }
    }

    /// Drop a pending uncap request. Returns whether one was pending.
    pub fn cancel_uncap(&mut self) -> bool {
        let pending = matches!(self.state.uncap, UncapDialog::AwaitingConfirmation { .. });
        self.state.uncap = UncapDialog::Idle;
        pending
    }

    /// True while an uncap request waits for confirmation.
    #[must_use]
    pub fn uncap_pending(&self) -> bool {
        matches!(self.state.uncap, UncapDialog::AwaitingConfirmation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedBomb;
    use crate::rules::RuleKind;

    fn module(seed: u64) -> DirectionalButton {
        DirectionalButton::new(ModuleConfig::new(seed)).unwrap()
    }

    /// Point the button at a rule slot whose pair satisfies `wanted`.
    fn bind_rules(module: &mut DirectionalButton, wanted: impl Fn(RulePair) -> bool) {
        let slot = (0..8)
            .find(|&k| wanted(module.rules.pair(k)))
            .expect("no slot with the wanted rules");
        module.state.rule_index = slot;
    }

    /// First seed whose active rules include a pair satisfying `wanted`.
    fn module_with(wanted: impl Fn(RulePair) -> bool + Copy) -> DirectionalButton {
        let seed = (0..1000)
            .find(|&s| RuleSet::generate(s).active().iter().any(|&p| wanted(p)))
            .expect("no seed with the wanted rules");
        let mut m = module(seed);
        bind_rules(&mut m, wanted);
        m
    }

    #[test]
    fn test_new_draws_faces() {
        let mut m = module(1);
        let events = m.drain_events();
        assert!(matches!(events[0], ModuleEvent::ArrowsGenerated { .. }));
        assert!(matches!(events[1], ModuleEvent::ButtonGenerated { .. }));

        let s = m.state();
        let expected = m.rules().table().required(s.down_color, s.up_color);
        assert_eq!(s.required_presses, u32::from(expected));
        assert_eq!(s.rule_index, s.label.rule_index(s.button_color));
    }

    #[test]
    fn test_invalid_config() {
        let config = ModuleConfig::new(1).with_hold_threshold(-1.0);
        assert!(DirectionalButton::new(config).is_err());
    }

    #[test]
    fn test_arrow_parity() {
        assert_eq!(Arrow::for_presses(3), Arrow::Up);
        assert_eq!(Arrow::for_presses(4), Arrow::Down);
        assert_eq!(Arrow::Up.parity(), 1);
    }

    #[test]
    fn test_good_press_counts() {
        let mut m = module(2);
        bind_rules(&mut m, |p| p.press == RuleKind::Always);
        let bomb = FixedBomb::new(100.0);

        m.press(&bomb);
        assert_eq!(m.state().presses, 1);
        assert_eq!(m.phase(), PuzzlePhase::Held);
        assert_eq!(m.state().indicators.lights(), &[Light::Pending; 3]);
    }

    #[test]
    fn test_short_hold_strikes() {
        let mut m = module_with(|p| p.press == RuleKind::Always && p.release == RuleKind::Always);
        let mut bomb = FixedBomb::new(100.0);

        m.press(&bomb);
        bomb.advance(1.5);
        m.drain_events();
        m.release(&bomb);

        let events = m.drain_events();
        assert_eq!(
            events[0],
            ModuleEvent::Strike {
                reason: "Bad button release. (Time = 98)".to_owned()
            }
        );
        assert_eq!(m.state().presses, 0);
        assert_eq!(m.phase(), PuzzlePhase::Striking);
    }

    /// First whole-second countdown in `100..200` at which `rule` fails.
    fn failing_time(rule: RuleKind) -> u64 {
        (100..200)
            .find(|&t| {
                let bomb = FixedBomb::new(t as f64 + 0.5);
                !RuleEvaluator::evaluate(rule, &RuleContext::capture(&bomb))
            })
            .expect("rule holds at every time")
    }

    #[test]
    fn test_bad_press_strikes_with_time() {
        let mut m = module_with(|p| !p.press.is_unconditional());
        let t = failing_time(m.current_rules().press);
        let bomb = FixedBomb::new(t as f64 + 0.5);
        m.drain_events();

        m.press(&bomb);

        let events = m.drain_events();
        assert_eq!(
            events[0],
            ModuleEvent::Strike {
                reason: format!("Bad button press. (Time = {})", t)
            }
        );
        assert_eq!(m.state().presses, 0);
        assert!(m.state().strike_leeway);
        assert_eq!(m.state().indicators.lights(), &[Light::Struck; 3]);
    }

    #[test]
    fn test_press_clears_leeway() {
        let mut m = module_with(|p| !p.press.is_unconditional());
        let t = failing_time(m.current_rules().press);
        let bomb = FixedBomb::new(t as f64 + 0.5);
        m.drain_events();

        m.press(&bomb);
        // Arrow strikes are absorbed by the leeway
        m.press_up(&bomb);
        m.press(&bomb);

        let strikes = m.drain_events().iter().filter(|e| e.is_strike()).count();
        assert_eq!(strikes, 2);
    }

    #[test]
    fn test_long_hold_with_failing_release_rule_strikes() {
        let mut m = module_with(|p| p.press == RuleKind::Always && !p.release.is_unconditional());
        let release = m.current_rules().release;
        let t = failing_time(release);
        // Press three seconds early so the hold is long enough
        let mut bomb = FixedBomb::new(t as f64 + 3.5);

        m.press(&bomb);
        assert_eq!(m.state().presses, 1);
        bomb.advance(3.0);
        assert!(!RuleEvaluator::evaluate(release, &RuleContext::capture(&bomb)));
        m.drain_events();
        m.release(&bomb);

        let events = m.drain_events();
        assert_eq!(
            events[0],
            ModuleEvent::Strike {
                reason: format!("Bad button release. (Time = {})", t)
            }
        );
        assert_eq!(m.state().presses, 0);
        assert_eq!(m.state().button, ButtonPhase::Idle);
    }

    #[test]
    fn test_release_without_hold_strikes() {
        let mut m = module(2);
        bind_rules(&mut m, |p| p.release == RuleKind::Always);
        let bomb = FixedBomb::new(100.0);

        m.release(&bomb);
        assert!(m.drain_events().iter().any(ModuleEvent::is_strike));
    }

    #[test]
    fn test_strike_leeway_suppresses_second_strike() {
        let mut m = module(3);
        let bomb = FixedBomb::new(100.0);

        m.press_up(&bomb);
        m.press_down(&bomb);
        let strikes = m.drain_events().iter().filter(|e| e.is_strike()).count();
        assert_eq!(strikes, 1);
        assert!(m.state().strike_leeway);
    }

    #[test]
    fn test_flash_restores_lights() {
        let mut m = module(3);
        let mut bomb = FixedBomb::new(100.0);

        m.press_up(&bomb);
        assert_eq!(m.state().indicators.lights(), &[Light::Struck; 3]);

        bomb.advance(0.5);
        m.tick(&bomb);
        assert_eq!(m.state().indicators.lights(), &[Light::Struck; 3]);

        bomb.advance(0.5);
        m.tick(&bomb);
        assert_eq!(m.state().indicators.lights(), &[Light::Off; 3]);
        assert_eq!(m.phase(), PuzzlePhase::Idle);
    }

    #[test]
    fn test_uncap_protocol() {
        let mut m = module(4);
        assert_eq!(m.request_uncap(), UncapResponse::ConfirmationRequested { stages: 3 });
        assert!(m.uncap_pending());
        assert_eq!(m.request_uncap(), UncapResponse::Confirmed { stages: 3 });
        assert_eq!(m.request_uncap(), UncapResponse::ConfirmationRequested { stages: 5 });
        assert_eq!(m.request_uncap(), UncapResponse::Confirmed { stages: 5 });
        assert_eq!(m.request_uncap(), UncapResponse::Refused);
        assert_eq!(m.state().stages_required, 5);
        assert!(!m.uncap_pending());
    }

    #[test]
    fn test_uncap_cancel() {
        let mut m = module(4);
        assert!(!m.cancel_uncap());
        m.request_uncap();
        assert!(m.cancel_uncap());
        assert_eq!(m.state().stages_required, 1);
        assert_eq!(m.request_uncap(), UncapResponse::ConfirmationRequested { stages: 3 });
    }

    #[test]
    fn test_snapshot_restore_continues_draws() {
        let mut m = module(6);
        let snap = m.snapshot();
        let mut restored = DirectionalButton::restore(snap).unwrap();

        assert_eq!(restored.rules(), m.rules());
        m.generate_button();
        restored.generate_button();
        assert_eq!(m.state(), restored.state());
    }
}
