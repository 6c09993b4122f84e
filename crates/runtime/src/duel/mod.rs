//! Sequential 1v1 duel orchestrator.
//!
//! A [`Duel`] owns the [`AgentContext`], one [`Fighter`] per slot and the
//! battle's [`CombatListener`]. Each [`Duel::step`]:
//!
//! 1. advances the clock and every timer by `dt`
//! 2. resolves swings still inside their hit window
//! 3. ticks slot 0's tree, then slot 1's, each against a fresh observation
//! 4. forwards the step's events to the listener and checks for an outcome
//!
//! Dead combatants are not ticked. When both combatants are dead after a
//! step the duel is a draw.

mod fighter;
mod outcome;

pub use fighter::Fighter;
pub use outcome::{DuelOutcome, StepReport};

use behavior_tree::{Behavior, Clock};
use combat_content::DuelSetup;
use combat_core::{
    CombatEvent, CombatListener, Combatant, CombatantId, NoopListener, StaticField,
};
use tracing::{debug, info};

use crate::context::AgentContext;
use crate::error::Result;

/// A duel between two tree-driven combatants.
pub struct Duel<L: CombatListener = NoopListener> {
    ctx: AgentContext,
    fighters: [Fighter; 2],
    listener: L,
    steps: u64,
    outcome: Option<DuelOutcome>,
}

impl Duel<NoopListener> {
    /// Creates a duel over an existing context.
    pub fn new(ctx: AgentContext, fighters: [Fighter; 2]) -> Self {
        Self {
            ctx,
            fighters,
            listener: NoopListener,
            steps: 0,
            outcome: None,
        }
    }

    /// Builds a duel from a content setup, with combatants `#0` and `#1` at
    /// the two spawns and the setup's obstacles in a [`StaticField`].
    ///
    /// # Errors
    ///
    /// Rejects invalid tunables, a degenerate arena and spawns outside it.
    pub fn from_setup(setup: &DuelSetup, fighters: [Fighter; 2]) -> Result<Self> {
        setup.validate()?;
        let spawn = |index: u32| {
            let spec = setup.spawns[index as usize];
            Combatant::try_new(CombatantId(index), setup.config, spec.position, spec.facing)
        };
        let first = spawn(0)?;
        let second = spawn(1)?;

        let field = StaticField::with_obstacles(setup.obstacles.clone());
        let ctx = AgentContext::new(first, second, field, setup.arena);
        Ok(Self::new(ctx, fighters))
    }
}

impl<L: CombatListener> Duel<L> {
    /// Replaces the listener that receives this duel's events.
    pub fn with_listener<M: CombatListener>(self, listener: M) -> Duel<M> {
        Duel {
            ctx: self.ctx,
            fighters: self.fighters,
            listener,
            steps: self.steps,
            outcome: self.outcome,
        }
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    pub fn context(&self) -> &AgentContext {
        &self.ctx
    }

    /// Mutable context, for scripted setups between steps.
    pub fn context_mut(&mut self) -> &mut AgentContext {
        &mut self.ctx
    }

    pub fn fighter(&self, slot: usize) -> &Fighter {
        &self.fighters[slot]
    }

    pub fn outcome(&self) -> Option<DuelOutcome> {
        self.outcome
    }

    /// Steps taken in the current episode.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    // ========================================================================
    // Episode lifecycle
    // ========================================================================

    /// Starts a fresh battle: both combatants reset and enter combat, both
    /// trees are reset, the clock restarts at zero.
    pub fn start_battle(&mut self) {
        self.reset_episode();
        self.ctx.start_battle();
        info!(
            a = %self.ctx.combatant(0).id(),
            a_agent = self.fighters[0].label(),
            b = %self.ctx.combatant(1).id(),
            b_agent = self.fighters[1].label(),
            "battle started"
        );
        self.dispatch_events();
    }

    /// Clears all episode state without entering combat.
    pub fn reset_episode(&mut self) {
        self.ctx.reset();
        for fighter in &mut self.fighters {
            fighter.reset();
        }
        self.steps = 0;
        self.outcome = None;
    }

    /// Runs a full battle of at most `max_steps` steps of `dt` seconds.
    pub fn run(&mut self, dt: f32, max_steps: u64) -> DuelOutcome {
        self.start_battle();
        for _ in 0..max_steps {
            if let Some(outcome) = self.step(dt).outcome {
                return outcome;
            }
        }
        self.finish(DuelOutcome::Timeout);
        DuelOutcome::Timeout
    }

    /// Advances the duel by one step of `dt` seconds.
    ///
    /// Once an outcome is set further calls change nothing and report it
    /// again.
    pub fn step(&mut self, dt: f32) -> StepReport {
        if let Some(outcome) = self.outcome {
            return StepReport {
                step: self.steps,
                time: self.elapsed(),
                statuses: [None, None],
                events: Vec::new(),
                outcome: Some(outcome),
            };
        }

        self.steps += 1;
        self.ctx.advance(dt);
        self.ctx.resolve_ongoing_strikes();

        let mut statuses = [None, None];
        for (slot, fighter) in self.fighters.iter_mut().enumerate() {
            if !self.ctx.combatant(slot).is_alive() {
                continue;
            }
            self.ctx.focus(slot);
            let status = fighter.tree.tick(&mut self.ctx);
            debug!(
                step = self.steps,
                combatant = %self.ctx.me().id(),
                agent = fighter.label(),
                ?status,
                state = %self.ctx.me().current_state(),
                "tree ticked"
            );
            statuses[slot] = Some(status);
        }

        let events = self.dispatch_events();
        let outcome = self.detect_outcome();
        if let Some(outcome) = outcome {
            self.finish(outcome);
        }

        StepReport {
            step: self.steps,
            time: self.elapsed(),
            statuses,
            events,
            outcome,
        }
    }

    /// Simulation seconds since the battle started.
    pub fn elapsed(&self) -> f64 {
        self.ctx.now()
    }

    fn detect_outcome(&self) -> Option<DuelOutcome> {
        let [first, second] = self.ctx.combatants();
        match (first.is_alive(), second.is_alive()) {
            (true, true) => None,
            (true, false) => Some(DuelOutcome::Winner(first.id())),
            (false, true) => Some(DuelOutcome::Winner(second.id())),
            (false, false) => Some(DuelOutcome::Draw),
        }
    }

    fn finish(&mut self, outcome: DuelOutcome) {
        self.outcome = Some(outcome);
        for slot in 0..2 {
            self.ctx.combatant_mut(slot).end_battle();
        }
        let [first, second] = self.ctx.combatants();
        info!(
            %outcome,
            steps = self.steps,
            time = self.elapsed(),
            a_health = first.health(),
            b_health = second.health(),
            "battle finished"
        );
    }

    fn dispatch_events(&mut self) -> Vec<CombatEvent> {
        let events = self.ctx.drain_events();
        for event in &events {
            self.listener.notify(event);
        }
        events
    }
}
