//! Agent blackboard shared by every node of a duel's behavior trees.
//!
//! The [`AgentContext`] owns the whole duel world (both combatants, the
//! spatial oracle, arena and simulation clock) and points at one of the two
//! combatants as the acting agent. Trees read the per-tick [`Observation`]
//! and route every state change through [`AgentContext::perform`].
//!
//! # Lifetime
//!
//! The context owns its data instead of borrowing it, so trees are plain
//! `Box<dyn Behavior<AgentContext>>` values that a [`Duel`](crate::Duel) can
//! store next to the context and tick every step.

use behavior_tree::Clock;
use combat_core::{
    Action, ActionResult, ArenaBounds, CombatEnv, CombatEvent, Combatant, CombatantId,
    Observation, SpatialOracle, StrikeReport, perform_action, resolve_strike,
};

/// Index of one of the two duel slots.
pub type Slot = usize;

/// Per-duel blackboard.
pub struct AgentContext {
    /// Snapshot of the world from the acting combatant's point of view.
    ///
    /// Re-captured by [`AgentContext::focus`] and after every
    /// [`AgentContext::perform`].
    pub observation: Observation,

    combatants: [Combatant; 2],
    actor: Slot,
    spatial: Box<dyn SpatialOracle>,
    arena: ArenaBounds,

    now: f64,
    dt: f32,

    last_result: Option<ActionResult>,
    events: Vec<CombatEvent>,
}

impl AgentContext {
    /// Creates a context with `first` as the acting combatant.
    pub fn new(
        first: Combatant,
        second: Combatant,
        spatial: impl SpatialOracle + 'static,
        arena: ArenaBounds,
    ) -> Self {
        let observation = Observation::capture(&first, &second, arena);
        let mut ctx = Self {
            observation,
            combatants: [first, second],
            actor: 0,
            spatial: Box::new(spatial),
            arena,
            now: 0.0,
            dt: 0.0,
            last_result: None,
            events: Vec::new(),
        };
        ctx.sync_spatial();
        ctx
    }

    // ========================================================================
    // Focus & snapshots
    // ========================================================================

    /// Makes `slot` the acting combatant and refreshes the observation.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not 0 or 1.
    pub fn focus(&mut self, slot: Slot) {
        assert!(slot < 2, "duel slot out of range: {slot}");
        self.actor = slot;
        self.last_result = None;
        self.refresh();
    }

    /// Re-captures the observation and pushes positions into the oracle.
    pub fn refresh(&mut self) {
        self.sync_spatial();
        self.observation = Observation::capture(self.me(), self.opponent(), self.arena);
    }

    fn sync_spatial(&mut self) {
        for combatant in &self.combatants {
            self.spatial.sync_entity(combatant.id(), combatant.position());
        }
    }

    pub fn actor(&self) -> Slot {
        self.actor
    }

    /// The acting combatant.
    pub fn me(&self) -> &Combatant {
        &self.combatants[self.actor]
    }

    /// The other combatant.
    pub fn opponent(&self) -> &Combatant {
        &self.combatants[1 - self.actor]
    }

    pub fn combatant(&self, slot: Slot) -> &Combatant {
        &self.combatants[slot]
    }

    pub fn combatants(&self) -> &[Combatant; 2] {
        &self.combatants
    }

    pub fn spatial(&self) -> &dyn SpatialOracle {
        self.spatial.as_ref()
    }

    pub fn arena(&self) -> ArenaBounds {
        self.arena
    }

    /// Elapsed seconds of the current tick.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Result of the last action the acting combatant performed since
    /// the last [`AgentContext::focus`].
    pub fn last_result(&self) -> Option<&ActionResult> {
        self.last_result.as_ref()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Turns the acting combatant toward its opponent.
    pub fn face_opponent(&mut self) {
        let target = self.opponent().position();
        let actor = self.actor;
        self.combatants[actor].face_towards(target);
    }

    /// Executes `action` for the acting combatant.
    ///
    /// An accepted attack resolves its opening strike against the opponent
    /// in the same call. The result, any damage and any death are recorded
    /// as events, and the observation is refreshed.
    pub fn perform(&mut self, action: Action) -> ActionResult {
        let (me, opponent, env) = self.split(self.actor);
        let actor_id = me.id();
        let (result, report) = perform_action(me, action, &mut [opponent], &env);

        if !result.success {
            tracing::debug!(
                actor = %actor_id,
                action = %result.action,
                reason = %result.message,
                "action rejected"
            );
        }

        self.events.push(CombatEvent::Action {
            actor: actor_id,
            result: result.clone(),
        });
        self.record_strike(actor_id, &report);
        self.last_result = Some(result.clone());
        self.refresh();
        result
    }

    /// Borrows combatant `slot` mutably, its opponent mutably and the
    /// environment, all at once.
    fn split(&mut self, slot: Slot) -> (&mut Combatant, &mut Combatant, CombatEnv<'_>) {
        let env = CombatEnv::new(self.spatial.as_ref(), self.arena, self.dt);
        let [first, second] = &mut self.combatants;
        if slot == 0 {
            (first, second, env)
        } else {
            (second, first, env)
        }
    }

    fn record_strike(&mut self, attacker: CombatantId, report: &StrikeReport) {
        for hit in &report.hits {
            self.events.push(CombatEvent::Damage {
                attacker,
                target: hit.target,
                outcome: hit.outcome,
            });
            if hit.outcome.is_lethal() {
                self.events.push(CombatEvent::Died {
                    combatant: hit.target,
                });
            }
        }
    }

    // ========================================================================
    // Orchestrator hooks
    // ========================================================================

    /// Moves the simulation clock forward and advances every timer of both
    /// combatants by `dt`.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.dt = dt;
        self.now += f64::from(dt);
        for combatant in &mut self.combatants {
            combatant.advance(dt);
        }
    }

    /// Resolves swings that are still inside their hit window.
    ///
    /// Each swing strikes a target at most once, so this only lands hits on
    /// targets that walked into reach after the swing opened.
    pub fn resolve_ongoing_strikes(&mut self) {
        for slot in 0..2 {
            let (attacker, target, env) = self.split(slot);
            if !attacker.is_hit_window_open() {
                continue;
            }
            let attacker_id = attacker.id();
            let report = resolve_strike(attacker, &mut [target], &env);
            self.record_strike(attacker_id, &report);
        }
        self.refresh();
    }

    /// Starts a battle: both combatants reset and enter combat, the clock
    /// returns to zero.
    pub fn start_battle(&mut self) {
        self.clear_episode();
        for combatant in &mut self.combatants {
            combatant.start_battle();
            self.events.push(CombatEvent::BattleStarted {
                combatant: combatant.id(),
            });
        }
        self.focus(0);
    }

    /// Resets both combatants and the clock without entering combat.
    pub fn reset(&mut self) {
        self.clear_episode();
        for combatant in &mut self.combatants {
            combatant.reset_agent();
        }
        self.focus(0);
    }

    fn clear_episode(&mut self) {
        self.now = 0.0;
        self.dt = 0.0;
        self.last_result = None;
        self.events.clear();
    }

    /// Takes every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Mutable access to a combatant, for orchestrators and test setups.
    pub fn combatant_mut(&mut self, slot: Slot) -> &mut Combatant {
        &mut self.combatants[slot]
    }
}

impl Clock for AgentContext {
    fn now(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{CombatConfig, CombatState, StaticField, Vec2};

    use super::*;

    fn close_quarters() -> AgentContext {
        let config = CombatConfig::default();
        AgentContext::new(
            Combatant::new(CombatantId(0), config, Vec2::ZERO, Vec2::X),
            Combatant::new(CombatantId(1), config, Vec2::new(1.5, 0.0), Vec2::NEG_X),
            StaticField::open(),
            ArenaBounds::default(),
        )
    }

    #[test]
    fn focus_swaps_point_of_view() {
        let mut ctx = close_quarters();
        assert_eq!(ctx.me().id(), CombatantId(0));
        assert_eq!(ctx.observation.self_position, Vec2::ZERO);

        ctx.focus(1);
        assert_eq!(ctx.me().id(), CombatantId(1));
        assert_eq!(ctx.opponent().id(), CombatantId(0));
        assert_eq!(ctx.observation.self_position, Vec2::new(1.5, 0.0));
        assert_eq!(ctx.observation.distance, 1.5);
    }

    #[test]
    fn perform_records_action_and_damage() {
        let mut ctx = close_quarters();
        let result = ctx.perform(Action::Attack);

        assert!(result.success);
        assert_eq!(result.damage, 25.0);
        assert_eq!(ctx.opponent().health(), 75.0);
        assert_eq!(ctx.observation.enemy_health, 75.0);
        assert_eq!(ctx.observation.self_state, CombatState::Attacking);

        let events = ctx.drain_events();
        assert!(matches!(events[0], CombatEvent::Action { .. }));
        assert!(matches!(
            events[1],
            CombatEvent::Damage {
                target: CombatantId(1),
                ..
            }
        ));
        assert!(ctx.drain_events().is_empty());
    }

    #[test]
    fn advance_moves_clock_and_timers() {
        let mut ctx = close_quarters();
        ctx.perform(Action::Attack);
        ctx.advance(1.0);

        assert_eq!(ctx.now(), 1.0);
        assert_eq!(ctx.dt(), 1.0);
        assert!((ctx.me().cooldown_state().attack.remaining - 1.5).abs() < 1e-5);

        ctx.advance(f32::NAN);
        assert_eq!(ctx.now(), 1.0);
    }

    #[test]
    fn start_battle_restores_episode_start() {
        let mut ctx = close_quarters();
        ctx.perform(Action::Attack);
        ctx.advance(0.2);
        ctx.focus(1);

        ctx.start_battle();
        assert_eq!(ctx.now(), 0.0);
        assert_eq!(ctx.actor(), 0);
        assert!(ctx.combatants().iter().all(|c| c.health() == c.max_health()));
        assert!(ctx.combatants().iter().all(Combatant::in_combat));
        assert_eq!(ctx.drain_events().len(), 2);
    }
}
