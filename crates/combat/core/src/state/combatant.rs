//! The per-combatant action state machine.
//!
//! A [`Combatant`] owns its health, three independent cooldowns, the action
//! lock and the invincibility window. All mutation goes through
//! [`Combatant::execute_action`], [`Combatant::take_damage`],
//! [`Combatant::advance`] and the episode hooks.
//!
//! # Invariants
//!
//! - `health` stays in `[0, max_health]`
//! - at most one of Attacking/Defending/Dodging/Moving holds at any instant
//!   (a single `state` field)
//! - cooldowns tick every [`advance`](Combatant::advance), independent of the lock
//! - once `Dead`, nothing but a reset leaves `Dead`

use glam::Vec2;

use crate::action::{Action, ActionKind, ActionRejection, ActionResult};
use crate::combat::{DamageOutcome, IgnoreReason};
use crate::config::{CombatConfig, ConfigError};
use crate::env::CombatEnv;

use super::timer::{Cooldown, Countdown, sanitize_delta};
use super::types::{CombatState, CombatantId};

/// Mutual-exclusion lock held by an in-progress attack, defend or dodge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionLock {
    pub kind: ActionKind,
    pub timer: Countdown,
}

/// Where the current invincibility window came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvincibilitySource {
    Dodge,
    /// Short grace after taking a hit.
    HitGrace,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Invincibility {
    pub source: InvincibilitySource,
    pub timer: Countdown,
}

/// Open hit window of the current attack.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Swing {
    pub(crate) window: Countdown,
    /// Targets already struck by this swing.
    pub(crate) struck: Vec<CombatantId>,
}

/// Snapshot of all three cooldowns as `(remaining, max)` pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CooldownState {
    pub attack: Cooldown,
    pub defend: Cooldown,
    pub dodge: Cooldown,
}

/// A single fighter's combat state.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    id: CombatantId,
    config: CombatConfig,

    spawn: Vec2,
    spawn_facing: Vec2,
    position: Vec2,
    facing: Vec2,

    health: f32,
    state: CombatState,

    attack: Cooldown,
    defend: Cooldown,
    dodge: Cooldown,

    lock: Option<ActionLock>,
    invincibility: Option<Invincibility>,
    swing: Option<Swing>,

    blocked_recently: bool,
    in_combat: bool,
}

impl Combatant {
    /// Creates a combatant at `spawn`, facing `facing`, at full health.
    ///
    /// `config` is taken as is and must pass [`CombatConfig::validate`];
    /// zero durations or a zero `max_health` leave timers and health ratios
    /// meaningless. Use [`Combatant::try_new`] for untrusted tunables.
    pub fn new(id: CombatantId, config: CombatConfig, spawn: Vec2, facing: Vec2) -> Self {
        let facing = facing.try_normalize().unwrap_or(Vec2::X);
        Self {
            id,
            config,
            spawn,
            spawn_facing: facing,
            position: spawn,
            facing,
            health: config.max_health,
            state: CombatState::Idle,
            attack: Cooldown::new(config.attack_cooldown),
            defend: Cooldown::new(config.defend_cooldown),
            dodge: Cooldown::new(config.dodge_cooldown),
            lock: None,
            invincibility: None,
            swing: None,
            blocked_recently: false,
            in_combat: false,
        }
    }

    /// Validates `config`, then creates the combatant like [`Combatant::new`].
    pub fn try_new(
        id: CombatantId,
        config: CombatConfig,
        spawn: Vec2,
        facing: Vec2,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(id, config, spawn, facing))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state != CombatState::Dead
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.config.max_health
    }

    /// Health as a fraction of maximum.
    pub fn health_ratio(&self) -> f32 {
        (self.health / self.config.max_health).clamp(0.0, 1.0)
    }

    pub fn current_state(&self) -> CombatState {
        self.state
    }

    pub fn cooldown_state(&self) -> CooldownState {
        CooldownState {
            attack: self.attack,
            defend: self.defend,
            dodge: self.dodge,
        }
    }

    pub fn cooldown(&self, kind: ActionKind) -> Option<Cooldown> {
        match kind {
            ActionKind::Attack => Some(self.attack),
            ActionKind::Defend => Some(self.defend),
            ActionKind::Dodge => Some(self.dodge),
            ActionKind::Idle | ActionKind::Move => None,
        }
    }

    /// Whether `kind` could start right now.
    pub fn can_perform(&self, kind: ActionKind) -> bool {
        self.is_alive()
            && self.lock.is_none()
            && self.cooldown(kind).is_none_or(|cooldown| cooldown.is_ready())
    }

    pub fn can_attack(&self) -> bool {
        self.can_perform(ActionKind::Attack)
    }

    pub fn can_defend(&self) -> bool {
        self.can_perform(ActionKind::Defend)
    }

    pub fn can_dodge(&self) -> bool {
        self.can_perform(ActionKind::Dodge)
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    pub fn action_lock(&self) -> Option<ActionLock> {
        self.lock
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_some()
    }

    pub fn invincibility(&self) -> Option<Invincibility> {
        self.invincibility
    }

    /// Whether the current attack can still connect.
    pub fn is_hit_window_open(&self) -> bool {
        self.swing.is_some()
    }

    /// True from a successful block until the next action starts.
    pub fn blocked_recently(&self) -> bool {
        self.blocked_recently
    }

    pub fn in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Unit vector the combatant is facing.
    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn distance_to(&self, other: &Combatant) -> f32 {
        self.position.distance(other.position)
    }

    // ========================================================================
    // Orientation
    // ========================================================================

    /// Turns toward `target`. Ignored while locked or dead, and when the
    /// target sits on top of the combatant.
    pub fn face_towards(&mut self, target: Vec2) {
        if !self.is_alive() || self.lock.is_some() {
            return;
        }
        if let Some(direction) = (target - self.position).try_normalize() {
            self.facing = direction;
        }
    }

    /// Places the combatant directly. Used by orchestrators that own physics.
    pub fn set_position(&mut self, position: Vec2) {
        if position.is_finite() {
            self.position = position;
        }
    }

    // ========================================================================
    // Action execution
    // ========================================================================

    /// Attempts to start `action` this tick.
    ///
    /// A dead or locked combatant rejects everything without touching any
    /// timer. Attack, defend and dodge additionally require their own
    /// cooldown to be ready; on success they re-arm it and take the lock.
    pub fn execute_action(&mut self, action: Action, env: &CombatEnv<'_>) -> ActionResult {
        let kind = action.kind();

        if !self.is_alive() {
            return self.reject(kind, ActionRejection::Dead);
        }
        if let Some(lock) = self.lock {
            return self.reject(kind, ActionRejection::Locked(lock.kind));
        }

        match action {
            Action::Idle => {
                self.state = CombatState::Idle;
            }
            Action::Move(direction) => {
                let direction = direction.try_normalize().unwrap_or(Vec2::ZERO);
                if direction != Vec2::ZERO {
                    self.facing = direction;
                }
                let step = direction * self.config.move_speed * sanitize_delta(env.dt);
                self.displace(step, env);
                self.state = CombatState::Moving;
            }
            Action::Attack => {
                if !self.attack.is_ready() {
                    return self.reject(kind, ActionRejection::OnCooldown(kind));
                }
                self.attack.trigger();
                self.begin(kind, CombatState::Attacking, self.config.attack_duration);
                self.swing = Some(Swing {
                    window: Countdown::new(self.config.hit_window()),
                    struck: Vec::new(),
                });
            }
            Action::Defend => {
                if !self.defend.is_ready() {
                    return self.reject(kind, ActionRejection::OnCooldown(kind));
                }
                self.defend.trigger();
                self.begin(kind, CombatState::Defending, self.config.defend_duration);
            }
            Action::Dodge(direction) => {
                if !self.dodge.is_ready() {
                    return self.reject(kind, ActionRejection::OnCooldown(kind));
                }
                self.dodge.trigger();
                self.begin(kind, CombatState::Dodging, self.config.dodge_duration);
                self.grant_invincibility(InvincibilitySource::Dodge, self.config.dodge_duration);

                let direction = direction
                    .and_then(Vec2::try_normalize)
                    .unwrap_or(-self.facing);
                self.displace(direction * self.config.dodge_distance, env);
            }
        }

        tracing::trace!(
            combatant = %self.id,
            action = %kind,
            state = %self.state,
            "action started"
        );
        ActionResult::accepted(kind)
    }

    fn reject(&self, kind: ActionKind, reason: ActionRejection) -> ActionResult {
        tracing::trace!(combatant = %self.id, action = %kind, %reason, "action rejected");
        ActionResult::rejected(kind, reason)
    }

    fn begin(&mut self, kind: ActionKind, state: CombatState, duration: f32) {
        self.state = state;
        self.blocked_recently = false;
        self.lock = Some(ActionLock {
            kind,
            timer: Countdown::new(duration),
        });
    }

    fn displace(&mut self, offset: Vec2, env: &CombatEnv<'_>) {
        if offset == Vec2::ZERO {
            return;
        }
        let target = self.position + offset;
        let resolved = env.spatial.resolve_motion(self.position, target);
        self.position = env.arena.clamp(resolved);
    }

    fn grant_invincibility(&mut self, source: InvincibilitySource, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        match &mut self.invincibility {
            Some(current) => {
                if duration > current.timer.remaining() {
                    current.source = source;
                }
                current.timer.extend_to(duration);
            }
            None => {
                self.invincibility = Some(Invincibility {
                    source,
                    timer: Countdown::new(duration),
                });
            }
        }
    }

    // ========================================================================
    // Damage
    // ========================================================================

    /// Delivers `amount` damage.
    ///
    /// - dead or invincible (dodging, post-hit grace): nothing happens
    /// - defending: fully blocked, nothing is applied
    /// - otherwise health drops (floored at 0) and a short grace window
    ///   opens; reaching 0 latches `Dead`
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored(IgnoreReason::Dead);
        }
        if self.is_invincible() {
            return DamageOutcome::Ignored(IgnoreReason::Invincible);
        }
        if self.state == CombatState::Defending {
            self.blocked_recently = true;
            tracing::trace!(combatant = %self.id, amount, "damage blocked");
            return DamageOutcome::Blocked;
        }

        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        let applied = amount.min(self.health);
        self.health -= applied;

        if self.health <= 0.0 {
            self.health = 0.0;
            self.die();
            return DamageOutcome::Applied {
                amount: applied,
                lethal: true,
            };
        }

        if applied > 0.0 {
            self.grant_invincibility(InvincibilitySource::HitGrace, self.config.hit_grace);
        }
        DamageOutcome::Applied {
            amount: applied,
            lethal: false,
        }
    }

    fn die(&mut self) {
        self.state = CombatState::Dead;
        self.lock = None;
        self.swing = None;
        self.invincibility = None;
        tracing::debug!(combatant = %self.id, "combatant died");
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Advances every timer by `dt` seconds.
    ///
    /// Cooldowns tick regardless of state, including while the lock taken by
    /// that same action is still held. When the lock expires the combatant
    /// returns to `Idle`.
    pub fn advance(&mut self, dt: f32) {
        let dt = sanitize_delta(dt);

        self.attack.tick(dt);
        self.defend.tick(dt);
        self.dodge.tick(dt);

        if let Some(invincibility) = &mut self.invincibility
            && invincibility.timer.tick(dt)
        {
            self.invincibility = None;
        }

        if let Some(swing) = &mut self.swing
            && swing.window.tick(dt)
        {
            self.swing = None;
        }

        if let Some(lock) = &mut self.lock
            && lock.timer.tick(dt)
        {
            self.lock = None;
            self.swing = None;
            if self.is_alive() {
                self.state = CombatState::Idle;
            }
        }
    }

    // ========================================================================
    // Strike bookkeeping
    // ========================================================================

    /// Whether the open swing has already struck `target`.
    pub(crate) fn has_struck(&self, target: CombatantId) -> bool {
        self.swing
            .as_ref()
            .is_some_and(|swing| swing.struck.contains(&target))
    }

    pub(crate) fn mark_struck(&mut self, target: CombatantId) {
        if let Some(swing) = &mut self.swing
            && !swing.struck.contains(&target)
        {
            swing.struck.push(target);
        }
    }

    // ========================================================================
    // Episode hooks
    // ========================================================================

    /// Restores the combatant to its episode-start state: full health, all
    /// cooldowns ready, no lock, no invincibility, `Idle` at its spawn point.
    ///
    /// Calling it repeatedly has the same effect as calling it once.
    pub fn reset_agent(&mut self) {
        self.health = self.config.max_health;
        self.state = CombatState::Idle;
        self.attack.clear();
        self.defend.clear();
        self.dodge.clear();
        self.lock = None;
        self.invincibility = None;
        self.swing = None;
        self.blocked_recently = false;
        self.in_combat = false;
        self.position = self.spawn;
        self.facing = self.spawn_facing;
    }

    /// Resets the combatant and marks it as in combat.
    pub fn start_battle(&mut self) {
        self.reset_agent();
        self.in_combat = true;
    }

    /// Leaves combat without touching any other state.
    pub fn end_battle(&mut self) {
        self.in_combat = false;
    }
}
