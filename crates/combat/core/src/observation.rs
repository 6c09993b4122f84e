//! Per-tick read-only snapshot fed to decision making.
//!
//! An [`Observation`] is a plain value copied out of both combatants once per
//! step. Nodes read it; they never hold on to it past their tick.

use glam::Vec2;

use crate::env::ArenaBounds;
use crate::state::{CombatState, Combatant};

/// Remaining/max ratio of each cooldown, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownRatios {
    pub attack: f32,
    pub defend: f32,
    pub dodge: f32,
}

impl CooldownRatios {
    pub fn of(combatant: &Combatant) -> Self {
        let cooldowns = combatant.cooldown_state();
        Self {
            attack: cooldowns.attack.ratio(),
            defend: cooldowns.defend.ratio(),
            dodge: cooldowns.dodge.ratio(),
        }
    }

    fn sanitized(self) -> Self {
        Self {
            attack: clamp_unit(self.attack),
            defend: clamp_unit(self.defend),
            dodge: clamp_unit(self.dodge),
        }
    }
}

/// Snapshot of both sides of a duel from one combatant's point of view.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub self_position: Vec2,
    pub enemy_position: Vec2,

    pub self_health: f32,
    pub self_max_health: f32,
    pub enemy_health: f32,
    pub enemy_max_health: f32,

    pub self_cooldowns: CooldownRatios,
    pub enemy_cooldowns: CooldownRatios,

    /// Euclidean distance between the two combatants.
    pub distance: f32,

    pub self_state: CombatState,
    pub enemy_state: CombatState,
    pub self_invincible: bool,
    pub enemy_invincible: bool,

    pub arena: ArenaBounds,
}

impl Observation {
    /// Number of entries produced by [`Observation::to_features`].
    pub const FEATURE_COUNT: usize = 15;

    /// Captures the snapshot of `me` facing `enemy`.
    pub fn capture(me: &Combatant, enemy: &Combatant, arena: ArenaBounds) -> Self {
        Self {
            self_position: me.position(),
            enemy_position: enemy.position(),
            self_health: me.health(),
            self_max_health: me.max_health(),
            enemy_health: enemy.health(),
            enemy_max_health: enemy.max_health(),
            self_cooldowns: CooldownRatios::of(me),
            enemy_cooldowns: CooldownRatios::of(enemy),
            distance: me.distance_to(enemy),
            self_state: me.current_state(),
            enemy_state: enemy.current_state(),
            self_invincible: me.is_invincible(),
            enemy_invincible: enemy.is_invincible(),
            arena,
        }
        .sanitized()
    }

    /// Returns a copy with every numeric field forced into its valid range.
    ///
    /// Non-finite positions collapse to the arena center, ratios are clamped
    /// to `[0, 1]`, health to `[0, max]`, and an invalid distance is
    /// recomputed from the positions.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.arena.center.is_finite() {
            self.arena.center = Vec2::ZERO;
        }
        if !self.arena.radius.is_finite() || self.arena.radius < 0.0 {
            self.arena.radius = 0.0;
        }
        if !self.self_position.is_finite() {
            self.self_position = self.arena.center;
        }
        if !self.enemy_position.is_finite() {
            self.enemy_position = self.arena.center;
        }

        self.self_max_health = finite_non_negative(self.self_max_health);
        self.enemy_max_health = finite_non_negative(self.enemy_max_health);
        self.self_health = finite_non_negative(self.self_health).min(self.self_max_health);
        self.enemy_health = finite_non_negative(self.enemy_health).min(self.enemy_max_health);

        self.self_cooldowns = self.self_cooldowns.sanitized();
        self.enemy_cooldowns = self.enemy_cooldowns.sanitized();

        if !self.distance.is_finite() || self.distance < 0.0 {
            tracing::warn!(distance = self.distance, "invalid observation distance, recomputing");
            self.distance = self.self_position.distance(self.enemy_position);
        }
        self
    }

    pub fn health_ratio(&self) -> f32 {
        ratio(self.self_health, self.self_max_health)
    }

    pub fn enemy_health_ratio(&self) -> f32 {
        ratio(self.enemy_health, self.enemy_max_health)
    }

    /// Unit vector from self toward the enemy (zero when overlapping).
    pub fn direction_to_enemy(&self) -> Vec2 {
        (self.enemy_position - self.self_position).normalize_or_zero()
    }

    /// Flat, normalised feature vector for learning agents.
    ///
    /// Layout: self xy, enemy xy (relative to the arena center, divided by
    /// radius), both health ratios, self cooldowns (attack, defend, dodge),
    /// enemy cooldowns, distance over arena diameter, self and enemy state
    /// indices scaled to `[0, 1]`.
    pub fn to_features(&self) -> [f32; Self::FEATURE_COUNT] {
        let scale = if self.arena.radius > 0.0 {
            self.arena.radius.recip()
        } else {
            0.0
        };
        let self_rel = (self.self_position - self.arena.center) * scale;
        let enemy_rel = (self.enemy_position - self.arena.center) * scale;
        let state_scale = (CombatState::ALL.len() - 1) as f32;

        [
            self_rel.x,
            self_rel.y,
            enemy_rel.x,
            enemy_rel.y,
            self.health_ratio(),
            self.enemy_health_ratio(),
            self.self_cooldowns.attack,
            self.self_cooldowns.defend,
            self.self_cooldowns.dodge,
            self.enemy_cooldowns.attack,
            self.enemy_cooldowns.defend,
            self.enemy_cooldowns.dodge,
            clamp_unit(self.distance * scale * 0.5),
            self.self_state.index() as f32 / state_scale,
            self.enemy_state.index() as f32 / state_scale,
        ]
    }
}

fn ratio(value: f32, max: f32) -> f32 {
    if max > 0.0 {
        clamp_unit(value / max)
    } else {
        0.0
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn finite_non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::config::CombatConfig;
    use crate::env::{CombatEnv, StaticField};
    use crate::state::CombatantId;

    fn pair() -> (Combatant, Combatant) {
        let config = CombatConfig::default();
        (
            Combatant::new(CombatantId(0), config, Vec2::new(-1.0, 0.0), Vec2::X),
            Combatant::new(CombatantId(1), config, Vec2::new(2.0, 0.0), Vec2::NEG_X),
        )
    }

    #[test]
    fn capture_reads_both_sides() {
        let (mut me, enemy) = pair();
        let field = StaticField::open();
        let env = CombatEnv::new(&field, ArenaBounds::default(), 0.1);
        me.execute_action(Action::Attack, &env);

        let obs = Observation::capture(&me, &enemy, ArenaBounds::default());
        assert_eq!(obs.distance, 3.0);
        assert_eq!(obs.self_state, CombatState::Attacking);
        assert_eq!(obs.enemy_state, CombatState::Idle);
        assert_eq!(obs.self_cooldowns.attack, 1.0);
        assert_eq!(obs.enemy_cooldowns.attack, 0.0);
        assert_eq!(obs.direction_to_enemy(), Vec2::X);
    }

    #[test]
    fn sanitize_clamps_out_of_range_fields() {
        let (me, enemy) = pair();
        let mut obs = Observation::capture(&me, &enemy, ArenaBounds::default());
        obs.distance = f32::NAN;
        obs.self_cooldowns.attack = 3.0;
        obs.enemy_cooldowns.dodge = -1.0;
        obs.self_health = 500.0;

        let clean = obs.sanitized();
        assert_eq!(clean.distance, 3.0);
        assert_eq!(clean.self_cooldowns.attack, 1.0);
        assert_eq!(clean.enemy_cooldowns.dodge, 0.0);
        assert_eq!(clean.self_health, 100.0);
    }

    #[test]
    fn features_are_normalised() {
        let (me, enemy) = pair();
        let obs = Observation::capture(&me, &enemy, ArenaBounds::default());
        let features = obs.to_features();

        assert_eq!(features.len(), Observation::FEATURE_COUNT);
        assert_eq!(features[0], -0.1);
        assert_eq!(features[4], 1.0);
        assert!((features[12] - 0.15).abs() < 1e-6);
        assert!(features.iter().all(|f| f.is_finite()));
    }
}
