//! Condition nodes for agent behavior trees.
//!
//! Condition nodes read the observation or the combatants and return
//! Success or Failure. They never mutate state and never return Running.

use behavior_tree::{Behavior, Status};
use combat_core::{ActionKind, CombatState};

use crate::context::AgentContext;

/// Checks if the enemy is alive and is the nearest body the spatial oracle
/// reports within `range`.
///
/// # Example
///
/// ```rust,ignore
/// // Close in once the enemy is nearby
/// Sequence::new(vec![
///     Box::new(IsEnemyInRange { range: 6.0 }),
///     Box::new(MoveTowardEnemy { stop_distance: 1.5 }),
/// ])
/// ```
pub struct IsEnemyInRange {
    pub range: f32,
}

impl Behavior<AgentContext> for IsEnemyInRange {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        let (me, enemy) = (ctx.me(), ctx.opponent());
        let spotted = ctx
            .spatial()
            .nearest_within(me.position(), self.range, Some(me.id()))
            .is_some_and(|hit| hit.id == enemy.id());
        Status::from_bool(enemy.is_alive() && spotted)
    }
}

/// Checks if the enemy is within this combatant's own attack range.
pub struct IsEnemyInAttackRange;

impl Behavior<AgentContext> for IsEnemyInAttackRange {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        let range = ctx.me().config().attack_range;
        IsEnemyInRange { range }.tick(ctx)
    }
}

/// Checks if the cooldown of `kind` has run out.
///
/// Actions without a cooldown (idle, move) are always ready. The action lock
/// is not considered; pair with the action itself to find out whether it can
/// start.
pub struct IsCooldownReady(pub ActionKind);

impl Behavior<AgentContext> for IsCooldownReady {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        let ready = ctx
            .me()
            .cooldown(self.0)
            .is_none_or(|cooldown| cooldown.is_ready());
        Status::from_bool(ready)
    }
}

/// Checks if this combatant's health ratio is below `ratio`.
///
/// # Example
///
/// ```rust,ignore
/// // Retreat below 30% health
/// Sequence::new(vec![
///     Box::new(IsHealthBelow { ratio: 0.3 }),
///     Box::new(RetreatFromEnemy { safe_distance: 6.0 }),
/// ])
/// ```
pub struct IsHealthBelow {
    /// Health ratio threshold (0.0 to 1.0).
    pub ratio: f32,
}

impl Behavior<AgentContext> for IsHealthBelow {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        Status::from_bool(ctx.observation.health_ratio() < self.ratio)
    }
}

/// Checks if the enemy's health ratio is below `ratio`.
pub struct IsEnemyHealthBelow {
    pub ratio: f32,
}

impl Behavior<AgentContext> for IsEnemyHealthBelow {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        Status::from_bool(ctx.observation.enemy_health_ratio() < self.ratio)
    }
}

/// Checks the enemy's current state.
pub struct IsEnemyInState(pub CombatState);

impl Behavior<AgentContext> for IsEnemyInState {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        Status::from_bool(ctx.observation.enemy_state == self.0)
    }
}

/// Checks if the enemy is mid-swing.
pub struct IsEnemyAttacking;

impl Behavior<AgentContext> for IsEnemyAttacking {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        IsEnemyInState(CombatState::Attacking).tick(ctx)
    }
}

/// Checks if this combatant is closer than `margin` to the arena edge (or
/// beyond it).
pub struct IsOutsideArena {
    pub margin: f32,
}

impl Behavior<AgentContext> for IsOutsideArena {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        let obs = &ctx.observation;
        Status::from_bool(!obs.arena.contains(obs.self_position, self.margin))
    }
}

/// Checks that no obstacle stands between the combatants.
pub struct HasLineOfSight;

impl Behavior<AgentContext> for HasLineOfSight {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        let obs = &ctx.observation;
        let blocked = ctx
            .spatial()
            .is_path_blocked(obs.self_position, obs.enemy_position);
        Status::from_bool(!blocked)
    }
}

/// Checks if this combatant blocked a hit since its last action started.
pub struct HasBlockedRecently;

impl Behavior<AgentContext> for HasBlockedRecently {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        Status::from_bool(ctx.me().blocked_recently())
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{
        Action, ArenaBounds, CombatConfig, Combatant, CombatantId, Obstacle, SpatialHit,
        SpatialOracle, StaticField, Vec2,
    };

    use super::*;

    /// Oracle for a field in smoke: paths are open but nobody can be spotted.
    struct Smoke;

    impl SpatialOracle for Smoke {
        fn nearest_within(&self, _: Vec2, _: f32, _: Option<CombatantId>) -> Option<SpatialHit> {
            None
        }

        fn is_path_blocked(&self, _: Vec2, _: Vec2) -> bool {
            false
        }
    }

    fn ctx_at(distance: f32, field: StaticField) -> AgentContext {
        let config = CombatConfig::default();
        AgentContext::new(
            Combatant::new(CombatantId(0), config, Vec2::ZERO, Vec2::X),
            Combatant::new(CombatantId(1), config, Vec2::new(distance, 0.0), Vec2::NEG_X),
            field,
            ArenaBounds::default(),
        )
    }

    #[test]
    fn range_checks_follow_oracle_distance() {
        let mut ctx = ctx_at(3.0, StaticField::open());
        assert_eq!(IsEnemyInRange { range: 3.0 }.tick(&mut ctx), Status::Success);
        assert_eq!(IsEnemyInRange { range: 2.9 }.tick(&mut ctx), Status::Failure);
        assert_eq!(IsEnemyInAttackRange.tick(&mut ctx), Status::Failure);

        let mut ctx = ctx_at(1.0, StaticField::open());
        assert_eq!(IsEnemyInAttackRange.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn range_check_needs_oracle_to_spot_enemy() {
        let config = CombatConfig::default();
        let mut ctx = AgentContext::new(
            Combatant::new(CombatantId(0), config, Vec2::ZERO, Vec2::X),
            Combatant::new(CombatantId(1), config, Vec2::new(1.0, 0.0), Vec2::NEG_X),
            Smoke,
            ArenaBounds::default(),
        );
        assert_eq!(ctx.observation.distance, 1.0);
        assert_eq!(IsEnemyInRange { range: 3.0 }.tick(&mut ctx), Status::Failure);
        assert_eq!(IsEnemyInAttackRange.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn range_check_tracks_moved_enemy() {
        let mut ctx = ctx_at(1.0, StaticField::open());
        assert_eq!(IsEnemyInRange { range: 2.0 }.tick(&mut ctx), Status::Success);

        ctx.combatant_mut(1).set_position(Vec2::new(5.0, 0.0));
        ctx.refresh();
        assert_eq!(IsEnemyInRange { range: 2.0 }.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn dead_enemy_is_never_in_range() {
        let mut ctx = ctx_at(1.0, StaticField::open());
        ctx.combatant_mut(1).take_damage(1_000.0);
        ctx.refresh();
        assert_eq!(IsEnemyInRange { range: 2.0 }.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn cooldown_ready_tracks_attack_timer() {
        let mut ctx = ctx_at(1.0, StaticField::open());
        let mut ready = IsCooldownReady(ActionKind::Attack);
        assert_eq!(ready.tick(&mut ctx), Status::Success);

        ctx.perform(Action::Attack);
        assert_eq!(ready.tick(&mut ctx), Status::Failure);
        assert_eq!(IsCooldownReady(ActionKind::Move).tick(&mut ctx), Status::Success);

        ctx.advance(2.5);
        ctx.refresh();
        assert_eq!(ready.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn health_thresholds() {
        let mut ctx = ctx_at(1.0, StaticField::open());
        ctx.perform(Action::Attack);

        assert_eq!(IsEnemyHealthBelow { ratio: 0.8 }.tick(&mut ctx), Status::Success);
        assert_eq!(IsEnemyHealthBelow { ratio: 0.75 }.tick(&mut ctx), Status::Failure);
        assert_eq!(IsHealthBelow { ratio: 1.0 }.tick(&mut ctx), Status::Failure);

        ctx.focus(1);
        assert_eq!(IsHealthBelow { ratio: 0.8 }.tick(&mut ctx), Status::Success);
        assert_eq!(IsEnemyAttacking.tick(&mut ctx), Status::Success);
        assert_eq!(
            IsEnemyInState(CombatState::Idle).tick(&mut ctx),
            Status::Failure
        );
    }

    #[test]
    fn arena_margin() {
        let mut ctx = ctx_at(1.0, StaticField::open());
        assert_eq!(IsOutsideArena { margin: 1.0 }.tick(&mut ctx), Status::Failure);

        ctx.combatant_mut(0).set_position(Vec2::new(0.0, 9.5));
        ctx.refresh();
        assert_eq!(IsOutsideArena { margin: 1.0 }.tick(&mut ctx), Status::Success);
    }

    #[test]
    fn line_of_sight_respects_obstacles() {
        let mut open = ctx_at(4.0, StaticField::open());
        assert_eq!(HasLineOfSight.tick(&mut open), Status::Success);

        let pillar = StaticField::with_obstacles(vec![Obstacle::new(Vec2::new(2.0, 0.0), 0.5)]);
        let mut blocked = ctx_at(4.0, pillar);
        assert_eq!(HasLineOfSight.tick(&mut blocked), Status::Failure);
    }

    #[test]
    fn blocked_recently_follows_defender() {
        let mut ctx = ctx_at(1.0, StaticField::open());
        ctx.focus(1);
        ctx.perform(Action::Defend);
        assert_eq!(HasBlockedRecently.tick(&mut ctx), Status::Failure);

        ctx.focus(0);
        ctx.perform(Action::Attack);
        ctx.focus(1);
        assert_eq!(HasBlockedRecently.tick(&mut ctx), Status::Success);
    }
}
