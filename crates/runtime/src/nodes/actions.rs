//! Action nodes for agent behavior trees.
//!
//! Action nodes request an [`Action`] through [`AgentContext::perform`] and
//! map the [`ActionResult`](combat_core::ActionResult) onto a status. Travel
//! nodes report Running while they are still on their way.

use behavior_tree::{Behavior, Status};
use combat_core::{Action, Vec2};

use crate::context::AgentContext;

/// Default distance at which a travel node considers a point reached.
pub const DEFAULT_ARRIVAL_TOLERANCE: f32 = 0.25;

/// Faces the enemy and swings.
///
/// Succeeds when the attack starts, whether or not it connects.
pub struct AttackEnemy;

impl Behavior<AgentContext> for AttackEnemy {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        ctx.face_opponent();
        Status::from_bool(ctx.perform(Action::Attack).success)
    }
}

/// Raises the guard.
pub struct Defend;

impl Behavior<AgentContext> for Defend {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        ctx.face_opponent();
        Status::from_bool(ctx.perform(Action::Defend).success)
    }
}

/// Dodges directly away from the enemy.
///
/// When the combatants overlap the dodge falls back to backing away from the
/// current facing.
pub struct DodgeAwayFromEnemy;

impl Behavior<AgentContext> for DodgeAwayFromEnemy {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        let away = -ctx.observation.direction_to_enemy();
        let direction = (away != Vec2::ZERO).then_some(away);
        Status::from_bool(ctx.perform(Action::Dodge(direction)).success)
    }
}

/// Closes the distance to the enemy.
///
/// - Success once within `stop_distance` (no movement is requested)
/// - Running while approaching
/// - Failure if the move is rejected or the path makes no progress
pub struct MoveTowardEnemy {
    pub stop_distance: f32,
}

impl Behavior<AgentContext> for MoveTowardEnemy {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        if ctx.observation.distance <= self.stop_distance {
            return Status::Success;
        }
        let target = ctx.observation.enemy_position;
        match step_toward(ctx, target) {
            Status::Running if ctx.observation.distance <= self.stop_distance => Status::Success,
            status => status,
        }
    }
}

/// Backs away from the enemy until `safe_distance` is reached.
///
/// Fails when the arena edge or an obstacle stops the retreat.
pub struct RetreatFromEnemy {
    pub safe_distance: f32,
}

impl Behavior<AgentContext> for RetreatFromEnemy {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        if ctx.observation.distance >= self.safe_distance {
            return Status::Success;
        }
        let away = -ctx.observation.direction_to_enemy();
        if away == Vec2::ZERO {
            return Status::Failure;
        }
        let target = ctx.observation.self_position + away * self.safe_distance;
        match step_toward(ctx, target) {
            Status::Running if ctx.observation.distance >= self.safe_distance => Status::Success,
            status => status,
        }
    }
}

/// Walks a closed loop of waypoints.
///
/// Each tick moves toward the current waypoint and reports Running. On
/// arrival the next waypoint becomes current and the node succeeds once.
/// `reset` restarts the loop at the first waypoint.
pub struct Patrol {
    waypoints: Vec<Vec2>,
    tolerance: f32,
    current: usize,
}

impl Patrol {
    pub fn new(waypoints: Vec<Vec2>, tolerance: f32) -> Self {
        Self {
            waypoints,
            tolerance,
            current: 0,
        }
    }

    /// Waypoint currently being approached.
    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.current).copied()
    }
}

impl Behavior<AgentContext> for Patrol {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        let Some(target) = self.current_waypoint() else {
            return Status::Failure;
        };

        if ctx.observation.self_position.distance(target) > self.tolerance {
            let status = step_toward(ctx, target);
            if status != Status::Running
                || ctx.observation.self_position.distance(target) > self.tolerance
            {
                return status;
            }
        }

        self.current = (self.current + 1) % self.waypoints.len();
        tracing::trace!(combatant = %ctx.me().id(), waypoint = self.current, "patrol leg done");
        Status::Success
    }

    fn reset(&mut self) {
        self.current = 0;
    }
}

/// Walks back to the arena center.
pub struct ReturnToCenter {
    pub tolerance: f32,
}

impl Behavior<AgentContext> for ReturnToCenter {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        let center = ctx.observation.arena.center;
        if ctx.observation.self_position.distance(center) <= self.tolerance {
            return Status::Success;
        }
        match step_toward(ctx, center) {
            Status::Running if ctx.observation.self_position.distance(center) <= self.tolerance => {
                Status::Success
            }
            status => status,
        }
    }
}

impl Default for ReturnToCenter {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_ARRIVAL_TOLERANCE,
        }
    }
}

/// Stands still. Always succeeds unless the combatant cannot act.
pub struct IdleAction;

impl Behavior<AgentContext> for IdleAction {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        Status::from_bool(ctx.perform(Action::Idle).success)
    }
}

/// Moves one tick toward `target`.
///
/// Running after a move that made progress, Failure when the move was
/// rejected or nothing moved (blocked path, arena edge, zero tick).
fn step_toward(ctx: &mut AgentContext, target: Vec2) -> Status {
    let from = ctx.observation.self_position;
    let Some(direction) = (target - from).try_normalize() else {
        return Status::Success;
    };

    let result = ctx.perform(Action::Move(direction));
    if !result.success {
        return Status::Failure;
    }
    if ctx.observation.self_position.distance_squared(from) <= f32::EPSILON {
        tracing::debug!(combatant = %ctx.me().id(), "movement made no progress");
        return Status::Failure;
    }
    Status::Running
}
