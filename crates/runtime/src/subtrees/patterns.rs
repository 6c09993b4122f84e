//! Layer 1: Basic if-then patterns.
//!
//! Each pattern guards a single action with the conditions it needs. They are
//! the smallest reusable units of the agent library.
//!
//! # Naming Convention
//!
//! Patterns follow the `action_when_condition()` convention to express the
//! if-then relationship.

use behavior_tree::Sequence;
use combat_core::{ActionKind, Vec2};

use crate::nodes::{
    AttackEnemy, Defend, DodgeAwayFromEnemy, HasBlockedRecently, IdleAction, IsCooldownReady,
    IsEnemyAttacking, IsEnemyInAttackRange, IsEnemyInRange, IsHealthBelow, IsOutsideArena,
    MoveTowardEnemy, Patrol, RetreatFromEnemy, ReturnToCenter,
};

use super::BehaviorTree;

// ============================================================================
// Combat Patterns
// ============================================================================

/// Swing when the enemy is in reach and the attack is off cooldown.
///
/// # Example
///
/// ```rust,ignore
/// Selector::new(vec![
///     patterns::attack_when_in_range(),
///     patterns::chase_enemy(1.5),
/// ])
/// ```
pub fn attack_when_in_range() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(IsEnemyInAttackRange),
        Box::new(IsCooldownReady(ActionKind::Attack)),
        Box::new(AttackEnemy),
    ]))
}

/// Punish right after a successful block.
pub fn counter_after_block() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(HasBlockedRecently),
        Box::new(IsEnemyInAttackRange),
        Box::new(IsCooldownReady(ActionKind::Attack)),
        Box::new(AttackEnemy),
    ]))
}

// ============================================================================
// Defensive Patterns
// ============================================================================

/// Raise the guard against an incoming swing.
pub fn defend_when_attacked() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(IsEnemyAttacking),
        Box::new(IsEnemyInAttackRange),
        Box::new(IsCooldownReady(ActionKind::Defend)),
        Box::new(Defend),
    ]))
}

/// Dodge away from an incoming swing.
pub fn dodge_when_attacked() -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(IsEnemyAttacking),
        Box::new(IsEnemyInAttackRange),
        Box::new(IsCooldownReady(ActionKind::Dodge)),
        Box::new(DodgeAwayFromEnemy),
    ]))
}

// ============================================================================
// Survival Patterns
// ============================================================================

/// Back off to `safe_distance` when health drops below `ratio`.
///
/// # Arguments
///
/// * `ratio` - Health ratio (0.0-1.0) below which to retreat
/// * `safe_distance` - Distance at which the retreat is complete
pub fn retreat_when_low_health(ratio: f32, safe_distance: f32) -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(IsHealthBelow { ratio }),
        Box::new(RetreatFromEnemy { safe_distance }),
    ]))
}

/// Walk back toward the center when within `margin` of the arena edge.
pub fn recover_when_near_edge(margin: f32) -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(IsOutsideArena { margin }),
        Box::new(ReturnToCenter::default()),
    ]))
}

// ============================================================================
// Movement Patterns
// ============================================================================

/// Close in until `stop_distance`.
pub fn chase_enemy(stop_distance: f32) -> BehaviorTree {
    Box::new(MoveTowardEnemy { stop_distance })
}

/// Close in only once the enemy comes within `sight`.
pub fn chase_when_spotted(sight: f32, stop_distance: f32) -> BehaviorTree {
    Box::new(Sequence::new(vec![
        Box::new(IsEnemyInRange { range: sight }),
        Box::new(MoveTowardEnemy { stop_distance }),
    ]))
}

/// Loop over `waypoints`.
pub fn patrol(waypoints: Vec<Vec2>, tolerance: f32) -> BehaviorTree {
    Box::new(Patrol::new(waypoints, tolerance))
}

// ============================================================================
// Fallback Patterns
// ============================================================================

/// Stand still. Use as the last child of a selector.
pub fn idle_fallback() -> BehaviorTree {
    Box::new(IdleAction)
}
