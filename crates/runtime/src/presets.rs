//! Complete agent definitions.
//!
//! Ready-to-use trees built from [`subtrees`](crate::subtrees). Every preset ends in an idle
//! fallback, so the root never fails while the combatant can act.
//!
//! ```text
//! aggressive()
//!   └─ Selector
//!       ├─ patterns::recover_when_near_edge(1.0)
//!       ├─ tactics::engage(1.5)
//!       │   ├─ patterns::attack_when_in_range()
//!       │   └─ patterns::chase_enemy(1.5)
//!       └─ patterns::idle_fallback()
//! ```

use std::fmt;
use std::str::FromStr;

use behavior_tree::builder::selector;
use combat_core::{ArenaBounds, Vec2};

use crate::error::RuntimeError;
use crate::nodes::DEFAULT_ARRIVAL_TOLERANCE;
use crate::subtrees::{BehaviorTree, patterns, tactics};

/// Distance presets stop at when closing in, inside the default 2.0 reach.
const ENGAGE_DISTANCE: f32 = 1.5;

/// Sight range of a patrolling agent.
const PATROL_SIGHT: f32 = 5.0;

/// Presses forward and swings whenever the attack is ready.
pub fn aggressive() -> BehaviorTree {
    selector(vec![
        patterns::recover_when_near_edge(1.0),
        tactics::engage(ENGAGE_DISTANCE),
        patterns::idle_fallback(),
    ])
}

/// Guards first, counters after blocks and backs off when hurt.
///
/// # Behavior
///
/// 1. Block or dodge incoming swings, counter after a block
/// 2. Below 30% health retreat to 6 units when that scores higher than
///    fighting
/// 3. Otherwise engage
pub fn defensive() -> BehaviorTree {
    selector(vec![
        tactics::guard(),
        tactics::fight_or_flight(0.3, 6.0, ENGAGE_DISTANCE),
        patterns::idle_fallback(),
    ])
}

/// Mixes block, dodge and attack at random when the enemy swings.
///
/// The same `seed` always yields the same choices for the same duel.
pub fn balanced(seed: u64) -> BehaviorTree {
    selector(vec![
        patterns::recover_when_near_edge(1.0),
        tactics::mixed_response(seed, 6.0),
        tactics::engage(ENGAGE_DISTANCE),
        patterns::idle_fallback(),
    ])
}

/// Walks `waypoints` until the enemy comes into sight, then engages.
pub fn patroller(waypoints: Vec<Vec2>) -> BehaviorTree {
    selector(vec![
        patterns::attack_when_in_range(),
        patterns::chase_when_spotted(PATROL_SIGHT, ENGAGE_DISTANCE),
        patterns::patrol(waypoints, DEFAULT_ARRIVAL_TOLERANCE),
        patterns::idle_fallback(),
    ])
}

/// Square of waypoints at half the arena radius around its center.
pub fn default_waypoints(arena: ArenaBounds) -> Vec<Vec2> {
    let half = arena.radius * 0.5;
    [
        Vec2::new(half, half),
        Vec2::new(-half, half),
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
    ]
    .into_iter()
    .map(|offset| arena.center + offset)
    .collect()
}

/// Preset selectable by name from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetKind {
    Aggressive,
    Defensive,
    Balanced,
    Patroller,
}

impl PresetKind {
    pub const ALL: [PresetKind; 4] = [
        PresetKind::Aggressive,
        PresetKind::Defensive,
        PresetKind::Balanced,
        PresetKind::Patroller,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PresetKind::Aggressive => "aggressive",
            PresetKind::Defensive => "defensive",
            PresetKind::Balanced => "balanced",
            PresetKind::Patroller => "patroller",
        }
    }

    /// Builds the tree. `seed` feeds the random choices of `balanced`; the
    /// patroller walks [`default_waypoints`] of `arena`.
    pub fn build(self, seed: u64, arena: ArenaBounds) -> BehaviorTree {
        match self {
            PresetKind::Aggressive => aggressive(),
            PresetKind::Defensive => defensive(),
            PresetKind::Balanced => balanced(seed),
            PresetKind::Patroller => patroller(default_waypoints(arena)),
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetKind {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| RuntimeError::UnknownPreset(s.to_string()))
    }
}
