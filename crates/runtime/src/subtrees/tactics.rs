//! Layer 2: Goal-oriented tactics.
//!
//! Tactics combine patterns toward one goal: pressing an attack, or staying
//! safe while the enemy swings.

use behavior_tree::builder::{cooldown, random_selector, selector};
use behavior_tree::{ScoredOption, UtilitySelector};

use crate::context::AgentContext;

use super::{BehaviorTree, patterns};

/// Attack when possible, otherwise close in to `stop_distance`.
pub fn engage(stop_distance: f32) -> BehaviorTree {
    selector(vec![
        patterns::attack_when_in_range(),
        patterns::chase_enemy(stop_distance),
    ])
}

/// Answer an incoming swing with a block, or a dodge when the guard is on
/// cooldown, then counter.
pub fn guard() -> BehaviorTree {
    selector(vec![
        patterns::defend_when_attacked(),
        patterns::dodge_when_attacked(),
        patterns::counter_after_block(),
    ])
}

/// Pick one of block, dodge or trade blows at random each tick.
///
/// The dodge is gated to at most once every `dodge_gate` seconds of
/// simulation time so the agent does not burn its escape on every swing.
pub fn mixed_response(seed: u64, dodge_gate: f64) -> BehaviorTree {
    random_selector(
        vec![
            patterns::defend_when_attacked(),
            cooldown(patterns::dodge_when_attacked(), dodge_gate),
            patterns::attack_when_in_range(),
        ],
        seed,
    )
}

/// Retreat or fight, by utility.
///
/// Retreat scores rise as health falls below `retreat_below`; fighting
/// scores stay flat. The higher one runs.
pub fn fight_or_flight(retreat_below: f32, safe_distance: f32, stop_distance: f32) -> BehaviorTree {
    let retreat_score = move |ctx: &AgentContext| {
        let ratio = ctx.observation.health_ratio();
        if ratio >= retreat_below || ctx.observation.distance >= safe_distance {
            0
        } else {
            50 + ((1.0 - ratio / retreat_below) * 50.0) as u32
        }
    };

    let options: Vec<ScoredOption<AgentContext>> = vec![
        (
            patterns::retreat_when_low_health(retreat_below, safe_distance),
            Box::new(retreat_score),
        ),
        (engage(stop_distance), Box::new(|_: &AgentContext| 50)),
    ];
    Box::new(UtilitySelector::new(options))
}
