//! Hit resolution for an open attack window.
//!
//! This is the only place one combatant mutates another: an attacker with an
//! open hit window delivers damage through the target's own
//! [`Combatant::take_damage`], so defend and invincibility rules always apply.

use crate::env::CombatEnv;
use crate::state::{Combatant, CombatantId};

use super::damage::{DamageOutcome, scale_damage};

/// A single target contacted by a swing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub target: CombatantId,
    /// Nearest in-range target takes full damage; others take splash damage.
    pub primary: bool,
    /// Damage offered before the target's own rules.
    pub offered: f32,
    pub outcome: DamageOutcome,
}

/// Everything a swing connected with during one resolution pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrikeReport {
    pub hits: Vec<Hit>,
}

impl StrikeReport {
    /// Sum of damage actually applied; `0.0` when nothing landed.
    pub fn total_damage(&self) -> f32 {
        self.hits
            .iter()
            .fold(0.0, |total, hit| total + hit.outcome.applied())
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Resolves the attacker's open swing against `targets`.
///
/// # Rules
///
/// - nothing happens unless the attacker's hit window is open
/// - a target is eligible if alive, within `attack_range`, not behind a
///   blocked line, and not already struck by this swing
/// - the nearest in-range target is primary and takes `attack_damage`
/// - other eligible targets inside the forward cone take
///   `attack_damage * splash_ratio`
/// - a target the swing damaged or that blocked it is recorded, so a swing
///   strikes each target at most once even if it stays in range over several
///   ticks
/// - an invincible target is not recorded: once its window closes the same
///   swing can still land
pub fn resolve_strike(
    attacker: &mut Combatant,
    targets: &mut [&mut Combatant],
    env: &CombatEnv<'_>,
) -> StrikeReport {
    let mut report = StrikeReport::default();
    if !attacker.is_alive() || !attacker.is_hit_window_open() {
        return report;
    }

    let attacker_id = attacker.id();
    let config = *attacker.config();
    let origin = attacker.position();
    let facing = attacker.facing();
    let cone_cos = config.splash_cone_cos();

    let in_reach = |target: &Combatant| {
        target.id() != attacker_id
            && target.is_alive()
            && target.position().distance(origin) <= config.attack_range
            && !env.spatial.is_path_blocked(origin, target.position())
    };

    let primary = targets
        .iter()
        .map(|target| &**target)
        .filter(|&target| in_reach(target))
        .min_by(|a, b| {
            a.position()
                .distance_squared(origin)
                .total_cmp(&b.position().distance_squared(origin))
        })
        .map(|target| target.id());

    let mut contacts = Vec::new();
    for (index, target) in targets.iter().enumerate() {
        let target: &Combatant = target;
        if !in_reach(target) || attacker.has_struck(target.id()) {
            continue;
        }
        let is_primary = Some(target.id()) == primary;
        if !is_primary {
            let inside_cone = (target.position() - origin)
                .try_normalize()
                .is_some_and(|direction| direction.dot(facing) >= cone_cos);
            if !inside_cone {
                continue;
            }
        }
        contacts.push((index, is_primary));
    }

    for (index, is_primary) in contacts {
        let target = &mut targets[index];
        let offered = if is_primary {
            config.attack_damage
        } else {
            scale_damage(config.attack_damage, config.splash_ratio)
        };
        let outcome = target.take_damage(offered);
        if !matches!(outcome, DamageOutcome::Ignored(_)) {
            attacker.mark_struck(target.id());
        }

        tracing::debug!(
            attacker = %attacker_id,
            victim = %target.id(),
            primary = is_primary,
            offered,
            ?outcome,
            "strike connected"
        );
        report.hits.push(Hit {
            target: target.id(),
            primary: is_primary,
            offered,
            outcome,
        });
    }

    report
}
