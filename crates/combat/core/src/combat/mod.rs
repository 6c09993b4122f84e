//! Combat resolution.
//!
//! - `damage`: outcome of a single damage delivery
//! - `strike`: hit resolution for an open attack window
//! - [`perform_action`]: execute an action and, for attacks, resolve the
//!   opening strike in the same tick

pub mod damage;
pub mod strike;

pub use damage::{DamageOutcome, IgnoreReason, scale_damage};
pub use strike::{Hit, StrikeReport, resolve_strike};

use crate::action::{Action, ActionResult};
use crate::env::CombatEnv;
use crate::state::Combatant;

/// Executes `action` for `actor`; an accepted attack immediately resolves
/// its strike against `opponents`.
///
/// The returned result carries the damage applied by that first resolution.
/// Later ticks of the same swing are resolved by the orchestrator through
/// [`resolve_strike`].
pub fn perform_action(
    actor: &mut Combatant,
    action: Action,
    opponents: &mut [&mut Combatant],
    env: &CombatEnv<'_>,
) -> (ActionResult, StrikeReport) {
    let result = actor.execute_action(action, env);
    if !result.success || !matches!(action, Action::Attack) {
        return (result, StrikeReport::default());
    }

    let report = resolve_strike(actor, opponents, env);
    let result = result.with_damage(report.total_damage());
    (result, report)
}
