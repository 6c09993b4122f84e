//! Telemetry collaborator interface.
//!
//! The orchestrator forwards every [`CombatEvent`] of a battle to a
//! [`CombatListener`] it was handed explicitly. Listeners live for one
//! battle; there is no global collector.

use crate::action::ActionResult;
use crate::combat::DamageOutcome;
use crate::state::CombatantId;

/// Something observable that happened during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    BattleStarted {
        combatant: CombatantId,
    },
    /// An action request was answered (accepted or rejected).
    Action {
        actor: CombatantId,
        result: ActionResult,
    },
    Damage {
        attacker: CombatantId,
        target: CombatantId,
        outcome: DamageOutcome,
    },
    Died {
        combatant: CombatantId,
    },
}

/// Receives combat events. Every method defaults to a no-op.
pub trait CombatListener {
    fn on_battle_started(&mut self, _combatant: CombatantId) {}

    fn on_action(&mut self, _actor: CombatantId, _result: &ActionResult) {}

    fn on_damage(
        &mut self,
        _attacker: CombatantId,
        _target: CombatantId,
        _outcome: DamageOutcome,
    ) {
    }

    /// A defending target fully blocked a hit.
    fn on_block(&mut self, _attacker: CombatantId, _defender: CombatantId) {}

    fn on_death(&mut self, _combatant: CombatantId) {}

    /// Dispatches `event` to the matching callback.
    fn notify(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::BattleStarted { combatant } => self.on_battle_started(*combatant),
            CombatEvent::Action { actor, result } => self.on_action(*actor, result),
            CombatEvent::Damage {
                attacker,
                target,
                outcome,
            } => {
                self.on_damage(*attacker, *target, *outcome);
                if outcome.is_blocked() {
                    self.on_block(*attacker, *target);
                }
            }
            CombatEvent::Died { combatant } => self.on_death(*combatant),
        }
    }
}

/// Listener that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl CombatListener for NoopListener {}
