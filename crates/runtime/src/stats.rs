//! Per-episode statistics collected through [`CombatListener`].
//!
//! The combat rules keep no counters; this listener rebuilds them from the
//! event stream of one battle.

use std::collections::BTreeMap;

use combat_core::{ActionKind, ActionResult, CombatListener, CombatantId, DamageOutcome};

/// Counters for one combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CombatantStats {
    pub attacks_started: u32,
    /// Hits that applied damage.
    pub attacks_landed: u32,
    pub damage_dealt: f32,
    pub damage_taken: f32,
    pub blocks: u32,
    pub dodges: u32,
    pub rejected_actions: u32,
    pub died: bool,
}

/// Statistics for the current battle, keyed by combatant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeStats {
    combatants: BTreeMap<CombatantId, CombatantStats>,
    battles: u32,
}

impl EpisodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters of `id`, zeroed if it has not appeared yet.
    pub fn get(&self, id: CombatantId) -> CombatantStats {
        self.combatants.get(&id).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CombatantId, &CombatantStats)> {
        self.combatants.iter().map(|(id, stats)| (*id, stats))
    }

    /// Battles started since this listener was created.
    pub fn battles(&self) -> u32 {
        self.battles
    }

    fn entry(&mut self, id: CombatantId) -> &mut CombatantStats {
        self.combatants.entry(id).or_default()
    }
}

impl CombatListener for EpisodeStats {
    fn on_battle_started(&mut self, combatant: CombatantId) {
        // Both combatants announce themselves; count the battle once.
        if self.combatants.is_empty() || self.combatants.contains_key(&combatant) {
            self.combatants.clear();
            self.battles += 1;
        }
        self.entry(combatant);
    }

    fn on_action(&mut self, actor: CombatantId, result: &ActionResult) {
        let stats = self.entry(actor);
        if !result.success {
            stats.rejected_actions += 1;
            return;
        }
        match result.action {
            ActionKind::Attack => stats.attacks_started += 1,
            ActionKind::Dodge => stats.dodges += 1,
            ActionKind::Idle | ActionKind::Move | ActionKind::Defend => {}
        }
    }

    fn on_damage(&mut self, attacker: CombatantId, target: CombatantId, outcome: DamageOutcome) {
        let amount = outcome.applied();
        if amount <= 0.0 {
            return;
        }
        let dealt = self.entry(attacker);
        dealt.attacks_landed += 1;
        dealt.damage_dealt += amount;
        self.entry(target).damage_taken += amount;
    }

    fn on_block(&mut self, _attacker: CombatantId, defender: CombatantId) {
        self.entry(defender).blocks += 1;
    }

    fn on_death(&mut self, combatant: CombatantId) {
        self.entry(combatant).died = true;
    }
}
