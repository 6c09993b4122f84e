use std::fmt;

use behavior_tree::Status;
use combat_core::{CombatEvent, CombatantId};

/// How a duel ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DuelOutcome {
    /// The other combatant died.
    Winner(CombatantId),
    /// Both combatants died in the same step.
    Draw,
    /// The step budget ran out with both alive.
    Timeout,
}

impl DuelOutcome {
    pub fn winner(self) -> Option<CombatantId> {
        match self {
            DuelOutcome::Winner(id) => Some(id),
            DuelOutcome::Draw | DuelOutcome::Timeout => None,
        }
    }
}

impl fmt::Display for DuelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuelOutcome::Winner(id) => write!(f, "winner {id}"),
            DuelOutcome::Draw => f.write_str("draw"),
            DuelOutcome::Timeout => f.write_str("timeout"),
        }
    }
}

/// What happened during one [`Duel::step`](super::Duel::step).
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// 1-based index of the step within the episode.
    pub step: u64,
    /// Simulation time after the step.
    pub time: f64,
    /// Root status of each tree; `None` when the combatant did not act.
    pub statuses: [Option<Status>; 2],
    /// Events recorded during the step, in order.
    pub events: Vec<CombatEvent>,
    /// Set once the duel is decided.
    pub outcome: Option<DuelOutcome>,
}
