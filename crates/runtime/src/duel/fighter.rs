use behavior_tree::Behavior;
use combat_core::ArenaBounds;

use crate::presets::PresetKind;
use crate::subtrees::BehaviorTree;

/// The decision-making half of a duel participant.
///
/// The combatant itself lives in the [`AgentContext`](crate::AgentContext);
/// the fighter in the same slot drives it.
pub struct Fighter {
    label: String,
    pub(crate) tree: BehaviorTree,
}

impl Fighter {
    pub fn new(label: impl Into<String>, tree: BehaviorTree) -> Self {
        Self {
            label: label.into(),
            tree,
        }
    }

    /// Fighter running a preset, labelled with the preset name.
    pub fn preset(kind: PresetKind, seed: u64, arena: ArenaBounds) -> Self {
        Self::new(kind.as_str(), kind.build(seed, arena))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Clears every stateful node of the tree.
    pub fn reset(&mut self) {
        self.tree.reset();
    }
}
