//! Reasons an action request is turned down.

use super::ActionKind;

/// Why [`Combatant::execute_action`](crate::Combatant::execute_action)
/// rejected an action.
///
/// Rejections are ordinary gameplay outcomes, never faults: they travel
/// inside an [`ActionResult`](crate::ActionResult) and never cross the tick
/// boundary as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRejection {
    /// The combatant is dead.
    #[error("action unavailable: combatant is dead")]
    Dead,

    /// Another action still holds the lock.
    #[error("action unavailable: {0} in progress")]
    Locked(ActionKind),

    /// The requested action's cooldown has not elapsed.
    #[error("{0} is on cooldown")]
    OnCooldown(ActionKind),
}
