use super::{ActionKind, ActionRejection};

/// Outcome of an action request.
///
/// `message` is diagnostic text only; control flow must use `success` and
/// `rejection`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub success: bool,
    pub action: ActionKind,
    /// Damage dealt by this action (0 if none).
    pub damage: f32,
    pub rejection: Option<ActionRejection>,
    pub message: String,
}

impl ActionResult {
    pub fn accepted(action: ActionKind) -> Self {
        Self {
            success: true,
            action,
            damage: 0.0,
            rejection: None,
            message: String::new(),
        }
    }

    pub fn rejected(action: ActionKind, reason: ActionRejection) -> Self {
        Self {
            success: false,
            action,
            damage: 0.0,
            rejection: Some(reason),
            message: reason.to_string(),
        }
    }

    #[must_use]
    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }
}
