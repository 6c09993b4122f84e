//! Damage outcomes.

/// What happened to a single damage delivery.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    /// Health was reduced by `amount`.
    Applied { amount: f32, lethal: bool },
    /// The target was defending; nothing was applied.
    Blocked,
    /// The target could not be hurt at all.
    Ignored(IgnoreReason),
}

impl DamageOutcome {
    /// Damage actually subtracted from health.
    pub fn applied(&self) -> f32 {
        match self {
            DamageOutcome::Applied { amount, .. } => *amount,
            DamageOutcome::Blocked | DamageOutcome::Ignored(_) => 0.0,
        }
    }

    pub fn is_lethal(&self) -> bool {
        matches!(self, DamageOutcome::Applied { lethal: true, .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, DamageOutcome::Blocked)
    }
}

/// Why a damage delivery had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    Dead,
    /// Dodge or post-hit grace window.
    Invincible,
}

/// Scales `damage` for a strike, never below zero.
pub fn scale_damage(damage: f32, multiplier: f32) -> f32 {
    (damage * multiplier).max(0.0)
}
