use std::fmt;

/// Unique identifier for a combatant within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete state of a combatant. Exactly one holds at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatState {
    #[default]
    Idle,
    Moving,
    Attacking,
    Defending,
    Dodging,
    /// Terminal. No transition leaves this state until the next reset.
    Dead,
}

impl CombatState {
    pub const ALL: [CombatState; 6] = [
        CombatState::Idle,
        CombatState::Moving,
        CombatState::Attacking,
        CombatState::Defending,
        CombatState::Dodging,
        CombatState::Dead,
    ];

    /// Stable index used when encoding observations.
    pub const fn index(self) -> usize {
        match self {
            CombatState::Idle => 0,
            CombatState::Moving => 1,
            CombatState::Attacking => 2,
            CombatState::Defending => 3,
            CombatState::Dodging => 4,
            CombatState::Dead => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CombatState::Idle => "idle",
            CombatState::Moving => "moving",
            CombatState::Attacking => "attacking",
            CombatState::Defending => "defending",
            CombatState::Dodging => "dodging",
            CombatState::Dead => "dead",
        }
    }
}

impl fmt::Display for CombatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
