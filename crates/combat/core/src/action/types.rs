use std::fmt;

use glam::Vec2;

/// An action a combatant can attempt on a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Stand still. Always accepted while unlocked and alive.
    Idle,
    /// Move along a direction for one tick. Does not take the action lock.
    Move(Vec2),
    Attack,
    Defend,
    /// Dodge along a direction, or straight back from the facing when `None`.
    Dodge(Option<Vec2>),
}

impl Action {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Idle => ActionKind::Idle,
            Action::Move(_) => ActionKind::Move,
            Action::Attack => ActionKind::Attack,
            Action::Defend => ActionKind::Defend,
            Action::Dodge(_) => ActionKind::Dodge,
        }
    }
}

/// Payload-free action discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Idle,
    Move,
    Attack,
    Defend,
    Dodge,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Idle => "idle",
            ActionKind::Move => "move",
            ActionKind::Attack => "attack",
            ActionKind::Defend => "defend",
            ActionKind::Dodge => "dodge",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
