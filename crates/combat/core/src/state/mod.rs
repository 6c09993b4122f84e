//! Combatant state: identifiers, discrete states, timers and the action
//! state machine itself.

pub mod combatant;
pub mod timer;
pub mod types;

pub use combatant::{ActionLock, Combatant, CooldownState, Invincibility, InvincibilitySource};
pub use timer::{Cooldown, Countdown, TIMER_EPSILON, sanitize_delta};
pub use types::{CombatState, CombatantId};
