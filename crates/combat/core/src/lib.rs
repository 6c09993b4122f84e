//! Deterministic real-time combat rules for 1v1 duels.
//!
//! `combat-core` defines the canonical combatant state machine, hit
//! resolution and the per-tick observation snapshot. It has no notion of
//! rendering, physics engines or learning; those are collaborators reached
//! through [`env::SpatialOracle`] and [`listener::CombatListener`].
//!
//! Time only moves when the caller says so: every timer is advanced by
//! [`Combatant::advance`] with a caller-supplied delta, so a fixed sequence of
//! deltas always replays the same battle.
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod listener;
pub mod observation;
pub mod state;

pub use action::{Action, ActionKind, ActionRejection, ActionResult};
pub use combat::{
    DamageOutcome, Hit, IgnoreReason, StrikeReport, perform_action, resolve_strike,
};
pub use config::{CombatConfig, ConfigError};
pub use env::{ArenaBounds, CombatEnv, Obstacle, SpatialHit, SpatialOracle, StaticField};
pub use listener::{CombatEvent, CombatListener, NoopListener};
pub use observation::{CooldownRatios, Observation};
pub use state::{
    ActionLock, CombatState, Combatant, CombatantId, Cooldown, CooldownState, Countdown,
    Invincibility, InvincibilitySource,
};

pub use glam::Vec2;
