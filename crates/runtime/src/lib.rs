//! Agent runtime for tree-driven duels.
//!
//! This crate wires behavior trees to the combat rules and runs duels step
//! by step. Consumers build two [`Fighter`]s (usually from [`presets`]) and
//! hand them to a [`Duel`] together with a [`combat_content::DuelSetup`].
//!
//! Modules are organized by responsibility:
//! - [`context`] hosts the blackboard every node ticks against
//! - [`nodes`] provides the condition and action leaves
//! - [`subtrees`] and [`presets`] compose leaves into complete agents
//! - [`duel`] is the sequential orchestrator
//! - [`stats`] rebuilds per-episode counters from combat events
pub mod context;
pub mod duel;
pub mod error;
pub mod nodes;
pub mod presets;
pub mod stats;
pub mod subtrees;

pub use context::{AgentContext, Slot};
pub use duel::{Duel, DuelOutcome, Fighter, StepReport};
pub use error::{Result, RuntimeError};
pub use presets::PresetKind;
pub use stats::{CombatantStats, EpisodeStats};
pub use subtrees::BehaviorTree;
