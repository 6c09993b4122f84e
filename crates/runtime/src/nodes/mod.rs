//! Duel-specific behavior tree nodes.
//!
//! Concrete leaves that read and drive [`AgentContext`](crate::AgentContext):
//!
//! - `conditions`: predicates over the observation (Success/Failure only)
//! - `actions`: nodes that request actions from the combat state machine

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
