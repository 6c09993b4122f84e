//! Reusable behavior tree subtrees.
//!
//! Subtrees are organized in two layers:
//!
//! - **Layer 1 (Patterns)**: one condition chain guarding one action
//! - **Layer 2 (Tactics)**: patterns combined toward a goal (engaging,
//!   guarding)
//!
//! Complete agents are assembled from these in [`presets`](crate::presets).
//!
//! # Example
//!
//! ```rust,ignore
//! use behavior_tree::builder::selector;
//! use runtime::subtrees::{patterns, tactics};
//!
//! let custom = selector(vec![
//!     patterns::retreat_when_low_health(0.25, 6.0),
//!     tactics::engage(1.5),
//!     patterns::idle_fallback(),
//! ]);
//! ```

pub mod patterns;
pub mod tactics;

use behavior_tree::Behavior;

use crate::context::AgentContext;

/// Boxed tree ticked against an [`AgentContext`].
pub type BehaviorTree = Box<dyn Behavior<AgentContext>>;
