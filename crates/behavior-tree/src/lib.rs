//! Behavior tree library for real-time, tick-driven agents.
//!
//! This library provides a small, deterministic behavior tree implementation
//! for agents that are re-evaluated every simulation step.
//!
//! - **Caller-supplied time**: time-aware nodes read a [`Clock`] from the context
//! - **Running state**: multi-tick work reports [`Status::Running`] and is re-polled
//! - **Injectable randomness**: [`RandomSelector`] draws from a seedable RNG
//! - **Fail-fast construction**: invalid trees are rejected when built ([`TreeError`])
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure or Running
//! - Composite nodes: [`Sequence`], [`Selector`], [`RandomSelector`],
//!   [`UtilitySelector`], [`Parallel`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`], [`Repeater`], [`CooldownGate`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Clock};
pub use composite::{Parallel, RandomSelector, ScoredOption, Selector, Sequence, UtilitySelector};
pub use decorator::{AlwaysSucceed, CooldownGate, Inverter, Repeater};
pub use error::{TreeError, TreeResult};
pub use status::Status;
