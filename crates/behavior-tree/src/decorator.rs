//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic), [`AlwaysSucceed`] (error
//! suppression), [`Repeater`] (counted re-runs) and [`CooldownGate`]
//! (time-based re-entry suppression).

use crate::error::{TreeError, TreeResult};
use crate::{Behavior, Clock, Status};

/// Inverts the result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - If the child returns `Running`, so does the inverter
///
/// This is analogous to a logical NOT (!) operation.
pub struct Inverter<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Inverter<C> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Returns `Success` once the child settles, regardless of its result.
///
/// # Semantics
///
/// - If the child returns `Success`, returns `Success`
/// - If the child returns `Failure`, **still returns `Success`**
/// - If the child returns `Running`, returns `Running`
///
/// This is useful for:
/// - Optional behaviors that shouldn't cause a sequence to fail
/// - Logging/debugging nodes that observe state without affecting control flow
pub struct AlwaysSucceed<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysSucceed<C> {
    /// Creates a new always-succeed wrapper around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Running => Status::Running,
            Status::Success | Status::Failure => Status::Success,
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Re-runs its child until it has succeeded `count` times.
///
/// # Semantics
///
/// - Child `Success`: the counter increments; returns `Running` until the
///   counter reaches `count`, then `Success`. An infinite repeater never
///   leaves `Running` on success.
/// - Child `Failure`: returns `Failure` immediately. The counter is kept.
/// - Child `Running`: returns `Running`.
///
/// The counter only goes back to zero through [`Behavior::reset`].
pub struct Repeater<C> {
    child: Box<dyn Behavior<C>>,
    limit: Option<u32>,
    completed: u32,
}

impl<C> Repeater<C> {
    /// Creates a repeater that succeeds after `count` child successes.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn new(child: Box<dyn Behavior<C>>, count: u32) -> Self {
        assert!(count > 0, "Repeater count must be at least 1");
        Self {
            child,
            limit: Some(count),
            completed: 0,
        }
    }

    /// Fallible variant of [`Repeater::new`].
    pub fn try_new(child: Box<dyn Behavior<C>>, count: u32) -> TreeResult<Self> {
        if count == 0 {
            return Err(TreeError::InvalidCount);
        }
        Ok(Self::new(child, count))
    }

    /// Creates a repeater that keeps re-running its child forever.
    pub fn forever(child: Box<dyn Behavior<C>>) -> Self {
        Self {
            child,
            limit: None,
            completed: 0,
        }
    }

    /// Number of child successes counted so far.
    pub fn completed(&self) -> u32 {
        self.completed
    }
}

impl<C> Behavior<C> for Repeater<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Success => {
                self.completed = self.completed.saturating_add(1);
                match self.limit {
                    Some(limit) if self.completed >= limit => Status::Success,
                    _ => Status::Running,
                }
            }
            Status::Failure => Status::Failure,
            Status::Running => Status::Running,
        }
    }

    fn reset(&mut self) {
        self.completed = 0;
        self.child.reset();
    }
}

/// Suppresses its child for `cooldown` seconds after each child success.
///
/// # Semantics
///
/// - Within the cooldown window: returns `Failure` without ticking the child
/// - Otherwise: ticks the child; a `Success` stamps the current time
///
/// Time comes from the context's [`Clock`].
pub struct CooldownGate<C> {
    child: Box<dyn Behavior<C>>,
    cooldown: f64,
    last_success: Option<f64>,
}

impl<C> CooldownGate<C> {
    /// Creates a cooldown gate.
    ///
    /// # Panics
    ///
    /// Panics if `cooldown` is negative or not finite.
    pub fn new(child: Box<dyn Behavior<C>>, cooldown: f64) -> Self {
        match Self::try_new(child, cooldown) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible variant of [`CooldownGate::new`].
    pub fn try_new(child: Box<dyn Behavior<C>>, cooldown: f64) -> TreeResult<Self> {
        if !cooldown.is_finite() || cooldown < 0.0 {
            return Err(TreeError::InvalidCooldown { seconds: cooldown });
        }
        Ok(Self {
            child,
            cooldown,
            last_success: None,
        })
    }

    /// Seconds left before the child may run again at time `now`.
    pub fn remaining(&self, now: f64) -> f64 {
        self.last_success
            .map_or(0.0, |stamp| (self.cooldown - (now - stamp)).max(0.0))
    }
}

impl<C: Clock> Behavior<C> for CooldownGate<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let now = ctx.now();
        if let Some(stamp) = self.last_success
            && now - stamp < self.cooldown
        {
            return Status::Failure;
        }

        let status = self.child.tick(ctx);
        if status.is_success() {
            self.last_success = Some(now);
        }
        status
    }

    fn reset(&mut self) {
        self.last_success = None;
        self.child.reset();
    }
}
