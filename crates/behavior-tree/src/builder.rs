//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose `Box::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use crate::{
    AlwaysSucceed, Behavior, Clock, CooldownGate, Inverter, Parallel, RandomSelector, Repeater,
    Selector, Sequence,
};

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a selector node.
///
/// Shorthand for `Box::new(Selector::new(children))`.
#[inline]
pub fn selector<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

/// Creates a seeded random selector node.
#[inline]
pub fn random_selector<C: 'static>(
    children: Vec<Box<dyn Behavior<C>>>,
    seed: u64,
) -> Box<dyn Behavior<C>> {
    Box::new(RandomSelector::seeded(children, seed))
}

/// Creates a parallel node requiring `threshold` successes.
#[inline]
pub fn parallel<C: 'static>(
    children: Vec<Box<dyn Behavior<C>>>,
    threshold: usize,
) -> Box<dyn Behavior<C>> {
    Box::new(Parallel::new(children, threshold))
}

/// Creates an inverter node.
///
/// Shorthand for `Box::new(Inverter::new(child))`.
#[inline]
pub fn inverter<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Inverter::new(child))
}

/// Creates an always-succeed node.
///
/// Shorthand for `Box::new(AlwaysSucceed::new(child))`.
#[inline]
pub fn always_succeed<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(AlwaysSucceed::new(child))
}

/// Creates a counted repeater node.
#[inline]
pub fn repeat<C: 'static>(child: Box<dyn Behavior<C>>, count: u32) -> Box<dyn Behavior<C>> {
    Box::new(Repeater::new(child, count))
}

/// Creates a cooldown gate around `child`.
#[inline]
pub fn cooldown<C: Clock + 'static>(
    child: Box<dyn Behavior<C>>,
    seconds: f64,
) -> Box<dyn Behavior<C>> {
    Box::new(CooldownGate::new(child, seconds))
}
