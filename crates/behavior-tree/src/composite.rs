//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the fundamental building blocks for creating complex
//! decision trees: [`Sequence`] (AND logic), [`Selector`] (OR logic), their
//! shuffled and scored variants, and [`Parallel`] (voting).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{TreeError, TreeResult, ensure_children};
use crate::{Behavior, Status};

/// Type alias for a scored behavior option in utility-based decision making.
///
/// Each option consists of:
/// - A behavior to execute
/// - A scoring function that evaluates desirability (0-100)
pub type ScoredOption<C> = (Box<dyn Behavior<C>>, Box<dyn Fn(&C) -> u32 + Send + Sync>);

fn reset_all<C>(children: &mut [Box<dyn Behavior<C>>]) {
    for child in children {
        child.reset();
    }
}

/// Executes child behaviors in sequence until one fails.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Running`, the sequence **keeps scanning** the remaining children
/// - After the scan, returns `Running` if any child was running, otherwise `Success`
///
/// Only `Failure` short-circuits. A running child does not hold back its
/// siblings within the same tick.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }

    /// Fallible variant of [`Sequence::new`].
    pub fn try_new(children: Vec<Box<dyn Behavior<C>>>) -> TreeResult<Self> {
        ensure_children("Sequence", &children)?;
        Ok(Self { children })
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let mut running = false;
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                Status::Running => running = true,
                Status::Failure => return Status::Failure, // Short-circuit
            }
        }
        if running {
            Status::Running
        } else {
            Status::Success
        }
    }

    fn reset(&mut self) {
        reset_all(&mut self.children);
    }
}

/// Executes child behaviors in order until one succeeds or is running.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the selector **stops immediately**
///   and returns that status
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }

    /// Fallible variant of [`Selector::new`].
    pub fn try_new(children: Vec<Box<dyn Behavior<C>>>) -> TreeResult<Self> {
        ensure_children("Selector", &children)?;
        Ok(Self { children })
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let len = self.children.len();
        select_in_order(&mut self.children, 0..len, ctx)
    }

    fn reset(&mut self) {
        reset_all(&mut self.children);
    }
}

fn select_in_order<C>(
    children: &mut [Box<dyn Behavior<C>>],
    order: impl IntoIterator<Item = usize>,
    ctx: &mut C,
) -> Status {
    for index in order {
        match children[index].tick(ctx) {
            Status::Failure => continue,
            settled => return settled, // Short-circuit on Success or Running
        }
    }
    Status::Failure
}

/// A [`Selector`] whose child order is shuffled on every tick.
///
/// The permutation is drawn from an injected random source, so a seeded
/// generator makes the evaluation order reproducible. Nothing about the
/// order persists between ticks.
pub struct RandomSelector<C, R = StdRng> {
    children: Vec<Box<dyn Behavior<C>>>,
    order: Vec<usize>,
    rng: R,
}

impl<C> RandomSelector<C, StdRng> {
    /// Creates a random selector seeded from operating system entropy.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self::with_rng(children, StdRng::from_os_rng())
    }

    /// Creates a random selector with a deterministic seed.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn seeded(children: Vec<Box<dyn Behavior<C>>>, seed: u64) -> Self {
        Self::with_rng(children, StdRng::seed_from_u64(seed))
    }
}

impl<C, R: Rng + Send + Sync> RandomSelector<C, R> {
    /// Creates a random selector drawing permutations from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn with_rng(children: Vec<Box<dyn Behavior<C>>>, rng: R) -> Self {
        assert!(
            !children.is_empty(),
            "RandomSelector must have at least one child"
        );
        let order = (0..children.len()).collect();
        Self {
            children,
            order,
            rng,
        }
    }

    /// Fallible variant of [`RandomSelector::with_rng`].
    pub fn try_with_rng(children: Vec<Box<dyn Behavior<C>>>, rng: R) -> TreeResult<Self> {
        ensure_children("RandomSelector", &children)?;
        Ok(Self::with_rng(children, rng))
    }
}

impl<C, R: Rng + Send + Sync> Behavior<C> for RandomSelector<C, R> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        self.order.shuffle(&mut self.rng);
        select_in_order(&mut self.children, self.order.iter().copied(), ctx)
    }

    fn reset(&mut self) {
        reset_all(&mut self.children);
    }
}

/// Executes child behaviors based on utility scores.
///
/// # Semantics
///
/// A `UtilitySelector` node evaluates all children's scores and picks the highest:
/// - Each child has an associated scoring function that returns a score (0-100)
/// - All scoring functions are evaluated before execution
/// - The child with the highest score is executed
/// - If all scores are 0, the selector returns `Failure`
///
/// # Example
///
/// ```rust,ignore
/// use behavior_tree::UtilitySelector;
///
/// let selector = UtilitySelector::new(vec![
///     (retreat_behavior(), Box::new(|ctx| compute_retreat_score(ctx))),
///     (attack_behavior(), Box::new(|ctx| compute_attack_score(ctx))),
/// ]);
/// ```
pub struct UtilitySelector<C> {
    options: Vec<ScoredOption<C>>,
}

impl<C> UtilitySelector<C> {
    /// Creates a new utility selector with the given options.
    ///
    /// Each option is a tuple of (behavior, scoring_function).
    /// The scoring function takes a read-only reference to the context
    /// and returns a score from 0 to 100.
    ///
    /// # Panics
    ///
    /// Panics if `options` is empty.
    pub fn new(options: Vec<ScoredOption<C>>) -> Self {
        assert!(
            !options.is_empty(),
            "UtilitySelector must have at least one option"
        );
        Self { options }
    }

    /// Fallible variant of [`UtilitySelector::new`].
    pub fn try_new(options: Vec<ScoredOption<C>>) -> TreeResult<Self> {
        ensure_children("UtilitySelector", &options)?;
        Ok(Self { options })
    }
}

impl<C> Behavior<C> for UtilitySelector<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        // Ties resolve to the earliest option.
        let mut best: Option<(usize, u32)> = None;
        for (index, (_, scorer)) in self.options.iter().enumerate() {
            let score = scorer(ctx);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score > 0 => self.options[index].0.tick(ctx),
            // All options scored 0 (all impossible/undesirable)
            _ => Status::Failure,
        }
    }

    fn reset(&mut self) {
        for (child, _) in &mut self.options {
            child.reset();
        }
    }
}

/// Ticks every child on every tick and decides by vote.
///
/// # Semantics
///
/// - All children are evaluated, there is no short-circuit
/// - `Success` once at least `threshold` children succeeded
/// - `Failure` once more than `children - threshold` failed (the threshold
///   can no longer be reached)
/// - `Running` otherwise; running children count toward neither side
pub struct Parallel<C> {
    children: Vec<Box<dyn Behavior<C>>>,
    threshold: usize,
}

impl<C> Parallel<C> {
    /// Creates a parallel node requiring `threshold` successes.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty or `threshold` is not in `1..=children.len()`.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>, threshold: usize) -> Self {
        match Self::try_new(children, threshold) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible variant of [`Parallel::new`].
    pub fn try_new(children: Vec<Box<dyn Behavior<C>>>, threshold: usize) -> TreeResult<Self> {
        ensure_children("Parallel", &children)?;
        if threshold == 0 || threshold > children.len() {
            return Err(TreeError::InvalidThreshold {
                threshold,
                children: children.len(),
            });
        }
        Ok(Self {
            children,
            threshold,
        })
    }

    /// Requires every child to succeed.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn all(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        let threshold = children.len();
        Self::new(children, threshold)
    }
}

impl<C> Behavior<C> for Parallel<C> {
    fn tick(&mut self, ctx: &mut C) -> Status {
        let mut successes = 0;
        let mut failures = 0;
        for child in &mut self.children {
            match child.tick(ctx) {
                Status::Success => successes += 1,
                Status::Failure => failures += 1,
                Status::Running => {}
            }
        }

        if successes >= self.threshold {
            Status::Success
        } else if failures > self.children.len() - self.threshold {
            Status::Failure
        } else {
            Status::Running
        }
    }

    fn reset(&mut self) {
        reset_all(&mut self.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestContext {
        value: i32,
        trace: Vec<&'static str>,
    }

    struct Increment;
    impl Behavior<TestContext> for Increment {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    struct Decrement;
    impl Behavior<TestContext> for Decrement {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.value -= 1;
            Status::Success
        }
    }

    struct FailAlways;
    impl Behavior<TestContext> for FailAlways {
        fn tick(&mut self, _ctx: &mut TestContext) -> Status {
            Status::Failure
        }
    }

    struct RunAlways;
    impl Behavior<TestContext> for RunAlways {
        fn tick(&mut self, _ctx: &mut TestContext) -> Status {
            Status::Running
        }
    }

    /// Records its label, then returns a fixed status.
    struct Traced(&'static str, Status);
    impl Behavior<TestContext> for Traced {
        fn tick(&mut self, ctx: &mut TestContext) -> Status {
            ctx.trace.push(self.0);
            self.1
        }
    }

    #[test]
    fn sequence_all_success() {
        let mut seq = Sequence::new(vec![Box::new(Increment), Box::new(Increment)]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn sequence_fails_on_first_failure() {
        let mut seq = Sequence::new(vec![
            Box::new(Increment),
            Box::new(FailAlways),
            Box::new(Increment), // Should not execute
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.value, 1); // Only first increment executed
    }

    #[test]
    fn sequence_keeps_scanning_past_running() {
        let mut seq = Sequence::new(vec![
            Box::new(RunAlways),
            Box::new(Increment), // Still executes this tick
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn sequence_failure_after_running_wins() {
        let mut seq = Sequence::new(vec![Box::new(RunAlways), Box::new(FailAlways)]);

        let mut ctx = TestContext::default();
        assert_eq!(seq.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn selector_succeeds_on_first_success() {
        let mut sel = Selector::new(vec![
            Box::new(FailAlways),
            Box::new(Increment),
            Box::new(Decrement), // Should not execute
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1); // Only Increment executed
    }

    #[test]
    fn selector_stops_on_running() {
        let mut sel = Selector::new(vec![Box::new(RunAlways), Box::new(Increment)]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.value, 0);
    }

    #[test]
    fn selector_fails_when_all_fail() {
        let mut sel = Selector::new(vec![Box::new(FailAlways), Box::new(FailAlways)]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn empty_composites_are_rejected() {
        assert!(matches!(
            Sequence::<TestContext>::try_new(vec![]),
            Err(TreeError::EmptyChildren { node: "Sequence" })
        ));
        assert!(Selector::<TestContext>::try_new(vec![]).is_err());
        assert!(Parallel::<TestContext>::try_new(vec![], 1).is_err());
    }

    fn traced_failures() -> Vec<Box<dyn Behavior<TestContext>>> {
        vec![
            Box::new(Traced("a", Status::Failure)),
            Box::new(Traced("b", Status::Failure)),
            Box::new(Traced("c", Status::Failure)),
        ]
    }

    #[test]
    fn random_selector_fails_when_all_fail() {
        let mut sel = RandomSelector::seeded(traced_failures(), 7);

        let mut ctx = TestContext::default();
        for _ in 0..10 {
            assert_eq!(sel.tick(&mut ctx), Status::Failure);
        }
        // Every child was tried on every tick.
        assert_eq!(ctx.trace.len(), 30);
    }

    #[test]
    fn random_selector_order_is_reproducible() {
        let run = |seed| {
            let mut sel = RandomSelector::seeded(traced_failures(), seed);
            let mut ctx = TestContext::default();
            for _ in 0..8 {
                sel.tick(&mut ctx);
            }
            ctx.trace
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn random_selector_reorders_between_ticks() {
        let mut sel = RandomSelector::seeded(traced_failures(), 3);
        let mut ctx = TestContext::default();
        for _ in 0..32 {
            sel.tick(&mut ctx);
        }

        let first_picks: std::collections::HashSet<_> =
            ctx.trace.chunks(3).map(|tick| tick[0]).collect();
        assert!(first_picks.len() > 1);
    }

    #[test]
    fn utility_selector_runs_best_option() {
        let mut sel: UtilitySelector<TestContext> = UtilitySelector::new(vec![
            (Box::new(Decrement), Box::new(|_: &TestContext| 10)),
            (Box::new(Increment), Box::new(|_: &TestContext| 90)),
        ]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn utility_selector_fails_on_zero_scores() {
        let mut sel: UtilitySelector<TestContext> =
            UtilitySelector::new(vec![(Box::new(Increment), Box::new(|_: &TestContext| 0))]);

        let mut ctx = TestContext::default();
        assert_eq!(sel.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.value, 0);
    }

    #[test]
    fn parallel_ticks_every_child() {
        let mut par = Parallel::new(
            vec![
                Box::new(FailAlways),
                Box::new(Increment),
                Box::new(Increment),
            ],
            2,
        );

        let mut ctx = TestContext::default();
        assert_eq!(par.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn parallel_fails_when_threshold_unreachable() {
        let mut par = Parallel::new(
            vec![Box::new(FailAlways), Box::new(FailAlways), Box::new(RunAlways)],
            2,
        );

        let mut ctx = TestContext::default();
        assert_eq!(par.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn parallel_runs_while_undecided() {
        let mut par = Parallel::new(
            vec![Box::new(Increment), Box::new(RunAlways), Box::new(FailAlways)],
            2,
        );

        let mut ctx = TestContext::default();
        assert_eq!(par.tick(&mut ctx), Status::Running);
    }

    #[test]
    fn parallel_rejects_bad_threshold() {
        let err = Parallel::<TestContext>::try_new(vec![Box::new(Increment)], 2)
            .err()
            .expect("threshold above child count");
        assert_eq!(
            err,
            TreeError::InvalidThreshold {
                threshold: 2,
                children: 1
            }
        );
        assert!(Parallel::<TestContext>::try_new(vec![Box::new(Increment)], 0).is_err());
    }
}
