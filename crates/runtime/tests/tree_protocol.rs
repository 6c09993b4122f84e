use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use behavior_tree::{Behavior, RandomSelector, Selector, Sequence, Status};
use combat_core::{ArenaBounds, CombatConfig, Combatant, CombatantId, StaticField, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::AgentContext;

/// Leaf with a fixed status that counts its evaluations.
struct Counted {
    status: Status,
    calls: Arc<AtomicUsize>,
}

impl Counted {
    fn new(status: Status) -> (Box<dyn Behavior<AgentContext>>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let leaf: Box<dyn Behavior<AgentContext>> = Box::new(Self {
            status,
            calls: Arc::clone(&calls),
        });
        (leaf, calls)
    }
}

impl Behavior<AgentContext> for Counted {
    fn tick(&mut self, _ctx: &mut AgentContext) -> Status {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.status
    }
}

/// Failing leaf that records its label in a shared log.
struct Logged {
    label: usize,
    log: Arc<Mutex<Vec<usize>>>,
}

impl Behavior<AgentContext> for Logged {
    fn tick(&mut self, _ctx: &mut AgentContext) -> Status {
        if let Ok(mut log) = self.log.lock() {
            log.push(self.label);
        }
        Status::Failure
    }
}

fn context() -> AgentContext {
    let config = CombatConfig::default();
    AgentContext::new(
        Combatant::new(CombatantId(0), config, Vec2::ZERO, Vec2::X),
        Combatant::new(CombatantId(1), config, Vec2::new(3.0, 0.0), Vec2::NEG_X),
        StaticField::open(),
        ArenaBounds::default(),
    )
}

#[test]
fn selector_stops_at_first_success() {
    let mut ctx = context();
    let (first, first_calls) = Counted::new(Status::Failure);
    let (second, second_calls) = Counted::new(Status::Success);
    let (third, third_calls) = Counted::new(Status::Failure);
    let mut selector = Selector::new(vec![first, second, third]);

    assert_eq!(selector.tick(&mut ctx), Status::Success);
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    assert_eq!(third_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn sequence_stops_at_first_failure() {
    let mut ctx = context();
    let (first, first_calls) = Counted::new(Status::Success);
    let (second, second_calls) = Counted::new(Status::Failure);
    let (third, third_calls) = Counted::new(Status::Success);
    let mut sequence = Sequence::new(vec![first, second, third]);

    assert_eq!(sequence.tick(&mut ctx), Status::Failure);
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    assert_eq!(third_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn sequence_keeps_scanning_past_running() {
    let mut ctx = context();
    let (first, _) = Counted::new(Status::Running);
    let (second, second_calls) = Counted::new(Status::Success);
    let mut sequence = Sequence::new(vec![first, second]);

    assert_eq!(sequence.tick(&mut ctx), Status::Running);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

fn logged_selector(seed: u64, log: &Arc<Mutex<Vec<usize>>>) -> RandomSelector<AgentContext> {
    let children: Vec<Box<dyn Behavior<AgentContext>>> = (0..3)
        .map(|label| {
            Box::new(Logged {
                label,
                log: Arc::clone(log),
            }) as Box<dyn Behavior<AgentContext>>
        })
        .collect();
    RandomSelector::with_rng(children, StdRng::seed_from_u64(seed))
}

fn evaluation_order(seed: u64, ticks: usize) -> Vec<usize> {
    let mut ctx = context();
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut selector = logged_selector(seed, &log);
    for _ in 0..ticks {
        assert_eq!(selector.tick(&mut ctx), Status::Failure);
    }
    log.lock().map(|log| log.clone()).unwrap_or_default()
}

#[test]
fn random_selector_all_failing_fails_with_reproducible_order() {
    let first = evaluation_order(42, 10);
    let second = evaluation_order(42, 10);

    assert_eq!(first.len(), 30);
    assert_eq!(first, second);
    for tick in first.chunks(3) {
        let mut labels = tick.to_vec();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1, 2]);
    }
}
