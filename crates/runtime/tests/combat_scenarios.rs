use behavior_tree::{Behavior, Clock, Status};
use combat_core::{
    Action, ActionKind, ActionRejection, ArenaBounds, CombatConfig, CombatEvent, CombatState,
    Combatant, CombatantId, DamageOutcome, IgnoreReason, StaticField, Vec2,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use runtime::{AgentContext, Duel, Fighter};

const DT: f32 = 0.1;

fn facing_pair(distance: f32) -> AgentContext {
    let config = CombatConfig::default();
    AgentContext::new(
        Combatant::new(CombatantId(0), config, Vec2::ZERO, Vec2::X),
        Combatant::new(CombatantId(1), config, Vec2::new(distance, 0.0), Vec2::NEG_X),
        StaticField::open(),
        ArenaBounds::default(),
    )
}

#[test]
fn attack_at_t0_costs_quarter_health_and_full_cooldown() {
    let mut ctx = facing_pair(1.5);
    ctx.start_battle();

    let result = ctx.perform(Action::Attack);
    assert!(result.success);
    assert_eq!(result.damage, 25.0);
    assert_eq!(ctx.opponent().health(), 75.0);
    assert_eq!(ctx.me().cooldown_state().attack.remaining, 2.5);

    // Not ready anywhere inside (0, 2.5).
    for _ in 0..24 {
        ctx.advance(DT);
        assert!(!ctx.combatant(0).can_attack(), "ready early at t={}", ctx.now());
    }

    ctx.advance(DT);
    assert!((ctx.now() - 2.5).abs() < 1e-4);
    assert!(ctx.combatant(0).can_attack());

    ctx.focus(0);
    assert!(ctx.perform(Action::Attack).success);
    assert_eq!(ctx.opponent().health(), 50.0);
}

#[test]
fn at_most_one_action_in_progress() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut ctx = facing_pair(1.5);
    ctx.start_battle();
    ctx.focus(1);

    let actions = [
        Action::Idle,
        Action::Move(Vec2::Y),
        Action::Attack,
        Action::Defend,
        Action::Dodge(None),
    ];

    for _ in 0..500 {
        let before = ctx.me().current_state();
        let locked = ctx.me().action_lock();
        let action = actions[rng.random_range(0..actions.len())];

        let result = ctx.perform(action);
        if let Some(lock) = locked {
            assert!(!result.success);
            assert_eq!(result.rejection, Some(ActionRejection::Locked(lock.kind)));
            assert_eq!(ctx.me().current_state(), before);
        }

        let state = ctx.me().current_state();
        let lock_kind = ctx.me().action_lock().map(|lock| lock.kind);
        match state {
            CombatState::Attacking => assert_eq!(lock_kind, Some(ActionKind::Attack)),
            CombatState::Defending => assert_eq!(lock_kind, Some(ActionKind::Defend)),
            CombatState::Dodging => assert_eq!(lock_kind, Some(ActionKind::Dodge)),
            CombatState::Idle | CombatState::Moving => assert_eq!(lock_kind, None),
            CombatState::Dead => unreachable!("nobody strikes slot 1"),
        }

        ctx.advance(DT);
        ctx.refresh();
    }
}

#[test]
fn dodging_takes_no_damage() {
    let mut ctx = facing_pair(1.5);
    ctx.focus(1);
    assert!(ctx.perform(Action::Dodge(Some(Vec2::Y))).success);

    let dodger = ctx.combatant_mut(1);
    for amount in [1.0, 25.0, 1_000.0] {
        assert_eq!(
            dodger.take_damage(amount),
            DamageOutcome::Ignored(IgnoreReason::Invincible)
        );
    }
    assert_eq!(dodger.health(), 100.0);
}

#[test]
fn defending_negates_any_magnitude() {
    let mut ctx = facing_pair(1.5);
    ctx.focus(1);
    assert!(ctx.perform(Action::Defend).success);

    let defender = ctx.combatant_mut(1);
    for amount in [0.5, 25.0, 99.0, 1.0e9] {
        assert_eq!(defender.take_damage(amount), DamageOutcome::Blocked);
    }
    assert_eq!(defender.health(), 100.0);
    assert!(defender.blocked_recently());
}

#[test]
fn lethal_damage_clamps_and_latches() {
    let mut ctx = facing_pair(1.5);
    let target = ctx.combatant_mut(1);
    let outcome = target.take_damage(250.0);

    assert_eq!(
        outcome,
        DamageOutcome::Applied {
            amount: 100.0,
            lethal: true
        }
    );
    assert_eq!(target.health(), 0.0);
    assert!(!target.is_alive());
    assert_eq!(target.current_state(), CombatState::Dead);

    ctx.focus(1);
    for action in [
        Action::Idle,
        Action::Move(Vec2::X),
        Action::Attack,
        Action::Defend,
        Action::Dodge(None),
    ] {
        let result = ctx.perform(action);
        assert!(!result.success);
        assert_eq!(result.rejection, Some(ActionRejection::Dead));
    }

    ctx.advance(10.0);
    assert_eq!(ctx.combatant(1).current_state(), CombatState::Dead);
}

#[test]
fn reset_twice_equals_reset_once() {
    let mut ctx = facing_pair(1.5);
    ctx.perform(Action::Attack);
    ctx.focus(1);
    ctx.perform(Action::Dodge(None));
    ctx.advance(0.2);

    let mut once = ctx.combatant(1).clone();
    once.reset_agent();
    let mut twice = once.clone();
    twice.reset_agent();

    assert_eq!(once, twice);
    assert_eq!(once.health(), once.max_health());
    assert_eq!(once.current_state(), CombatState::Idle);
    let cooldowns = once.cooldown_state();
    assert_eq!(cooldowns.attack.remaining, 0.0);
    assert_eq!(cooldowns.defend.remaining, 0.0);
    assert_eq!(cooldowns.dodge.remaining, 0.0);
    assert!(!once.is_invincible());
    assert!(!once.is_locked());
}

#[test]
fn swing_lands_on_target_walking_into_window() {
    let mut ctx = facing_pair(2.4);
    ctx.start_battle();
    ctx.advance(DT);
    ctx.focus(0);
    assert!(ctx.perform(Action::Attack).success);
    assert_eq!(ctx.opponent().health(), 100.0);

    // One step of 5 u/s * 0.1 s brings the target to 1.9, inside reach.
    ctx.focus(1);
    assert!(ctx.perform(Action::Move(Vec2::NEG_X)).success);
    ctx.resolve_ongoing_strikes();
    assert_eq!(ctx.combatant(1).health(), 75.0);

    // Same swing never strikes twice.
    ctx.advance(DT);
    ctx.resolve_ongoing_strikes();
    assert_eq!(ctx.combatant(1).health(), 75.0);
}

/// Performs one action on a fixed tick and idles otherwise.
struct Scripted {
    on_tick: u32,
    action: Action,
    ticks: u32,
}

impl Scripted {
    fn fighter(label: &str, on_tick: u32, action: Action) -> Fighter {
        let tree = Box::new(Self {
            on_tick,
            action,
            ticks: 0,
        });
        Fighter::new(label, tree)
    }
}

impl Behavior<AgentContext> for Scripted {
    fn tick(&mut self, ctx: &mut AgentContext) -> Status {
        self.ticks += 1;
        if self.ticks == self.on_tick {
            Status::from_bool(ctx.perform(self.action).success)
        } else {
            Status::Success
        }
    }

    fn reset(&mut self) {
        self.ticks = 0;
    }
}

#[test]
fn duel_swing_lands_once_dodge_expires() {
    const STEP: f32 = 0.05;
    let config = CombatConfig::default();
    let ctx = AgentContext::new(
        Combatant::new(CombatantId(0), config, Vec2::ZERO, Vec2::X),
        Combatant::new(CombatantId(1), config, Vec2::new(0.0, -1.5), Vec2::Y),
        StaticField::open(),
        ArenaBounds::default(),
    );
    // B dodges through A on the first step (invincible until t=0.45); A
    // swings on the fifth (window open until t=0.60).
    let fighters = [
        Scripted::fighter("swinger", 5, Action::Attack),
        Scripted::fighter("dodger", 1, Action::Dodge(Some(Vec2::Y))),
    ];
    let mut duel = Duel::new(ctx, fighters);
    duel.start_battle();

    let mut outcomes = Vec::new();
    for _ in 0..14 {
        let report = duel.step(STEP);
        for event in report.events {
            if let CombatEvent::Damage {
                attacker, outcome, ..
            } = event
            {
                assert_eq!(attacker, CombatantId(0));
                outcomes.push((report.step, outcome));
            }
        }
    }

    assert_eq!(duel.context().combatant(1).position(), Vec2::new(0.0, 1.5));
    assert_eq!(
        outcomes.first(),
        Some(&(5, DamageOutcome::Ignored(IgnoreReason::Invincible)))
    );
    let landed: Vec<_> = outcomes
        .iter()
        .filter(|(_, outcome)| outcome.applied() > 0.0)
        .collect();
    assert_eq!(landed.len(), 1, "one hit per swing: {outcomes:?}");
    let (step, outcome) = landed[0];
    assert!((9..=12).contains(step), "landed at step {step}");
    assert_eq!(outcome.applied(), 25.0);
    assert_eq!(duel.context().combatant(1).health(), 75.0);
}
