use combat_core::{
    Advance, CombatOutcome, CombatPhase, CombatSession, Combatant, DamageParams, IgnoreReason,
    PcgRng, ScriptedRng, SessionId, Side, TerminalSequence, compute_damage,
};

fn hero() -> Combatant {
    Combatant::new("Hero", 3)
        .with_hp(20, 20)
        .with_attack(10)
        .with_defense(5)
}

fn monster() -> Combatant {
    Combatant::new("Slime", 2)
        .with_hp(8, 8)
        .with_attack(3)
        .with_defense(2)
}

// ================================================================
// Scenario A: a strong hero beats a weak monster for any draws
// ================================================================

#[test]
fn strong_hero_wins_within_five_rounds_for_scripted_draws() {
    for hero_first in [true, false] {
        for first in (800..=1200).step_by(25) {
            for second in (800..=1200).step_by(50) {
                let rng = if hero_first {
                    ScriptedRng::new().hero_first()
                } else {
                    ScriptedRng::new().monster_first()
                }
                .variance(first)
                .variance(second);

                let mut session = CombatSession::new(hero(), monster()).unwrap();
                let rounds = session.run_to_end(&rng);
                assert_eq!(session.outcome(), Some(CombatOutcome::Won));
                assert!(rounds.len() <= 5, "took {} rounds", rounds.len());
            }
        }
    }
}

#[test]
fn strong_hero_wins_within_five_rounds_for_seeded_draws() {
    for seed in 0..500 {
        let mut session = CombatSession::builder(hero(), monster())
            .seed(seed)
            .build()
            .unwrap();
        session.run_to_end(&PcgRng);
        let result = session.result().expect("fight must end");
        assert_eq!(result.outcome, CombatOutcome::Won);
        assert!(result.rounds <= 5);
        assert_eq!(result.sequence(), TerminalSequence::Victory);
    }
}

// ================================================================
// Scenario B: final boss
// ================================================================

#[test]
fn defeating_the_final_boss_selects_the_extended_sequence() {
    let boss = monster().final_boss();
    let mut session = CombatSession::new(hero(), boss).unwrap();
    session.run_to_end(&ScriptedRng::new().hero_first().variance(1000));

    let result = session.result().unwrap();
    assert!(result.final_boss_won);
    assert!(!result.elite_completed);
    assert_eq!(result.sequence(), TerminalSequence::FinalBossVictory);
}

// ================================================================
// Scenario C: lethal first strike
// ================================================================

#[test]
fn lethal_first_strike_produces_no_counter() {
    let mut session = CombatSession::new(hero(), monster()).unwrap();
    let rng = ScriptedRng::new().hero_first().variance(800);
    let report = session.resolve_round(&rng).unwrap();

    assert_eq!(report.first.attacker, Side::Hero);
    assert!(report.first.is_lethal());
    assert!(report.counter.is_none());
    assert_eq!(report.strikes().count(), 1);
    assert!(session.is_terminal());
}

// ================================================================
// Scenario D: elite flag
// ================================================================

#[test]
fn elite_flag_only_changes_the_terminal_result() {
    let run = |monster: Combatant| {
        let mut session = CombatSession::new(hero(), monster).unwrap();
        let rounds = session.run_to_end(&ScriptedRng::new().monster_first().variance(1000));
        (rounds, session.result().cloned().unwrap())
    };

    let (elite_rounds, elite) = run(monster().elite());
    let (plain_rounds, plain) = run(monster());

    assert!(elite.elite_completed);
    assert!(!plain.elite_completed);
    assert_eq!(elite.sequence(), TerminalSequence::EliteVictory);
    assert_eq!(elite_rounds, plain_rounds);
    assert_eq!(elite.hero_hp, plain.hero_hp);
}

// ================================================================
// Session properties
// ================================================================

#[test]
fn every_session_terminates_with_exactly_one_outcome() {
    let fighter = |name: &str, level, hp, attack, defense| {
        Combatant::new(name, level)
            .with_hp(hp, hp)
            .with_attack(attack)
            .with_defense(defense)
    };
    let pairs = [
        (fighter("A", 1, 50, 0, 200), fighter("B", 1, 50, 0, 200)),
        (fighter("A", 10, 120, 25, 12), fighter("B", 4, 300, 9, 40)),
        (fighter("A", 1, 1, 1, 0), fighter("B", 20, 999, 80, 90)),
    ];

    for (a, b) in pairs {
        for seed in 0..50 {
            let mut session = CombatSession::builder(a.clone(), b.clone())
                .id(SessionId(seed))
                .seed(seed)
                .build()
                .unwrap();
            let mut steps = 0u32;
            let mut outcomes_seen = 0;
            while !session.is_terminal() {
                let step = session
                    .advance(session.token(), &PcgRng)
                    .into_step()
                    .unwrap();
                if step.terminal.is_some() {
                    outcomes_seen += 1;
                }
                steps += 1;
                assert!(steps < 10_000, "session did not terminate");
            }
            assert_eq!(outcomes_seen, 1);
            let outcome = session.outcome().unwrap();
            let loser = session.combatant(outcome.winner().opponent());
            assert_eq!(loser.hp, 0);
            assert!(session.combatant(outcome.winner()).is_alive());
        }
    }
}

#[test]
fn tokens_from_an_earlier_session_never_advance_a_new_one() {
    let mut old = CombatSession::builder(hero(), monster())
        .id(SessionId(1))
        .build()
        .unwrap();
    let stale = old.token();
    old.abandon().unwrap();

    let mut current = CombatSession::builder(hero(), monster())
        .id(SessionId(2))
        .build()
        .unwrap();
    assert_eq!(stale.sequence(), current.token().sequence());
    let rng = ScriptedRng::new().hero_first();
    assert!(matches!(
        current.advance(stale, &rng),
        Advance::Ignored(IgnoreReason::StaleToken { .. })
    ));
    assert_eq!(current.phase(), CombatPhase::RoundStart);
}

// ================================================================
// Damage model properties
// ================================================================

#[test]
fn damage_never_drops_below_level_floor() {
    let params = DamageParams::default();
    for level in 1..=12u32 {
        let floor = ((level + 1) / 2).max(1);
        for attack in [0, 1, 5, 40] {
            for defense in [0, 10, 1000] {
                for variance in [800, 1000, 1200] {
                    let damage = compute_damage(attack, defense, level, 12, variance, &params);
                    assert!(damage >= floor);
                }
            }
        }
    }
}

#[test]
fn damage_is_monotonic_in_attack_and_defense() {
    let params = DamageParams::default();
    for variance in [800, 1000, 1200] {
        let mut last = 0;
        for attack in 0..200 {
            let damage = compute_damage(attack, 10, 4, 4, variance, &params);
            assert!(damage >= last);
            last = damage;
        }

        let mut last = u32::MAX;
        for defense in 0..200 {
            let damage = compute_damage(60, defense, 4, 4, variance, &params);
            assert!(damage <= last);
            last = damage;
        }
    }
}

#[test]
fn defense_never_absorbs_more_than_85_percent() {
    let params = DamageParams::default();
    // 1000 × 0.15 = 150 at any defense
    assert_eq!(compute_damage(1000, u32::MAX, 1, 1, 1000, &params), 150);
    assert_eq!(compute_damage(1000, 100_000, 1, 1, 1000, &params), 150);
}
