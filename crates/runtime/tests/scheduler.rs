use std::time::Duration;

use combat_core::{
    CombatOutcome, CombatPhase, Combatant, PhaseCue, ScriptedRng, StrikeEvent, TerminalResult,
};
use combat_runtime::{EncounterDirector, PhaseScheduler, Presenter, SilentPresenter};

#[derive(Default)]
struct Recording {
    cues: Vec<(CombatPhase, Option<String>)>,
    strikes: Vec<StrikeEvent>,
    finished: Vec<Option<TerminalResult>>,
}

impl Presenter for Recording {
    fn present(&mut self, cue: &PhaseCue, actor: Option<&Combatant>) {
        self.cues
            .push((cue.phase, actor.map(|combatant| combatant.name.clone())));
    }

    fn strike(&mut self, strike: &StrikeEvent) {
        self.strikes.push(strike.clone());
    }

    fn finished(&mut self, result: Option<&TerminalResult>) {
        self.finished.push(result.cloned());
    }
}

fn knight() -> Combatant {
    Combatant::new("Knight", 3)
        .with_hp(20, 20)
        .with_attack(10)
        .with_defense(5)
}

fn rat() -> Combatant {
    Combatant::new("Rat", 2)
        .with_hp(8, 8)
        .with_attack(3)
        .with_defense(2)
}

#[test]
fn presenter_sees_each_phase_before_it_is_left() {
    let mut director = EncounterDirector::builder()
        .rng(ScriptedRng::new().monster_first().variance(1000).variance(1000))
        .build();
    let encounter = director.start(knight(), rat()).unwrap();

    let mut scheduler = PhaseScheduler::new(Recording::default());
    let result = scheduler.run(encounter).unwrap().unwrap();
    assert_eq!(result.outcome, CombatOutcome::Won);

    let presenter = scheduler.into_presenter();
    let name = |n: &str| Some(n.to_string());
    assert_eq!(
        presenter.cues,
        vec![
            (CombatPhase::RoundStart, None),
            (CombatPhase::FirstStrikeWindup, name("Rat")),
            (CombatPhase::FirstStrikeResolved, name("Rat")),
            (CombatPhase::SecondStrikeWindup, name("Knight")),
            (CombatPhase::SecondStrikeResolved, name("Knight")),
            (CombatPhase::RoundSettled, None),
            (CombatPhase::Terminal, name("Knight")),
        ]
    );
    assert_eq!(presenter.strikes.len(), 2);
    assert_eq!(presenter.strikes[0].attacker_name, "Rat");
    assert_eq!(presenter.finished, vec![Some(result)]);
}

#[test]
fn lethal_opening_strike_still_presents_resolved_and_settled() {
    let mut director = EncounterDirector::builder()
        .rng(ScriptedRng::new().hero_first().variance(1000))
        .build();
    let encounter = director.start(knight(), rat()).unwrap();

    let mut scheduler = PhaseScheduler::new(Recording::default());
    scheduler.run(encounter).unwrap();

    let presenter = scheduler.into_presenter();
    let name = |n: &str| Some(n.to_string());
    assert_eq!(
        presenter.cues,
        vec![
            (CombatPhase::RoundStart, None),
            (CombatPhase::FirstStrikeWindup, name("Knight")),
            (CombatPhase::FirstStrikeResolved, name("Knight")),
            (CombatPhase::RoundSettled, None),
            (CombatPhase::Terminal, name("Knight")),
        ]
    );
    assert_eq!(presenter.strikes.len(), 1);
    assert_eq!(presenter.finished.len(), 1);
}

#[test]
fn fled_encounter_is_reported_once() {
    let mut director = EncounterDirector::builder()
        .rng(ScriptedRng::new().hero_first().variance(1000))
        .build();
    let encounter = director.start(knight(), rat()).unwrap();
    encounter.abandon().unwrap();

    let mut scheduler = PhaseScheduler::new(Recording::default());
    assert_eq!(scheduler.run(encounter).unwrap(), None);
    assert_eq!(scheduler.run(encounter).unwrap(), None);

    let presenter = scheduler.into_presenter();
    assert_eq!(presenter.cues, vec![(CombatPhase::Terminal, None)]);
    assert!(presenter.strikes.is_empty());
    assert_eq!(presenter.finished, vec![None]);
}

#[test]
fn one_scheduler_reports_every_encounter() {
    let mut director = EncounterDirector::builder()
        .rng(ScriptedRng::new().hero_first().variance(1000))
        .build();
    let mut scheduler = PhaseScheduler::new(Recording::default());
    for _ in 0..2 {
        let encounter = director.start(knight(), rat()).unwrap();
        scheduler.run(encounter).unwrap();
    }
    assert_eq!(scheduler.presenter().finished.len(), 2);
}

#[test]
fn step_stops_at_terminal() {
    let mut director = EncounterDirector::builder()
        .rng(ScriptedRng::new().hero_first().variance(1000))
        .build();
    let encounter = director.start(knight(), rat()).unwrap();
    let mut scheduler = PhaseScheduler::new(SilentPresenter);

    let first = scheduler.step(encounter).unwrap().unwrap();
    assert_eq!(first.to, CombatPhase::FirstStrikeWindup);
    let second = scheduler.step(encounter).unwrap().unwrap();
    assert!(second.is_terminal());
    assert!(scheduler.step(encounter).unwrap().is_none());
    assert!(scheduler.step(encounter).unwrap().is_none());
}

#[tokio::test]
async fn paced_run_reaches_the_same_result() {
    let mut director = EncounterDirector::builder()
        .rng(ScriptedRng::new().monster_first().variance(1000).variance(1000))
        .build();
    let encounter = director.start(knight(), rat()).unwrap();
    let mut scheduler =
        PhaseScheduler::new(Recording::default()).with_pace(Duration::from_millis(1));

    let result = scheduler.run_paced(encounter).await.unwrap().unwrap();
    assert_eq!(result.outcome, CombatOutcome::Won);
    assert_eq!(scheduler.presenter().finished.len(), 1);
}
