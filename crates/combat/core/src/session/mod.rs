//! Combat session state machine.
//!
//! A [`CombatSession`] owns both combatants for the duration of one fight and
//! walks them through the phases of [`CombatPhase`]. Every phase carries a
//! [`PhaseToken`]; the host advances the session by presenting the token of
//! the phase it was shown, at whatever pace its presentation runs. Damage is
//! applied only when a `...Windup` phase is advanced into its `...Resolved`
//! phase.
//!
//! Randomness is injected on every advance that needs it, so the same seed
//! and oracle always replay the same fight.

mod advance;
mod outcome;
mod phase;

pub use advance::{Advance, IgnoreReason, PhaseStep};
pub use outcome::{CombatOutcome, TerminalResult, TerminalSequence};
pub use phase::{CombatPhase, PhaseCue, PhaseToken, SessionId};

use crate::combat::{Initiative, RoundReport, StrikeEvent, roll_variance, strike};
use crate::combatant::{Combatant, Side};
use crate::config::CombatConfig;
use crate::error::SessionError;
use crate::rng::RngOracle;

/// Builder for [`CombatSession`].
#[derive(Clone, Debug)]
pub struct CombatSessionBuilder {
    hero: Combatant,
    monster: Combatant,
    id: SessionId,
    seed: u64,
    config: CombatConfig,
}

impl CombatSessionBuilder {
    #[must_use]
    pub fn id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates both snapshots and starts the session at round 1, `RoundStart`.
    pub fn build(self) -> Result<CombatSession, SessionError> {
        let hero = admit(Side::Hero, self.hero)?;
        let monster = admit(Side::Monster, self.monster)?;

        Ok(CombatSession {
            id: self.id,
            seed: self.seed,
            config: self.config,
            hero,
            monster,
            round: 1,
            phase: CombatPhase::RoundStart,
            sequence: 0,
            nonce: 0,
            initiative: None,
            round_strikes: Vec::with_capacity(2),
            outcome: None,
            result: None,
            abandoned: false,
        })
    }
}

fn admit(side: Side, combatant: Combatant) -> Result<Combatant, SessionError> {
    let combatant = combatant.normalized();
    match combatant.check() {
        Some(reason) => Err(SessionError::InvalidCombatant {
            side,
            name: combatant.name,
            reason,
        }),
        None => Ok(combatant),
    }
}

/// One fight between a hero and a monster.
#[derive(Clone, Debug)]
pub struct CombatSession {
    id: SessionId,
    seed: u64,
    config: CombatConfig,
    hero: Combatant,
    monster: Combatant,
    round: u32,
    phase: CombatPhase,
    sequence: u64,
    /// Number of random draws taken so far.
    nonce: u64,
    initiative: Option<Initiative>,
    /// Strikes of the current (or just settled) round. Cleared on the next roll.
    round_strikes: Vec<StrikeEvent>,
    outcome: Option<CombatOutcome>,
    result: Option<TerminalResult>,
    abandoned: bool,
}

impl CombatSession {
    pub fn builder(hero: Combatant, monster: Combatant) -> CombatSessionBuilder {
        CombatSessionBuilder {
            hero,
            monster,
            id: SessionId::default(),
            seed: 0,
            config: CombatConfig::default(),
        }
    }

    /// Starts a session with default id, seed and balancing.
    pub fn new(hero: Combatant, monster: Combatant) -> Result<Self, SessionError> {
        Self::builder(hero, monster).build()
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn hero(&self) -> &Combatant {
        &self.hero
    }

    pub fn monster(&self) -> &Combatant {
        &self.monster
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Hero => &self.hero,
            Side::Monster => &self.monster,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// True when the hero fled; such a session has no outcome.
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    pub fn result(&self) -> Option<&TerminalResult> {
        self.result.as_ref()
    }

    pub fn initiative(&self) -> Option<Initiative> {
        self.initiative
    }

    /// Token that the next [`advance`](Self::advance) must present.
    pub fn token(&self) -> PhaseToken {
        PhaseToken::new(self.id, self.sequence)
    }

    /// Describes the current phase for a presentation layer.
    pub fn cue(&self) -> PhaseCue {
        PhaseCue {
            token: self.token(),
            round: self.round,
            phase: self.phase,
            actor: self.actor(),
        }
    }

    fn actor(&self) -> Option<Side> {
        let initiative = self.initiative?;
        match self.phase {
            CombatPhase::FirstStrikeWindup | CombatPhase::FirstStrikeResolved => {
                Some(initiative.first)
            }
            CombatPhase::SecondStrikeWindup | CombatPhase::SecondStrikeResolved => {
                Some(initiative.second())
            }
            CombatPhase::Terminal => self.outcome.map(CombatOutcome::winner),
            CombatPhase::RoundStart | CombatPhase::RoundSettled => None,
        }
    }

    /// Moves the session one phase forward if `token` is the current one.
    ///
    /// Stale tokens, tokens of other sessions and any advance after
    /// `Terminal` leave the session untouched and report why.
    pub fn advance(&mut self, token: PhaseToken, rng: &(impl RngOracle + ?Sized)) -> Advance {
        if self.is_terminal() {
            return Advance::Ignored(IgnoreReason::AfterTerminal);
        }
        let expected = self.token();
        if token != expected {
            return Advance::Ignored(IgnoreReason::StaleToken {
                expected,
                presented: token,
            });
        }

        let from = self.phase;
        let mut strike_event = None;
        let mut phases = Vec::with_capacity(3);

        match from {
            CombatPhase::RoundStart => {
                self.roll_initiative(rng);
                self.round_strikes.clear();
                phases.push(CombatPhase::FirstStrikeWindup);
            }
            CombatPhase::FirstStrikeWindup | CombatPhase::SecondStrikeWindup => {
                let initiative = match self.initiative {
                    Some(initiative) => initiative,
                    // a windup is only entered from a RoundStart that rolled
                    None => self.roll_initiative(rng),
                };
                let event = self.resolve_strike(from, initiative, rng);
                let resolved = if from == CombatPhase::FirstStrikeWindup {
                    CombatPhase::FirstStrikeResolved
                } else {
                    CombatPhase::SecondStrikeResolved
                };
                phases.push(resolved);
                if event.is_lethal() {
                    phases.push(CombatPhase::RoundSettled);
                    phases.push(CombatPhase::Terminal);
                    self.finish(event.attacker);
                }
                strike_event = Some(event);
            }
            CombatPhase::FirstStrikeResolved => phases.push(CombatPhase::SecondStrikeWindup),
            CombatPhase::SecondStrikeResolved => phases.push(CombatPhase::RoundSettled),
            CombatPhase::RoundSettled => {
                self.round += 1;
                phases.push(CombatPhase::RoundStart);
            }
            CombatPhase::Terminal => return Advance::Ignored(IgnoreReason::AfterTerminal),
        }

        let to = *phases.last().unwrap_or(&from);
        self.phase = to;
        self.sequence += 1;

        Advance::Advanced(PhaseStep {
            from,
            to,
            phases,
            round: self.round,
            token: self.token(),
            strike: strike_event,
            terminal: if to.is_terminal() { self.result.clone() } else { None },
        })
    }

    fn next_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce += 1;
        nonce
    }

    fn roll_initiative(&mut self, rng: &(impl RngOracle + ?Sized)) -> Initiative {
        let initiative = Initiative::roll(rng, self.seed, self.next_nonce(), self.round);
        self.initiative = Some(initiative);
        initiative
    }

    fn resolve_strike(
        &mut self,
        windup: CombatPhase,
        initiative: Initiative,
        rng: &(impl RngOracle + ?Sized),
    ) -> StrikeEvent {
        let attacker_side = if windup.is_first_strike() {
            initiative.first
        } else {
            initiative.second()
        };
        let variance = roll_variance(rng, self.seed, self.next_nonce(), self.round, &self.config.damage);

        let (attacker, defender) = match attacker_side {
            Side::Hero => (&self.hero, &mut self.monster),
            Side::Monster => (&self.monster, &mut self.hero),
        };
        let event = strike(attacker, attacker_side, defender, variance, self.round, &self.config.damage);
        self.round_strikes.push(event.clone());
        event
    }

    /// The side that dealt the lethal blow wins, whatever its own hp.
    fn finish(&mut self, lethal_striker: Side) {
        let outcome = match lethal_striker {
            Side::Hero => CombatOutcome::Won,
            Side::Monster => CombatOutcome::Lost,
        };
        self.outcome = Some(outcome);
        self.result = Some(TerminalResult::new(outcome, &self.hero, &self.monster, self.round));
    }

    /// Advances until the current round is settled or the fight ends.
    ///
    /// Returns `None` if the session was already terminal.
    pub fn resolve_round(&mut self, rng: &(impl RngOracle + ?Sized)) -> Option<RoundReport> {
        if self.is_terminal() {
            return None;
        }
        let round = self.round;
        while !self.is_terminal() && !(self.round > round && self.phase == CombatPhase::RoundStart) {
            let token = self.token();
            self.advance(token, rng);
        }

        let initiative = self.initiative?;
        let mut strikes = self.round_strikes.iter().cloned();
        let first = strikes.next()?;
        Some(RoundReport {
            round,
            initiative,
            first,
            counter: strikes.next(),
        })
    }

    /// Resolves rounds until `Terminal` and returns them in order.
    pub fn run_to_end(&mut self, rng: &(impl RngOracle + ?Sized)) -> Vec<RoundReport> {
        let mut rounds = Vec::new();
        while let Some(report) = self.resolve_round(rng) {
            rounds.push(report);
        }
        rounds
    }

    /// Flees the fight. Allowed only at `RoundStart`; damage already dealt stays.
    ///
    /// Abandoning a terminal session is a no-op.
    pub fn abandon(&mut self) -> Result<(), SessionError> {
        match self.phase {
            CombatPhase::Terminal => Ok(()),
            CombatPhase::RoundStart => {
                self.phase = CombatPhase::Terminal;
                self.abandoned = true;
                self.sequence += 1;
                Ok(())
            }
            phase => Err(SessionError::AbandonNotAllowed { phase }),
        }
    }

    /// Consumes the session and hands both combatants back to their owner.
    pub fn into_combatants(self) -> (Combatant, Combatant) {
        (self.hero, self.monster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::InvalidCombatantReason;
    use crate::rng::{PcgRng, ScriptedRng};

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

    fn brute() -> Combatant {
        Combatant::new("Brute", 3)
            .with_hp(30, 30)
            .with_attack(6)
            .with_defense(2)
    }

    fn step(session: &mut CombatSession, rng: &ScriptedRng) -> PhaseStep {
        let token = session.token();
        session
            .advance(token, rng)
            .into_step()
            .expect("current token must advance")
    }

    #[test]
    fn build_rejects_dead_combatants() {
        let err = CombatSession::new(knight().with_hp(0, 20), rat()).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidCombatant {
                side: Side::Hero,
                name: "Knight".into(),
                reason: InvalidCombatantReason::NoHp,
            }
        );

        let err = CombatSession::new(knight(), rat().with_hp(0, 0)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidCombatant {
                side: Side::Monster,
                reason: InvalidCombatantReason::NoMaxHp,
                ..
            }
        ));
    }

    #[test]
    fn build_normalizes_out_of_range_stats() {
        let session = CombatSession::new(knight().with_hp(99, 20), Combatant::new("Imp", 0).with_hp(4, 4))
            .unwrap();
        assert_eq!(session.hero().hp, 20);
        assert_eq!(session.monster().level, 1);
        assert_eq!(session.round(), 1);
        assert_eq!(session.phase(), CombatPhase::RoundStart);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn full_round_walks_every_phase() {
        let mut session = CombatSession::new(knight(), brute()).unwrap();
        // monster first at minimum variance, hero answers at minimum variance
        let rng = ScriptedRng::new().monster_first().variance(800).variance(800);

        let s = step(&mut session, &rng);
        assert_eq!((s.from, s.to), (CombatPhase::RoundStart, CombatPhase::FirstStrikeWindup));
        assert_eq!(session.cue().actor, Some(Side::Monster));
        assert!(s.strike.is_none());

        let s = step(&mut session, &rng);
        assert_eq!(s.to, CombatPhase::FirstStrikeResolved);
        let hit = s.strike.expect("damage lands at resolved");
        assert_eq!(hit.attacker, Side::Monster);
        assert_eq!(session.hero().hp, hit.defender_hp_after);

        let s = step(&mut session, &rng);
        assert_eq!(s.to, CombatPhase::SecondStrikeWindup);
        assert_eq!(session.cue().actor, Some(Side::Hero));

        let s = step(&mut session, &rng);
        assert_eq!(s.to, CombatPhase::SecondStrikeResolved);
        assert_eq!(s.strike.as_ref().map(|e| e.attacker), Some(Side::Hero));

        let s = step(&mut session, &rng);
        assert_eq!(s.to, CombatPhase::RoundSettled);
        assert_eq!(session.cue().actor, None);

        let s = step(&mut session, &rng);
        assert_eq!(s.to, CombatPhase::RoundStart);
        assert_eq!(s.round, 2);
        assert_eq!(session.round(), 2);
    }

    #[test]
    fn windup_never_applies_damage() {
        let mut session = CombatSession::new(knight(), brute()).unwrap();
        let rng = ScriptedRng::new().hero_first().variance(1000).variance(1000);
        step(&mut session, &rng);
        assert_eq!(session.phase(), CombatPhase::FirstStrikeWindup);
        assert_eq!(session.monster().hp, 30);
        assert_eq!(session.hero().hp, 20);
    }

    #[test]
    fn windup_without_initiative_rolls_instead_of_favoring_the_hero() {
        let mut session = CombatSession::new(knight(), brute()).unwrap();
        session.phase = CombatPhase::FirstStrikeWindup;
        assert_eq!(session.initiative(), None);

        let rng = ScriptedRng::new().monster_first().variance(1000);
        let hit = step(&mut session, &rng).strike.unwrap();
        assert_eq!(hit.attacker, Side::Monster);
        assert_eq!(session.initiative().map(|i| i.first), Some(Side::Monster));
    }

    #[test]
    fn stale_and_foreign_tokens_are_ignored() {
        let mut session = CombatSession::builder(knight(), brute())
            .id(SessionId(7))
            .build()
            .unwrap();
        let rng = ScriptedRng::new().hero_first().variance(1000);
        let old = session.token();
        step(&mut session, &rng);

        let before = session.cue();
        let result = session.advance(old, &rng);
        assert_eq!(
            result,
            Advance::Ignored(IgnoreReason::StaleToken {
                expected: before.token,
                presented: old,
            })
        );
        assert_eq!(session.cue(), before);

        let other = CombatSession::builder(knight(), brute())
            .id(SessionId(8))
            .build()
            .unwrap();
        let foreign = PhaseToken::new(other.id(), before.token.sequence());
        assert!(session.advance(foreign, &rng).is_ignored());
        assert_eq!(session.cue(), before);
        assert_eq!(session.monster().hp, 30);
    }

    #[test]
    fn lethal_first_strike_skips_counter_and_terminates_in_same_step() {
        let mut session = CombatSession::new(knight(), rat()).unwrap();
        let rng = ScriptedRng::new().hero_first().variance(800);
        step(&mut session, &rng);

        let s = step(&mut session, &rng);
        assert_eq!(
            s.phases,
            vec![
                CombatPhase::FirstStrikeResolved,
                CombatPhase::RoundSettled,
                CombatPhase::Terminal
            ]
        );
        assert!(s.is_terminal());
        assert!(s.entered(CombatPhase::RoundSettled));
        assert!(s.strike.as_ref().is_some_and(StrikeEvent::is_lethal));
        let result = s.terminal.expect("terminal step carries the result");
        assert_eq!(result.outcome, CombatOutcome::Won);
        assert_eq!(result.rounds, 1);
        assert_eq!(session.outcome(), Some(CombatOutcome::Won));
        assert_eq!(session.cue().actor, Some(Side::Hero));
    }

    #[test]
    fn advances_after_terminal_are_noops() {
        let mut session = CombatSession::new(knight(), rat()).unwrap();
        let rng = ScriptedRng::new().hero_first().variance(1000);
        session.run_to_end(&rng);
        assert!(session.is_terminal());

        let result = session.result().cloned();
        let token = session.token();
        for _ in 0..3 {
            assert_eq!(
                session.advance(token, &rng),
                Advance::Ignored(IgnoreReason::AfterTerminal)
            );
        }
        assert_eq!(session.result().cloned(), result);
        assert_eq!(session.outcome(), Some(CombatOutcome::Won));
        assert!(session.resolve_round(&rng).is_none());
    }

    #[test]
    fn monster_kill_is_a_loss() {
        let frail = Combatant::new("Squire", 1).with_hp(2, 10).with_attack(1);
        let mut session = CombatSession::new(frail, brute()).unwrap();
        let rng = ScriptedRng::new().monster_first().variance(1200);
        let report = session.resolve_round(&rng).unwrap();

        assert!(report.counter.is_none());
        assert_eq!(report.first.attacker, Side::Monster);
        assert_eq!(session.outcome(), Some(CombatOutcome::Lost));
        let result = session.result().unwrap();
        assert_eq!(result.sequence(), TerminalSequence::Defeat);
        assert_eq!(result.hero_hp, 0);
    }

    #[test]
    fn counter_strike_can_win_the_round() {
        // monster hits first but cannot kill; the knight's counter kills
        let mut session = CombatSession::new(knight(), rat()).unwrap();
        let rng = ScriptedRng::new().monster_first().variance(1000).variance(1000);
        let report = session.resolve_round(&rng).unwrap();
        assert_eq!(report.initiative.first, Side::Monster);
        let counter = report.counter.expect("defender survived the first strike");
        assert!(counter.is_lethal());
        assert_eq!(session.outcome(), Some(CombatOutcome::Won));
    }

    #[test]
    fn resolve_round_finishes_a_round_already_in_progress() {
        let mut session = CombatSession::new(knight(), brute()).unwrap();
        let rng = ScriptedRng::new().hero_first().variance(800).variance(800);
        step(&mut session, &rng);
        step(&mut session, &rng);

        let report = session.resolve_round(&rng).unwrap();
        assert_eq!(report.round, 1);
        assert_eq!(report.strikes().count(), 2);
        assert_eq!(session.round(), 2);
        assert_eq!(session.phase(), CombatPhase::RoundStart);
    }

    #[test]
    fn abandon_only_between_rounds() {
        let mut session = CombatSession::new(knight(), brute()).unwrap();
        let rng = ScriptedRng::new().hero_first().variance(1000);
        step(&mut session, &rng);
        assert_eq!(
            session.abandon(),
            Err(SessionError::AbandonNotAllowed {
                phase: CombatPhase::FirstStrikeWindup
            })
        );

        session.resolve_round(&rng);
        let hp_after_round = session.monster().hp;
        assert!(hp_after_round < 30);
        assert_eq!(session.abandon(), Ok(()));
        assert!(session.is_terminal());
        assert!(session.is_abandoned());
        assert_eq!(session.outcome(), None);
        assert!(session.result().is_none());
        assert_eq!(session.monster().hp, hp_after_round);
        assert_eq!(session.abandon(), Ok(()));
    }

    #[test]
    fn round_number_increases_once_per_round() {
        let tank = |name: &str| {
            Combatant::new(name, 5)
                .with_hp(200, 200)
                .with_attack(4)
                .with_defense(30)
        };
        let mut session = CombatSession::builder(tank("Golem"), tank("Titan"))
            .seed(11)
            .build()
            .unwrap();
        let rng = PcgRng;
        let mut last_round = 0;
        while !session.is_terminal() {
            if session.phase() == CombatPhase::RoundStart {
                assert!(session.round() > last_round);
                last_round = session.round();
            }
            let token = session.token();
            assert!(!session.advance(token, &rng).is_ignored());
            assert!(session.is_terminal() || (session.hero().is_alive() && session.monster().is_alive()));
        }
        assert!(last_round > 1);
    }

    #[test]
    fn seeded_sessions_replay_identically() {
        let run = |seed| {
            let mut session = CombatSession::builder(knight(), brute())
                .seed(seed)
                .build()
                .unwrap();
            let rounds = session.run_to_end(&PcgRng);
            (rounds, session.result().cloned())
        };
        assert_eq!(run(5), run(5));
    }
}
