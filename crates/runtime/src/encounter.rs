//! Host-side driver around one [`CombatSession`].
//!
//! An [`Encounter`] forwards token-checked advances to its session and turns
//! every accepted step into side effects: events on the bus, hp checkpoints in
//! the ledger and, exactly once per fight, terminal hooks.

use std::sync::Arc;

use combat_core::{
    Advance, CombatPhase, CombatSession, Initiative, PhaseCue, PhaseStep, PhaseToken, RngOracle,
    RoundReport, SessionId, Side, TerminalResult,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::events::{Event, EventBus, OutcomeEvent, PhaseEvent, StrikeRecord};
use crate::hooks::HookRegistry;
use crate::ledger::{CombatantLedger, HpCheckpoint};

/// Collaborators shared by every encounter of a host.
#[derive(Clone)]
pub struct EncounterContext {
    pub rng: Arc<dyn RngOracle>,
    pub events: EventBus,
    pub hooks: Arc<HookRegistry>,
    pub ledger: Arc<dyn CombatantLedger>,
}

pub struct Encounter {
    session: CombatSession,
    context: EncounterContext,
    hooks_fired: bool,
}

impl Encounter {
    pub fn new(session: CombatSession, context: EncounterContext) -> Self {
        info!(
            target: "runtime::encounter",
            session = %session.id(),
            hero = %session.hero().name,
            monster = %session.monster().name,
            elite = session.monster().is_elite,
            final_boss = session.monster().is_final_boss,
            "Encounter started"
        );
        Self {
            session,
            context,
            hooks_fired: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.session.id()
    }

    pub fn session(&self) -> &CombatSession {
        &self.session
    }

    pub fn cue(&self) -> PhaseCue {
        self.session.cue()
    }

    pub fn is_terminal(&self) -> bool {
        self.session.is_terminal()
    }

    pub fn result(&self) -> Option<&TerminalResult> {
        self.session.result()
    }

    pub fn into_session(self) -> CombatSession {
        self.session
    }

    /// Presents `token` to the session and applies the side effects of the step.
    ///
    /// Ignored advances are logged and returned as-is; they are not errors.
    pub fn advance(&mut self, token: PhaseToken) -> Result<Advance> {
        let advance = self.session.advance(token, self.context.rng.as_ref());
        match &advance {
            Advance::Ignored(reason) => debug!(
                target: "runtime::encounter",
                session = %self.id(),
                %reason,
                "Ignored phase advance"
            ),
            Advance::Advanced(step) => self.apply(step)?,
        }
        Ok(advance)
    }

    fn apply(&mut self, step: &PhaseStep) -> Result<()> {
        let session = self.id();
        debug!(
            target: "runtime::encounter",
            %session,
            round = step.round,
            from = %step.from,
            to = %step.to,
            "Phase advanced"
        );

        for &phase in &step.phases {
            let cue = self.cue_for(step, phase);
            self.context.events.publish(Event::Phase(PhaseEvent {
                session,
                round: cue.round,
                phase,
                token: cue.token,
                actor: cue.actor,
            }));
        }

        if let Some(strike) = &step.strike {
            self.context.events.publish(Event::Strike(StrikeRecord {
                session,
                strike: strike.clone(),
            }));
        }

        if let Some(result) = &step.terminal {
            self.finish(result);
        }

        // hp write-back last, so a failing ledger cannot swallow events or hooks
        if let Some(strike) = &step.strike {
            self.checkpoint(strike.defender())?;
        }
        if step.is_terminal() {
            self.checkpoint(Side::Hero)?;
            self.checkpoint(Side::Monster)?;
        }
        Ok(())
    }

    /// Cue for one of the phases `step` passed through.
    ///
    /// Phases before `step.to` were left within the same step: a resolved
    /// phase belongs to the striker, anything else to nobody.
    pub fn cue_for(&self, step: &PhaseStep, phase: CombatPhase) -> PhaseCue {
        let actor = if phase == step.to {
            self.session.cue().actor
        } else if phase.is_resolved() {
            step.strike.as_ref().map(|strike| strike.attacker)
        } else {
            None
        };
        PhaseCue {
            token: step.token,
            round: step.round,
            phase,
            actor,
        }
    }

    fn finish(&mut self, result: &TerminalResult) {
        let session = self.id();
        info!(
            target: "runtime::encounter",
            %session,
            outcome = %result.outcome,
            sequence = %result.sequence(),
            rounds = result.rounds,
            hero_hp = result.hero_hp,
            monster_hp = result.monster_hp,
            "Encounter finished"
        );
        self.context.events.publish(Event::Outcome(OutcomeEvent::Finished {
            session,
            result: result.clone(),
        }));

        if !self.hooks_fired {
            self.hooks_fired = true;
            self.context.hooks.notify(session, result);
        }
    }

    fn checkpoint(&self, side: Side) -> Result<()> {
        let checkpoint = HpCheckpoint::of(self.id(), side, self.session.combatant(side));
        self.context.ledger.checkpoint(&checkpoint)
    }

    /// Flees the fight. Only allowed at `RoundStart`; a no-op once terminal.
    pub fn abandon(&mut self) -> Result<()> {
        if self.session.is_terminal() {
            return Ok(());
        }
        self.session.abandon()?;

        let session = self.id();
        info!(
            target: "runtime::encounter",
            %session,
            round = self.session.round(),
            "Encounter abandoned"
        );
        self.context.events.publish(Event::Outcome(OutcomeEvent::Abandoned {
            session,
            round: self.session.round(),
        }));
        self.checkpoint(Side::Hero)?;
        self.checkpoint(Side::Monster)
    }

    /// Advances until the current round is settled or the fight ends.
    pub fn resolve_round(&mut self) -> Result<Option<RoundReport>> {
        if self.is_terminal() {
            return Ok(None);
        }
        let round = self.session.round();
        let mut strikes = Vec::with_capacity(2);

        loop {
            let token = self.session.token();
            if let Some(step) = self.advance(token)?.into_step() {
                strikes.extend(step.strike);
            }
            let next_round = self.session.round() > round
                && self.session.phase() == CombatPhase::RoundStart;
            if self.is_terminal() || next_round {
                break;
            }
        }

        let mut strikes = strikes.into_iter();
        Ok(strikes.next().map(|first| RoundReport {
            round,
            initiative: Initiative {
                first: first.attacker,
            },
            first,
            counter: strikes.next(),
        }))
    }

    /// Resolves rounds until `Terminal`. Returns `None` for an abandoned fight.
    pub fn run_to_end(&mut self) -> Result<Option<TerminalResult>> {
        while !self.is_terminal() {
            self.resolve_round()?;
        }
        Ok(self.result().cloned())
    }
}

impl std::fmt::Debug for Encounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encounter")
            .field("session", &self.session)
            .field("hooks_fired", &self.hooks_fired)
            .finish_non_exhaustive()
    }
}
