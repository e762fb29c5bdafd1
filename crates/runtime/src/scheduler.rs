//! Cooperative phase scheduling.
//!
//! The scheduler owns the pacing of a fight: it shows the current phase to a
//! [`Presenter`], then advances the encounter with the token of exactly that
//! phase. Hosts with an event loop use [`PhaseScheduler::run_paced`]; others
//! call [`PhaseScheduler::step`] whenever their presentation is ready.

use std::time::Duration;

use combat_core::{Combatant, PhaseCue, PhaseStep, SessionId, StrikeEvent, TerminalResult};

use crate::encounter::Encounter;
use crate::error::Result;

/// Presentation side-channel: "present this phase for this combatant".
pub trait Presenter {
    /// Called once per phase before the scheduler advances out of it.
    fn present(&mut self, cue: &PhaseCue, actor: Option<&Combatant>);

    fn strike(&mut self, _strike: &StrikeEvent) {}

    /// Called once per encounter when it is terminal. `None` if the hero fled.
    fn finished(&mut self, _result: Option<&TerminalResult>) {}
}

/// Presenter that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPresenter;

impl Presenter for SilentPresenter {
    fn present(&mut self, _cue: &PhaseCue, _actor: Option<&Combatant>) {}
}

pub struct PhaseScheduler<P> {
    presenter: P,
    pace: Duration,
    /// Last encounter the presenter was told has finished.
    finished: Option<SessionId>,
}

impl<P: Presenter> PhaseScheduler<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            pace: Duration::ZERO,
            finished: None,
        }
    }

    /// Delay between phases in [`run_paced`](Self::run_paced).
    #[must_use]
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Presents the current phase and advances past it.
    ///
    /// A lethal step passes through several phases at once; each of them is
    /// presented in order before the presenter hears that the fight finished.
    /// Returns `None` once the encounter is terminal. An encounter that became
    /// terminal outside the scheduler (the hero fled) is still reported to
    /// the presenter once.
    pub fn step(&mut self, encounter: &mut Encounter) -> Result<Option<PhaseStep>> {
        if encounter.is_terminal() {
            if self.finished != Some(encounter.id()) {
                let cue = encounter.cue();
                self.present(encounter, &cue);
                self.finish(encounter);
            }
            return Ok(None);
        }

        let cue = encounter.cue();
        self.present(encounter, &cue);

        let Some(step) = encounter.advance(cue.token)?.into_step() else {
            return Ok(None);
        };
        if let Some(strike) = &step.strike {
            self.presenter.strike(strike);
        }
        if step.is_terminal() {
            for &phase in &step.phases {
                let cue = encounter.cue_for(&step, phase);
                self.present(encounter, &cue);
            }
            self.finish(encounter);
        }
        Ok(Some(step))
    }

    fn finish(&mut self, encounter: &Encounter) {
        self.finished = Some(encounter.id());
        self.presenter.finished(encounter.result());
    }

    fn present(&mut self, encounter: &Encounter, cue: &PhaseCue) {
        let actor = cue.actor.map(|side| encounter.session().combatant(side));
        self.presenter.present(cue, actor);
    }

    /// Steps until the encounter is terminal.
    pub fn run(&mut self, encounter: &mut Encounter) -> Result<Option<TerminalResult>> {
        while self.step(encounter)?.is_some() {}
        Ok(encounter.result().cloned())
    }

    /// Like [`run`](Self::run), sleeping for the configured pace between phases.
    pub async fn run_paced(&mut self, encounter: &mut Encounter) -> Result<Option<TerminalResult>> {
        while self.step(encounter)?.is_some() {
            if !self.pace.is_zero() {
                tokio::time::sleep(self.pace).await;
            }
        }
        Ok(encounter.result().cloned())
    }
}
