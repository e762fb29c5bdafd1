//! Plain-text presentation of combat phases.

use std::io::{self, Write};

use combat_core::{CombatPhase, Combatant, PhaseCue, StrikeEvent, TerminalResult, TerminalSequence};
use combat_runtime::Presenter;

/// Writes one line per notable phase, strike and outcome.
pub struct ConsolePresenter<W> {
    out: W,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %err, "Failed to write combat output");
        }
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn present(&mut self, cue: &PhaseCue, actor: Option<&Combatant>) {
        match (cue.phase, actor) {
            (CombatPhase::RoundStart, _) => self.line(format_args!("-- round {} --", cue.round)),
            (CombatPhase::FirstStrikeWindup | CombatPhase::SecondStrikeWindup, Some(actor)) => {
                self.line(format_args!("{} winds up...", actor.name))
            }
            _ => {}
        }
    }

    fn strike(&mut self, strike: &StrikeEvent) {
        self.line(format_args!(
            "{} hits {} for {} ({} hp left)",
            strike.attacker_name, strike.defender_name, strike.damage, strike.defender_hp_after
        ));
    }

    fn finished(&mut self, result: Option<&TerminalResult>) {
        let Some(result) = result else {
            self.line(format_args!("The hero fled."));
            return;
        };
        match result.sequence() {
            TerminalSequence::Victory => {
                self.line(format_args!("{} is defeated!", result.monster_name))
            }
            TerminalSequence::EliteVictory => self.line(format_args!(
                "Elite {} is defeated! Bounty progress recorded.",
                result.monster_name
            )),
            TerminalSequence::FinalBossVictory => self.line(format_args!(
                "*** {} has fallen! The realm is saved after {} {}! ***",
                result.monster_name,
                result.rounds,
                if result.rounds == 1 { "round" } else { "rounds" }
            )),
            TerminalSequence::Defeat => self.line(format_args!(
                "{} was slain by {}.",
                result.hero_name, result.monster_name
            )),
        }
    }
}
