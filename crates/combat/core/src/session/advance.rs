//! Results of presenting a phase token to a session.

use crate::combat::StrikeEvent;

use super::outcome::TerminalResult;
use super::phase::{CombatPhase, PhaseToken};

/// One accepted phase advance.
///
/// Usually `phases` holds a single entry. A lethal strike passes through its
/// `...Resolved` phase, `RoundSettled` and `Terminal` within the same step, and
/// all three are listed in order so a presenter can still play each of them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseStep {
    pub from: CombatPhase,
    pub to: CombatPhase,
    pub phases: Vec<CombatPhase>,
    /// Round the step happened in. A settled round reports the new round number.
    pub round: u32,
    /// Token for the phase the session is now in.
    pub token: PhaseToken,
    /// Present only on `...Resolved` transitions, where damage is applied.
    pub strike: Option<StrikeEvent>,
    /// Present only on the step that entered `Terminal` through a death.
    pub terminal: Option<TerminalResult>,
}

impl PhaseStep {
    pub fn entered(&self, phase: CombatPhase) -> bool {
        self.phases.contains(&phase)
    }

    pub const fn is_terminal(&self) -> bool {
        self.to.is_terminal()
    }
}

/// Why an advance did not change the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    /// The token is from an earlier phase or from another session.
    StaleToken {
        expected: PhaseToken,
        presented: PhaseToken,
    },
    /// The session already reached `Terminal`.
    AfterTerminal,
}

impl core::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StaleToken {
                expected,
                presented,
            } => write!(f, "stale phase token {presented} (expected {expected})"),
            Self::AfterTerminal => f.write_str("session already terminal"),
        }
    }
}

/// Outcome of [`super::CombatSession::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Advance {
    Advanced(PhaseStep),
    Ignored(IgnoreReason),
}

impl Advance {
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    pub const fn step(&self) -> Option<&PhaseStep> {
        match self {
            Self::Advanced(step) => Some(step),
            Self::Ignored(_) => None,
        }
    }

    pub fn into_step(self) -> Option<PhaseStep> {
        match self {
            Self::Advanced(step) => Some(step),
            Self::Ignored(_) => None,
        }
    }
}
