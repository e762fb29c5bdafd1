//! Phases of a combat session and the tokens that guard them.

use crate::combatant::Side;

/// Externally visible phase of a combat session.
///
/// ```text
/// RoundStart → FirstStrikeWindup → FirstStrikeResolved ─┬─ SecondStrikeWindup → SecondStrikeResolved ─┐
///     ▲                                   (defender dead)│                                            │
///     │                                                  └──────────────► RoundSettled ◄──────────────┘
///     └──────────────────────────────────────────────────────────────────────┤
///                                                                        Terminal
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatPhase {
    #[default]
    RoundStart,
    FirstStrikeWindup,
    FirstStrikeResolved,
    SecondStrikeWindup,
    SecondStrikeResolved,
    RoundSettled,
    Terminal,
}

impl CombatPhase {
    pub const fn is_windup(self) -> bool {
        matches!(self, Self::FirstStrikeWindup | Self::SecondStrikeWindup)
    }

    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::FirstStrikeResolved | Self::SecondStrikeResolved)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// Whether this phase belongs to the first strike of the round.
    pub const fn is_first_strike(self) -> bool {
        matches!(self, Self::FirstStrikeWindup | Self::FirstStrikeResolved)
    }
}

/// Identity of one combat session.
///
/// Hosts hand out a fresh id per encounter so tokens of a superseded
/// encounter can never match the current one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId(pub u64);

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Opaque permission to advance exactly one phase of exactly one session.
///
/// A token is minted every time the session changes phase. Presenting any
/// other token (older, from another session, or forged) is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseToken {
    session: SessionId,
    sequence: u64,
}

impl PhaseToken {
    pub(crate) const fn new(session: SessionId, sequence: u64) -> Self {
        Self { session, sequence }
    }

    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Position of this token in the session's phase history (0 = first `RoundStart`).
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl core::fmt::Display for PhaseToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.session, self.sequence)
    }
}

/// What a presentation layer should show next, and the token to resume with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseCue {
    pub token: PhaseToken,
    pub round: u32,
    pub phase: CombatPhase,
    /// Combatant the phase is about: the striker during windup/resolved phases,
    /// the winner at `Terminal`, nobody otherwise.
    pub actor: Option<Side>,
}
