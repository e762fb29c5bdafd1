//! Event types for different topics.

use combat_core::{CombatPhase, PhaseToken, SessionId, Side, StrikeEvent, TerminalResult};
use serde::{Deserialize, Serialize};

/// The session entered a phase. Lethal steps publish one event per phase passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEvent {
    pub session: SessionId,
    pub round: u32,
    pub phase: CombatPhase,
    /// Token that advances out of this phase. Only the last phase of a step has a live token.
    pub token: PhaseToken,
    pub actor: Option<Side>,
}

/// A strike landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeRecord {
    pub session: SessionId,
    pub strike: StrikeEvent,
}

/// How an encounter ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeEvent {
    Finished {
        session: SessionId,
        result: TerminalResult,
    },
    /// The hero fled. No result and no hooks.
    Abandoned { session: SessionId, round: u32 },
}

impl OutcomeEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::Finished { session, .. } | Self::Abandoned { session, .. } => *session,
        }
    }
}
