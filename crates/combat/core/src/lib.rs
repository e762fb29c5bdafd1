//! Deterministic combat resolution shared by every host.
//!
//! `combat-core` defines the canonical combat rules (damage model, round
//! resolution, session phases) and exposes pure APIs without I/O or logging.
//! All state changes of a fight flow through [`session::CombatSession`]; hosts
//! such as `combat-runtime` add events, hooks and persistence around it.
pub mod combat;
pub mod combatant;
pub mod config;
pub mod error;
pub mod rng;
pub mod session;

pub use combat::{Initiative, RoundReport, StrikeEvent, compute_damage};
pub use combatant::{Combatant, InvalidCombatantReason, Side};
pub use config::{CombatConfig, DamageParams};
pub use error::{CombatError, ErrorSeverity, SessionError};
pub use rng::{PcgRng, RngOracle, ScriptedRng, compute_seed};
pub use session::{
    Advance, CombatOutcome, CombatPhase, CombatSession, CombatSessionBuilder, IgnoreReason,
    PhaseCue, PhaseStep, PhaseToken, SessionId, TerminalResult, TerminalSequence,
};
