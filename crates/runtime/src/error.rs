//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the combat engine, the hp ledger and hook registration
//! so clients can bubble them up with consistent context.

use combat_core::{CombatError, ErrorSeverity, SessionError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("no active encounter")]
    NoActiveEncounter,

    #[error("combatant ledger lock was poisoned")]
    LedgerPoisoned,

    #[error("combatant ledger rejected checkpoint for '{name}': {reason}")]
    Ledger { name: String, reason: String },

    #[error(transparent)]
    Hook(#[from] HookError),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Session(err) => err.severity(),
            Self::NoActiveEncounter => ErrorSeverity::Validation,
            Self::LedgerPoisoned => ErrorSeverity::Fatal,
            Self::Ledger { .. } => ErrorSeverity::Recoverable,
            Self::Hook(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Session(err) => err.error_code(),
            Self::NoActiveEncounter => "RUNTIME_NO_ACTIVE_ENCOUNTER",
            Self::LedgerPoisoned => "RUNTIME_LEDGER_POISONED",
            Self::Ledger { .. } => "RUNTIME_LEDGER_REJECTED",
            Self::Hook(_) => "RUNTIME_HOOK",
        }
    }
}

/// Errors raised by or about combat hooks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("hook '{0}' is already registered")]
    DuplicateName(&'static str),

    #[error("hook '{hook}' failed: {message}")]
    Failed { hook: &'static str, message: String },
}

impl HookError {
    pub fn failed(hook: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            hook,
            message: message.into(),
        }
    }
}
