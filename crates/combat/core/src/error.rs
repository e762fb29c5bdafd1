//! Common error infrastructure for combat-core.
//!
//! Only operations that can genuinely fail return errors. Stale or
//! post-terminal phase advances are expected under a cooperative scheduler
//! and are reported as [`crate::session::Advance::Ignored`] values instead.

use crate::combatant::{InvalidCombatantReason, Side};
use crate::session::CombatPhase;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the call may succeed later (e.g. abandon once the round ends)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted combat state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat errors.
///
/// Gives hosts a uniform way to classify and log failures without matching on
/// every concrete error enum.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors produced by [`crate::session::CombatSession`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    /// A snapshot cannot enter combat; no session is created.
    #[error("invalid {side} combatant '{name}': {reason}")]
    InvalidCombatant {
        side: Side,
        name: String,
        reason: InvalidCombatantReason,
    },

    /// Fleeing is only possible between rounds.
    #[error("cannot abandon combat during {phase}")]
    AbandonNotAllowed { phase: CombatPhase },
}

impl CombatError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidCombatant { .. } => ErrorSeverity::Validation,
            Self::AbandonNotAllowed { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCombatant { .. } => "SESSION_INVALID_COMBATANT",
            Self::AbandonNotAllowed { .. } => "SESSION_ABANDON_NOT_ALLOWED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_combatant_message_names_side_and_reason() {
        let err = SessionError::InvalidCombatant {
            side: Side::Monster,
            name: "Wraith".into(),
            reason: InvalidCombatantReason::NoHp,
        };
        assert_eq!(
            err.to_string(),
            "invalid monster combatant 'Wraith': hp must be above zero"
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "SESSION_INVALID_COMBATANT");
    }

    #[test]
    fn abandon_mid_round_is_recoverable() {
        let err = SessionError::AbandonNotAllowed {
            phase: CombatPhase::FirstStrikeWindup,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.to_string(), "cannot abandon combat during first_strike_windup");
    }
}
