//! Terminal-outcome hook system.
//!
//! Hooks let surrounding content (lives, bounties, quests, achievements) react
//! to the end of a fight without the engine knowing about any of it.
//!
//! # Architecture
//!
//! - Hooks are registered in a [`HookRegistry`] and sorted by priority
//! - When an encounter reaches `Terminal` through a death, every hook is
//!   notified exactly once: "monster defeated" on a win, "hero defeated" on a loss
//! - Abandoned encounters notify nobody
//! - Hook failures are logged according to criticality and never reach the
//!   encounter; the combat result is final by the time hooks run

mod bounty;
mod context;
mod lives;
mod registry;

pub use bounty::EliteBountyHook;
pub use context::{HeroDefeated, MonsterDefeated};
pub use lives::LivesHook;
pub use registry::HookRegistry;

use crate::error::HookError;

/// Defines how loudly a hook failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Failure leaves the host inconsistent (e.g. lives not deducted). Logged as error.
    Critical,

    /// Failure loses a side effect worth knowing about. Logged as warning.
    ///
    /// This is the default level.
    Important,

    /// Cosmetic or optional effects (notifications, achievements). Logged at debug.
    Optional,
}

impl HookCriticality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::Optional => "optional",
        }
    }
}

/// Reaction to the end of a fight.
///
/// Hooks are shared behind `Arc`, so stateful hooks keep their state in
/// atomics or locks.
///
/// # Execution Order
///
/// Hooks are sorted by priority (lower values execute first):
/// - Negative priorities: bookkeeping other hooks may depend on (lives)
/// - Zero: Default priority for most hooks
/// - Positive priorities: Optional or cosmetic hooks
pub trait CombatHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and debugging).
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    fn on_monster_defeated(&self, _event: &MonsterDefeated) -> Result<(), HookError> {
        Ok(())
    }

    fn on_hero_defeated(&self, _event: &HeroDefeated) -> Result<(), HookError> {
        Ok(())
    }
}
