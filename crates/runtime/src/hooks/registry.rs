//! Hook registry for managing and notifying combat hooks.

use std::sync::Arc;

use combat_core::{SessionId, TerminalResult};
use tracing::{debug, error, warn};

use super::context::Defeat;
use super::{CombatHook, HookCriticality};
use crate::error::HookError;

/// Registry that manages and notifies terminal-outcome hooks.
///
/// Hooks are kept sorted by priority (lower values first); hooks with equal
/// priority run in registration order.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn CombatHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hook. Names must be unique so log lines stay unambiguous.
    pub fn register(&mut self, hook: Arc<dyn CombatHook>) -> Result<(), HookError> {
        if self.find(hook.name()).is_some() {
            return Err(HookError::DuplicateName(hook.name()));
        }
        self.hooks.push(hook);
        self.hooks.sort_by_key(|h| h.priority());
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, hook: Arc<dyn CombatHook>) -> Result<Self, HookError> {
        self.register(hook)?;
        Ok(self)
    }

    /// Notifies every hook about a finished fight.
    ///
    /// Failures are logged by criticality and returned for inspection; they
    /// never undo or block anything.
    pub fn notify(&self, session: SessionId, result: &TerminalResult) -> Vec<HookError> {
        let defeat = Defeat::from_result(session, result);
        let mut failures = Vec::new();

        for hook in &self.hooks {
            let outcome = match &defeat {
                Defeat::Monster(event) => hook.on_monster_defeated(event),
                Defeat::Hero(event) => hook.on_hero_defeated(event),
            };
            if let Err(err) = outcome {
                Self::report_failure(hook.as_ref(), session, &err);
                failures.push(err);
            }
        }

        failures
    }

    pub fn find(&self, name: &str) -> Option<&Arc<dyn CombatHook>> {
        self.hooks.iter().find(|h| h.name() == name)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    fn report_failure(hook: &dyn CombatHook, session: SessionId, err: &HookError) {
        let criticality = hook.criticality();
        match criticality {
            HookCriticality::Critical => error!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = criticality.as_str(),
                %session,
                error = %err,
                "Critical hook failed"
            ),
            HookCriticality::Important => warn!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = criticality.as_str(),
                %session,
                error = %err,
                "Hook failed, continuing"
            ),
            HookCriticality::Optional => debug!(
                target: "runtime::hooks",
                hook = hook.name(),
                criticality = criticality.as_str(),
                %session,
                error = %err,
                "Optional hook failed"
            ),
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.hooks()).finish()
    }
}
