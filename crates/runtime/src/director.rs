//! Issues encounters and keeps exactly one of them active.
//!
//! Every encounter gets a fresh, monotonically increasing [`SessionId`].
//! Starting a new encounter supersedes the previous one; tokens that still
//! circulate from it never match the new session and are ignored.

use std::sync::Arc;

use combat_core::{
    Advance, CombatSession, Combatant, PcgRng, PhaseToken, RngOracle, SessionId, compute_seed,
};
use tokio::sync::broadcast;
use tracing::info;

use crate::config::RuntimeConfig;
use crate::encounter::{Encounter, EncounterContext};
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::hooks::HookRegistry;
use crate::ledger::{CombatantLedger, NullLedger};

/// Builder for [`EncounterDirector`].
pub struct DirectorBuilder {
    config: RuntimeConfig,
    rng: Option<Arc<dyn RngOracle>>,
    hooks: Option<HookRegistry>,
    ledger: Option<Arc<dyn CombatantLedger>>,
}

impl DirectorBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            rng: None,
            hooks: None,
            ledger: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Random source for every encounter (default: [`PcgRng`]).
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Arc::new(rng));
        self
    }

    /// Terminal hooks (default: none).
    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Where hp checkpoints go (default: discarded).
    pub fn ledger(mut self, ledger: Arc<dyn CombatantLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn build(self) -> EncounterDirector {
        let context = EncounterContext {
            rng: self.rng.unwrap_or_else(|| Arc::new(PcgRng) as Arc<dyn RngOracle>),
            events: EventBus::with_capacity(self.config.event_buffer_size),
            hooks: Arc::new(self.hooks.unwrap_or_default()),
            ledger: self
                .ledger
                .unwrap_or_else(|| Arc::new(NullLedger) as Arc<dyn CombatantLedger>),
        };
        EncounterDirector {
            config: self.config,
            context,
            next_id: 1,
            active: None,
        }
    }
}

pub struct EncounterDirector {
    config: RuntimeConfig,
    context: EncounterContext,
    next_id: u64,
    active: Option<Encounter>,
}

impl EncounterDirector {
    pub fn builder() -> DirectorBuilder {
        DirectorBuilder::new()
    }

    /// Starts a fight between `hero` and `monster`, superseding any active one.
    ///
    /// Invalid snapshots fail without touching the active encounter.
    pub fn start(&mut self, hero: Combatant, monster: Combatant) -> Result<&mut Encounter> {
        let id = SessionId(self.next_id);
        let session = CombatSession::builder(hero, monster)
            .id(id)
            .seed(compute_seed(self.config.seed, id.0, 0, 0))
            .config(self.config.combat.clone())
            .build()?;
        self.next_id += 1;

        if let Some(previous) = self.active.take()
            && !previous.is_terminal()
        {
            info!(
                target: "runtime::director",
                previous = %previous.id(),
                next = %id,
                "Superseding unfinished encounter"
            );
        }

        Ok(self
            .active
            .insert(Encounter::new(session, self.context.clone())))
    }

    /// Forwards `token` to the active encounter.
    pub fn advance(&mut self, token: PhaseToken) -> Result<Advance> {
        self.active_mut()?.advance(token)
    }

    pub fn abandon(&mut self) -> Result<()> {
        self.active_mut()?.abandon()
    }

    pub fn active(&self) -> Option<&Encounter> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Result<&mut Encounter> {
        self.active.as_mut().ok_or(RuntimeError::NoActiveEncounter)
    }

    /// Removes and returns the active encounter.
    pub fn take(&mut self) -> Option<Encounter> {
        self.active.take()
    }

    pub fn events(&self) -> &EventBus {
        &self.context.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.context.events.subscribe(topic)
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.context.hooks
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

impl std::fmt::Debug for EncounterDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncounterDirector")
            .field("config", &self.config)
            .field("next_id", &self.next_id)
            .field("active", &self.active.as_ref().map(Encounter::id))
            .finish_non_exhaustive()
    }
}
