//! Host-side orchestration for the combat engine.
//!
//! This crate wires [`combat_core`] sessions into a runnable host: encounters
//! that publish events and write hp back, a director that keeps one encounter
//! active at a time, terminal hooks and a cooperative phase scheduler.
//!
//! Modules are organized by responsibility:
//! - [`director`] issues session ids and supersedes unfinished encounters
//! - [`encounter`] turns accepted phase steps into side effects
//! - [`scheduler`] paces phases through a [`Presenter`]
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`hooks`] notifies content systems when a fight ends
//! - [`ledger`] receives hp checkpoints for the external combatant records
pub mod config;
pub mod director;
pub mod encounter;
pub mod error;
pub mod events;
pub mod hooks;
pub mod ledger;
pub mod scheduler;

pub use config::RuntimeConfig;
pub use director::{DirectorBuilder, EncounterDirector};
pub use encounter::{Encounter, EncounterContext};
pub use error::{HookError, Result, RuntimeError};
pub use events::{Event, EventBus, OutcomeEvent, PhaseEvent, StrikeRecord, Topic};
pub use hooks::{
    CombatHook, EliteBountyHook, HeroDefeated, HookCriticality, HookRegistry, LivesHook,
    MonsterDefeated,
};
pub use ledger::{CombatantLedger, HpCheckpoint, InMemoryLedger, NullLedger};
pub use scheduler::{PhaseScheduler, Presenter, SilentPresenter};
