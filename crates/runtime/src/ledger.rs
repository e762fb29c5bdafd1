//! Write-back of combatant hp to the records combatants were built from.
//!
//! Sessions own hp while they run. Encounters hand it back at checkpoints
//! (after every strike and once more when the encounter ends), so an owner
//! reading between checkpoints sees slightly stale hp.

use std::collections::HashMap;
use std::sync::RwLock;

use combat_core::{Combatant, SessionId, Side};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};

/// Hp of one combatant at a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpCheckpoint {
    pub session: SessionId,
    pub side: Side,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
}

impl HpCheckpoint {
    pub fn of(session: SessionId, side: Side, combatant: &Combatant) -> Self {
        Self {
            session,
            side,
            name: combatant.name.clone(),
            hp: combatant.hp,
            max_hp: combatant.max_hp,
        }
    }
}

/// Owner of the external hero/monster records.
pub trait CombatantLedger: Send + Sync {
    fn checkpoint(&self, checkpoint: &HpCheckpoint) -> Result<()>;
}

/// In-memory ledger for tests and local runs.
///
/// Keeps the latest hp per combatant name plus the full checkpoint history.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    latest: RwLock<HashMap<String, u32>>,
    history: RwLock<Vec<HpCheckpoint>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest hp written for `name`.
    pub fn hp(&self, name: &str) -> Result<Option<u32>> {
        let latest = self
            .latest
            .read()
            .map_err(|_| RuntimeError::LedgerPoisoned)?;
        Ok(latest.get(name).copied())
    }

    pub fn history(&self) -> Result<Vec<HpCheckpoint>> {
        let history = self
            .history
            .read()
            .map_err(|_| RuntimeError::LedgerPoisoned)?;
        Ok(history.clone())
    }
}

impl CombatantLedger for InMemoryLedger {
    fn checkpoint(&self, checkpoint: &HpCheckpoint) -> Result<()> {
        let mut latest = self
            .latest
            .write()
            .map_err(|_| RuntimeError::LedgerPoisoned)?;
        let mut history = self
            .history
            .write()
            .map_err(|_| RuntimeError::LedgerPoisoned)?;
        latest.insert(checkpoint.name.clone(), checkpoint.hp);
        history.push(checkpoint.clone());
        Ok(())
    }
}

/// Ledger that discards every checkpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLedger;

impl CombatantLedger for NullLedger {
    fn checkpoint(&self, _checkpoint: &HpCheckpoint) -> Result<()> {
        Ok(())
    }
}
