//! Hook that counts elite kills for bounty-style content.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

use super::{CombatHook, HookCriticality, MonsterDefeated};
use crate::error::HookError;

/// Counts defeated elite monsters. Matching kills against concrete bounties
/// belongs to the content layer; this only provides the signal.
#[derive(Debug, Default)]
pub struct EliteBountyHook {
    elite_kills: AtomicU32,
    final_boss_kills: AtomicU32,
}

impl EliteBountyHook {
    pub const NAME: &'static str = "elite_bounty";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn elite_kills(&self) -> u32 {
        self.elite_kills.load(Ordering::Acquire)
    }

    pub fn final_boss_kills(&self) -> u32 {
        self.final_boss_kills.load(Ordering::Acquire)
    }
}

impl CombatHook for EliteBountyHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        10
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn on_monster_defeated(&self, event: &MonsterDefeated) -> Result<(), HookError> {
        if event.was_final_boss {
            self.final_boss_kills.fetch_add(1, Ordering::AcqRel);
        }
        if event.was_elite {
            let kills = self.elite_kills.fetch_add(1, Ordering::AcqRel) + 1;
            debug!(
                target: "runtime::hooks",
                monster = %event.monster_name,
                kills,
                "Elite defeated"
            );
        }
        Ok(())
    }
}
