//! Hook that deducts a life whenever the hero falls.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::info;

use super::{CombatHook, HeroDefeated, HookCriticality};
use crate::error::HookError;

/// Tracks the hero's remaining lives across encounters.
///
/// Every hero defeat costs one life; the defeat that spends the last life is
/// game over. A defeat reported with no lives left is a host bug and fails the
/// hook instead of wrapping around.
#[derive(Debug)]
pub struct LivesHook {
    lives: AtomicU32,
}

impl LivesHook {
    pub const NAME: &'static str = "lives";

    pub fn new(lives: u32) -> Self {
        Self {
            lives: AtomicU32::new(lives),
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives.load(Ordering::Acquire)
    }

    pub fn is_game_over(&self) -> bool {
        self.lives() == 0
    }
}

impl CombatHook for LivesHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Critical
    }

    fn on_hero_defeated(&self, event: &HeroDefeated) -> Result<(), HookError> {
        let previous = self
            .lives
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |lives| lives.checked_sub(1))
            .map_err(|_| HookError::failed(Self::NAME, "hero defeated with no lives left"))?;

        let remaining = previous - 1;
        if remaining == 0 {
            info!(
                target: "runtime::hooks",
                hero = %event.hero_name,
                slain_by = %event.monster_name,
                "Game over"
            );
        } else {
            info!(
                target: "runtime::hooks",
                hero = %event.hero_name,
                remaining,
                "Life lost"
            );
        }
        Ok(())
    }
}
