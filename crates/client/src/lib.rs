//! Combat simulator: runs a batch of encounters end to end.
//!
//! # Architecture
//!
//! ```text
//! SimConfig (env)
//!   └─→ EncounterDirector (combat-runtime)
//!         ├─→ LivesHook / EliteBountyHook
//!         ├─→ InMemoryLedger (hero hp carried between fights)
//!         └─→ PhaseScheduler ─→ Presenter (console)
//! ```

pub mod config;
pub mod logging;
pub mod presenter;
pub mod presets;

use std::sync::Arc;

use anyhow::{Context, Result};
use combat_core::{CombatOutcome, PcgRng};
use combat_runtime::{
    EliteBountyHook, EncounterDirector, HookRegistry, InMemoryLedger, LivesHook, PhaseScheduler,
    Presenter, RuntimeConfig,
};
use serde::Serialize;

pub use config::SimConfig;
pub use presenter::ConsolePresenter;

/// Totals of one simulator run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimSummary {
    pub encounters: u32,
    pub wins: u32,
    pub losses: u32,
    pub elite_kills: u32,
    pub final_boss_kills: u32,
    pub lives_left: u32,
    pub game_over: bool,
}

/// Fights `config.encounters` battles against `config.monster`, stopping early on game over.
///
/// The hero keeps its hp between victories and starts over at full health
/// after losing a life.
pub async fn run<P: Presenter>(config: &SimConfig, presenter: P) -> Result<SimSummary> {
    let lives = Arc::new(LivesHook::new(config.lives));
    let bounty = Arc::new(EliteBountyHook::new());
    let ledger = Arc::new(InMemoryLedger::new());

    let hooks = HookRegistry::new()
        .with(lives.clone())?
        .with(bounty.clone())?;
    let mut director = EncounterDirector::builder()
        .config(RuntimeConfig::default().with_seed(config.seed))
        .rng(PcgRng)
        .hooks(hooks)
        .ledger(ledger.clone())
        .build();
    let mut scheduler = PhaseScheduler::new(presenter).with_pace(config.pace);

    let mut summary = SimSummary::default();
    for index in 0..config.encounters {
        if lives.is_game_over() {
            break;
        }

        let mut hero = presets::hero(config.hero_level);
        if let Some(hp) = ledger.hp(&hero.name)?.filter(|hp| *hp > 0) {
            hero.hp = hp;
        }
        let monster = config.monster.monster(config.hero_level);

        tracing::info!(
            encounter = index + 1,
            hero_hp = hero.hp,
            monster = %monster.name,
            "Starting encounter"
        );
        let encounter = director
            .start(hero, monster)
            .context("failed to start encounter")?;
        let result = scheduler.run_paced(encounter).await?;

        summary.encounters += 1;
        match result.map(|r| r.outcome) {
            Some(CombatOutcome::Won) => summary.wins += 1,
            Some(CombatOutcome::Lost) => summary.losses += 1,
            None => {}
        }
    }

    summary.elite_kills = bounty.elite_kills();
    summary.final_boss_kills = bounty.final_boss_kills();
    summary.lives_left = lives.lives();
    summary.game_over = lives.is_game_over();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use combat_runtime::SilentPresenter;

    use super::*;
    use crate::presets::MonsterPreset;

    #[tokio::test]
    async fn goblins_do_not_stand_a_chance() {
        let config = SimConfig {
            encounters: 5,
            ..SimConfig::default()
        };
        let summary = run(&config, SilentPresenter).await.unwrap();
        assert_eq!(summary.encounters, 5);
        assert_eq!(summary.wins + summary.losses, 5);
        assert_eq!(summary.elite_kills, 0);
        assert!(!summary.game_over || summary.lives_left == 0);
    }

    #[tokio::test]
    async fn runs_stop_at_game_over() {
        let config = SimConfig {
            encounters: 20,
            monster: MonsterPreset::Dragon,
            hero_level: 1,
            lives: 2,
            ..SimConfig::default()
        };
        let summary = run(&config, SilentPresenter).await.unwrap();
        assert!(summary.game_over);
        assert_eq!(summary.losses, 2);
        assert_eq!(summary.lives_left, 0);
        assert!(summary.encounters < 20);
    }

    #[tokio::test]
    async fn same_seed_same_summary() {
        let config = SimConfig {
            encounters: 4,
            monster: MonsterPreset::OgreElite,
            ..SimConfig::default()
        };
        let a = run(&config, SilentPresenter).await.unwrap();
        let b = run(&config, SilentPresenter).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.elite_kills, a.wins);
    }
}
