//! Simulator configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::presets::MonsterPreset;

/// Configuration required to run a batch of simulated encounters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub seed: u64,
    pub encounters: u32,
    pub monster: MonsterPreset,
    pub hero_level: u32,
    pub lives: u32,
    pub log_dir: Option<PathBuf>,
    /// Delay between presented phases.
    pub pace: Duration,
}

impl SimConfig {
    pub const DEFAULT_SEED: u64 = 0x5EED;
    pub const DEFAULT_ENCOUNTERS: u32 = 3;
    pub const DEFAULT_HERO_LEVEL: u32 = 3;
    pub const DEFAULT_LIVES: u32 = 3;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SEED` - Base seed for every encounter (default: 0x5EED)
    /// - `COMBAT_ENCOUNTERS` - Number of fights to run (default: 3, minimum 1)
    /// - `COMBAT_MONSTER` - `goblin`, `ogre-elite` or `dragon` (default: goblin)
    /// - `COMBAT_HERO_LEVEL` - Hero level (default: 3, minimum 1)
    /// - `COMBAT_LIVES` - Lives before game over (default: 3, minimum 1)
    /// - `COMBAT_LOG_DIR` - Also write logs to `combat-sim.log` in this directory
    /// - `COMBAT_PACE_MS` - Milliseconds between phases (default: 0)
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(seed) = read("COMBAT_SEED").and_then(|v| parse::<u64>(&v)) {
            config.seed = seed;
        }
        if let Some(encounters) = read("COMBAT_ENCOUNTERS").and_then(|v| parse::<u32>(&v)) {
            config.encounters = encounters.max(1);
        }
        if let Some(monster) = read("COMBAT_MONSTER").and_then(|v| parse::<MonsterPreset>(&v)) {
            config.monster = monster;
        }
        if let Some(level) = read("COMBAT_HERO_LEVEL").and_then(|v| parse::<u32>(&v)) {
            config.hero_level = level.max(1);
        }
        if let Some(lives) = read("COMBAT_LIVES").and_then(|v| parse::<u32>(&v)) {
            config.lives = lives.max(1);
        }
        config.log_dir = read("COMBAT_LOG_DIR").map(PathBuf::from);
        if let Some(ms) = read("COMBAT_PACE_MS").and_then(|v| parse::<u64>(&v)) {
            config.pace = Duration::from_millis(ms);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            encounters: Self::DEFAULT_ENCOUNTERS,
            monster: MonsterPreset::default(),
            hero_level: Self::DEFAULT_HERO_LEVEL,
            lives: Self::DEFAULT_LIVES,
            log_dir: None,
            pace: Duration::ZERO,
        }
    }
}

fn parse<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    value.trim().parse().ok()
}
