//! Built-in hero and monster stat blocks.

use combat_core::Combatant;

pub const HERO_NAME: &str = "Hero";

/// Monster archetypes the simulator can pit against the hero.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MonsterPreset {
    #[default]
    Goblin,
    OgreElite,
    /// Final boss.
    Dragon,
}

impl MonsterPreset {
    /// Builds the monster scaled to the hero's level.
    pub fn monster(self, hero_level: u32) -> Combatant {
        let hero_level = hero_level.max(1);
        match self {
            Self::Goblin => {
                let level = hero_level.saturating_sub(1).max(1);
                let hp = 18 + 4 * level;
                Combatant::new("Goblin", level)
                    .with_hp(hp, hp)
                    .with_attack(4 + level)
                    .with_defense(2 + level / 2)
            }
            Self::OgreElite => {
                let level = hero_level + 1;
                let hp = 40 + 8 * level;
                Combatant::new("Ogre", level)
                    .with_hp(hp, hp)
                    .with_attack(7 + 2 * level)
                    .with_defense(6 + level)
                    .elite()
            }
            Self::Dragon => {
                let level = hero_level + 3;
                let hp = 120 + 10 * level;
                Combatant::new("Dragon", level)
                    .with_hp(hp, hp)
                    .with_attack(14 + 2 * level)
                    .with_defense(12 + level)
                    .elite()
                    .final_boss()
            }
        }
    }
}

/// Builds a full-health hero of `level`.
pub fn hero(level: u32) -> Combatant {
    let level = level.max(1);
    let hp = 30 + 6 * level;
    Combatant::new(HERO_NAME, level)
        .with_hp(hp, hp)
        .with_attack(8 + 2 * level)
        .with_defense(4 + level)
}
