//! Combat-relevant view of one participant.

use crate::combat::apply_damage;

/// Which side of the fight a combatant is on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    Hero,
    Monster,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Side::Hero => Side::Monster,
            Side::Monster => Side::Hero,
        }
    }
}

/// Snapshot of a participant's combat stats, owned by a session while it runs.
///
/// Built from an external record at session start; the engine never holds a
/// reference back into that record. `is_elite` and `is_final_boss` only select
/// terminal-sequence variants and never enter damage math.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub level: u32,
    pub is_elite: bool,
    pub is_final_boss: bool,
}

impl Combatant {
    /// Creates a level-`level` combatant with no stats; use the `with_*` builders.
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            hp: 0,
            max_hp: 0,
            attack: 0,
            defense: 0,
            level,
            is_elite: false,
            is_final_boss: false,
        }
    }

    #[must_use]
    pub fn with_hp(mut self, hp: u32, max_hp: u32) -> Self {
        self.hp = hp;
        self.max_hp = max_hp;
        self
    }

    #[must_use]
    pub fn with_attack(mut self, attack: u32) -> Self {
        self.attack = attack;
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    #[must_use]
    pub fn elite(mut self) -> Self {
        self.is_elite = true;
        self
    }

    #[must_use]
    pub fn final_boss(mut self) -> Self {
        self.is_final_boss = true;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies `damage` and returns the remaining hp (clamped to 0).
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.hp = apply_damage(self.hp, damage);
        self.hp
    }

    /// Clamps out-of-range stats instead of rejecting them: level 0 becomes 1,
    /// hp above `max_hp` is cut down to `max_hp`.
    pub(crate) fn normalized(mut self) -> Self {
        self.level = self.level.max(1);
        self.hp = self.hp.min(self.max_hp);
        self
    }

    pub(crate) fn check(&self) -> Option<InvalidCombatantReason> {
        if self.max_hp == 0 {
            Some(InvalidCombatantReason::NoMaxHp)
        } else if self.hp == 0 {
            Some(InvalidCombatantReason::NoHp)
        } else {
            None
        }
    }
}

/// Why a snapshot cannot enter combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidCombatantReason {
    #[strum(serialize = "hp must be above zero")]
    NoHp,
    #[strum(serialize = "max hp must be above zero")]
    NoMaxHp,
}
