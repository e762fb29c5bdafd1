//! Terminal outcomes and the sequences they select.

use crate::combatant::{Combatant, Side};

/// Outcome of a finished combat, from the hero's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatOutcome {
    Won,
    Lost,
}

impl CombatOutcome {
    pub const fn winner(self) -> Side {
        match self {
            Self::Won => Side::Hero,
            Self::Lost => Side::Monster,
        }
    }
}

/// Which terminal sequence the presentation layer should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerminalSequence {
    Victory,
    EliteVictory,
    /// Extended celebration, replaces the standard victory sequence.
    FinalBossVictory,
    Defeat,
}

/// The single result a session produces when it reaches `Terminal`.
///
/// `elite_completed` and `final_boss_won` decorate a `Won` outcome; they are
/// always false for `Lost`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalResult {
    pub outcome: CombatOutcome,
    pub elite_completed: bool,
    pub final_boss_won: bool,
    /// Round in which the fight ended.
    pub rounds: u32,
    pub hero_name: String,
    pub hero_hp: u32,
    pub monster_name: String,
    pub monster_hp: u32,
}

impl TerminalResult {
    pub(crate) fn new(
        outcome: CombatOutcome,
        hero: &Combatant,
        monster: &Combatant,
        rounds: u32,
    ) -> Self {
        let won = outcome == CombatOutcome::Won;
        Self {
            outcome,
            elite_completed: won && monster.is_elite,
            final_boss_won: won && monster.is_final_boss,
            rounds,
            hero_name: hero.name.clone(),
            hero_hp: hero.hp,
            monster_name: monster.name.clone(),
            monster_hp: monster.hp,
        }
    }

    pub const fn is_victory(&self) -> bool {
        matches!(self.outcome, CombatOutcome::Won)
    }

    /// Final boss takes precedence over elite when a monster is flagged as both.
    pub const fn sequence(&self) -> TerminalSequence {
        match self.outcome {
            CombatOutcome::Lost => TerminalSequence::Defeat,
            CombatOutcome::Won if self.final_boss_won => TerminalSequence::FinalBossVictory,
            CombatOutcome::Won if self.elite_completed => TerminalSequence::EliteVictory,
            CombatOutcome::Won => TerminalSequence::Victory,
        }
    }
}
