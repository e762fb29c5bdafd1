//! Payloads handed to hooks when a fight ends.

use combat_core::{CombatOutcome, SessionId, TerminalResult};

/// The hero won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterDefeated {
    pub session: SessionId,
    pub monster_name: String,
    pub was_elite: bool,
    pub was_final_boss: bool,
    pub rounds: u32,
}

/// The monster won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroDefeated {
    pub session: SessionId,
    pub hero_name: String,
    pub monster_name: String,
    pub rounds: u32,
}

/// Exactly one of the two payloads, picked by the outcome.
pub(crate) enum Defeat {
    Monster(MonsterDefeated),
    Hero(HeroDefeated),
}

impl Defeat {
    pub(crate) fn from_result(session: SessionId, result: &TerminalResult) -> Self {
        match result.outcome {
            CombatOutcome::Won => Self::Monster(MonsterDefeated {
                session,
                monster_name: result.monster_name.clone(),
                was_elite: result.elite_completed,
                was_final_boss: result.final_boss_won,
                rounds: result.rounds,
            }),
            CombatOutcome::Lost => Self::Hero(HeroDefeated {
                session,
                hero_name: result.hero_name.clone(),
                monster_name: result.monster_name.clone(),
                rounds: result.rounds,
            }),
        }
    }
}
