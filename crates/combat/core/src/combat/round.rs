//! Round resolution: initiative and strike application.
//!
//! A round is up to two strikes. Initiative is a fresh fair coin flip every
//! round, independent of stats and of who struck first last round. When the
//! first strike kills its defender the round ends there and the counter-strike
//! never happens.

use crate::combatant::{Combatant, Side};
use crate::config::DamageParams;
use crate::rng::{RngOracle, compute_seed, context};

use super::damage::compute_damage;

/// Strike order of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Initiative {
    pub first: Side,
}

impl Initiative {
    /// Heads: the hero strikes first.
    pub const fn from_coin(heads: bool) -> Self {
        let first = if heads { Side::Hero } else { Side::Monster };
        Self { first }
    }

    pub fn roll(rng: &(impl RngOracle + ?Sized), session_seed: u64, nonce: u64, round: u32) -> Self {
        let seed = compute_seed(session_seed, nonce, round, context::INITIATIVE);
        Self::from_coin(rng.coin_flip(seed))
    }

    /// The counter-striker.
    pub const fn second(&self) -> Side {
        self.first.opponent()
    }
}

/// One damage-dealing action, as seen by presentation and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeEvent {
    pub round: u32,
    pub attacker: Side,
    pub attacker_name: String,
    pub defender_name: String,
    pub damage: u32,
    pub defender_hp_after: u32,
}

impl StrikeEvent {
    pub const fn defender(&self) -> Side {
        self.attacker.opponent()
    }

    pub const fn is_lethal(&self) -> bool {
        self.defender_hp_after == 0
    }
}

/// Strikes of one completed round, in chronological order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    pub round: u32,
    pub initiative: Initiative,
    pub first: StrikeEvent,
    /// `None` when the first strike was lethal.
    pub counter: Option<StrikeEvent>,
}

impl RoundReport {
    pub fn strikes(&self) -> impl Iterator<Item = &StrikeEvent> {
        core::iter::once(&self.first).chain(self.counter.as_ref())
    }
}

/// Resolve one strike from `attacker` into `defender`, mutating the defender's hp.
pub fn strike(
    attacker: &Combatant,
    attacker_side: Side,
    defender: &mut Combatant,
    variance_permille: u32,
    round: u32,
    params: &DamageParams,
) -> StrikeEvent {
    let damage = compute_damage(
        attacker.attack,
        defender.defense,
        attacker.level,
        defender.level,
        variance_permille,
        params,
    );
    let defender_hp_after = defender.take_damage(damage);

    StrikeEvent {
        round,
        attacker: attacker_side,
        attacker_name: attacker.name.clone(),
        defender_name: defender.name.clone(),
        damage,
        defender_hp_after,
    }
}
