//! Damage calculation and application.

use crate::config::DamageParams;
use crate::rng::{RngOracle, compute_seed, context};

/// Calculate the damage of one strike.
///
/// # Formula
///
/// ```text
/// base        = attack × variance                       (variance in [0.8, 1.2])
/// base       ×= 1 + clamp(atk_level - def_level, -5, 5) × 0.15
/// absorbed    = min(defense / (defense + 15), 0.85)
/// final       = base × (1 - absorbed)
/// min_damage  = max(1, (atk_level + 1) / 2)
/// result      = max(min_damage, round(final))
/// ```
///
/// Balance parameters come from [`DamageParams`]. The variance draw is
/// supplied by the caller, which keeps this function pure: the same inputs
/// always produce the same damage.
///
/// # Arguments
///
/// * `attack` - Attacker's attack stat
/// * `defense` - Defender's defense stat
/// * `attacker_level` - Attacker's level (0 is treated as 1)
/// * `defender_level` - Defender's level (0 is treated as 1)
/// * `variance_permille` - Variance multiplier draw, clamped to the configured bounds
/// * `params` - Balance parameters
///
/// # Returns
///
/// Final damage, never below [`minimum_damage`] and therefore never 0.
pub fn compute_damage(
    attack: u32,
    defense: u32,
    attacker_level: u32,
    defender_level: u32,
    variance_permille: u32,
    params: &DamageParams,
) -> u32 {
    let (low, high) = params.variance_bounds();
    let variance = variance_permille.clamp(low, high);

    let modifier = level_modifier_permille(attacker_level, defender_level, params);
    let scaled = attack as u128 * variance as u128 * modifier as u128;
    let base = scaled as f64 / 1_000_000.0;

    let reduced = base * (1.0 - defense_ratio(defense, params));

    // `as` saturates, so huge values cannot wrap
    let rounded = reduced.round() as u32;
    rounded.max(minimum_damage(attacker_level))
}

/// Level difference multiplier in per-mille (1000 = no change).
///
/// The difference is clamped to the configured cap; the multiplier never
/// drops below zero even with aggressive custom parameters.
pub fn level_modifier_permille(
    attacker_level: u32,
    defender_level: u32,
    params: &DamageParams,
) -> u32 {
    let cap = params.level_diff_cap as i64;
    let diff = (attacker_level.max(1) as i64 - defender_level.max(1) as i64).clamp(-cap, cap);
    let modifier = 1000 + diff * params.level_step_permille as i64;
    modifier.max(0) as u32
}

/// Fraction of incoming damage absorbed by `defense`, in `[0, cap]`.
///
/// Diminishing returns: every extra point of defense absorbs less than the
/// previous one, and absorption never reaches full immunity.
pub fn defense_ratio(defense: u32, params: &DamageParams) -> f64 {
    if defense == 0 {
        return 0.0;
    }
    let defense = defense as f64;
    let ratio = defense / (defense + params.defense_softcap as f64);
    let cap = params.defense_cap_permille.min(1000) as f64 / 1000.0;
    ratio.min(cap)
}

/// Token damage an attacker of `level` always deals.
pub fn minimum_damage(level: u32) -> u32 {
    (level.max(1).saturating_add(1) / 2).max(1)
}

/// Draw a variance multiplier for one strike.
pub fn roll_variance(
    rng: &(impl RngOracle + ?Sized),
    session_seed: u64,
    nonce: u64,
    round: u32,
    params: &DamageParams,
) -> u32 {
    let (low, high) = params.variance_bounds();
    let seed = compute_seed(session_seed, nonce, round, context::VARIANCE);
    rng.range(seed, low, high)
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
