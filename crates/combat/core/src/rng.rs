//! RNG oracle for deterministic random number generation.
//!
//! Both random decisions of the engine go through this seam: the per-round
//! initiative coin flip and the per-strike damage variance draw. Hosts supply
//! an implementation; tests supply [`ScriptedRng`] to replay exact scenarios.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value. Together with the session seed and
//! draw counter this makes every combat reproducible.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::CombatConfig;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Fair coin flip. Uses the high bit, which is the best-mixed bit of PCG output.
    fn coin_flip(&self, seed: u64) -> bool {
        self.next_u32(seed) >> 31 == 1
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. Stateless: every call derives its output from the seed it
/// is given, so callers own sequencing through [`compute_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Context values separating independent draws made at the same point.
pub mod context {
    /// Initiative coin flip at round start.
    pub const INITIATIVE: u32 = 0;
    /// Damage variance of a strike.
    pub const VARIANCE: u32 = 1;
}

/// Compute a deterministic seed for one draw of a combat session.
///
/// # Arguments
///
/// * `session_seed` - Seed fixed at session creation
/// * `nonce` - Draw counter of the session (increments on every draw)
/// * `round` - Current round number
/// * `context` - Which kind of draw this is (see [`context`])
pub fn compute_seed(session_seed: u64, nonce: u64, round: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = session_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (round as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Replays a fixed list of raw draws in order, ignoring seeds.
///
/// Use the builder helpers to script draws by meaning instead of raw value:
///
/// ```
/// use combat_core::ScriptedRng;
///
/// // Round 1: hero strikes first with average damage, monster answers with maximum.
/// let rng = ScriptedRng::new().hero_first().variance(1000).variance(1200);
/// assert_eq!(rng.remaining(), 3);
/// ```
///
/// When the script is exhausted it starts over from the first draw.
/// Variance helpers assume the default variance bounds of [`CombatConfig`].
#[derive(Debug, Default)]
pub struct ScriptedRng {
    draws: Vec<u32>,
    cursor: AtomicUsize,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw draw.
    #[must_use]
    pub fn raw(mut self, value: u32) -> Self {
        self.draws.push(value);
        self
    }

    /// Appends an initiative flip won by the hero.
    #[must_use]
    pub fn hero_first(self) -> Self {
        self.raw(u32::MAX)
    }

    /// Appends an initiative flip won by the monster.
    #[must_use]
    pub fn monster_first(self) -> Self {
        self.raw(0)
    }

    /// Appends a variance draw producing the given per-mille multiplier.
    #[must_use]
    pub fn variance(self, permille: u32) -> Self {
        let low = CombatConfig::DEFAULT_VARIANCE_MIN_PERMILLE;
        let high = CombatConfig::DEFAULT_VARIANCE_MAX_PERMILLE;
        self.raw(permille.clamp(low, high) - low)
    }

    /// Number of draws left before the script wraps around.
    pub fn remaining(&self) -> usize {
        self.draws
            .len()
            .saturating_sub(self.cursor.load(Ordering::Relaxed))
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        if self.draws.is_empty() {
            return 0;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.draws[index % self.draws.len()]
    }
}
