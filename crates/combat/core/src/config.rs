/// Balancing parameters for the damage model.
///
/// All fractional values are stored as integer per-mille (1000 = 1.0) so the
/// configuration is exact, hashable and identical across platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageParams {
    /// Lower bound of the variance multiplier (per-mille).
    pub variance_min_permille: u32,
    /// Upper bound of the variance multiplier (per-mille).
    pub variance_max_permille: u32,
    /// Damage change per level of difference (per-mille).
    pub level_step_permille: u32,
    /// Largest level difference that still changes damage.
    pub level_diff_cap: u32,
    /// Defense value at which half of the incoming damage is absorbed.
    pub defense_softcap: u32,
    /// Upper bound of the absorbed fraction (per-mille).
    pub defense_cap_permille: u32,
}

impl DamageParams {
    pub const fn new() -> Self {
        Self {
            variance_min_permille: CombatConfig::DEFAULT_VARIANCE_MIN_PERMILLE,
            variance_max_permille: CombatConfig::DEFAULT_VARIANCE_MAX_PERMILLE,
            level_step_permille: CombatConfig::DEFAULT_LEVEL_STEP_PERMILLE,
            level_diff_cap: CombatConfig::DEFAULT_LEVEL_DIFF_CAP,
            defense_softcap: CombatConfig::DEFAULT_DEFENSE_SOFTCAP,
            defense_cap_permille: CombatConfig::DEFAULT_DEFENSE_CAP_PERMILLE,
        }
    }

    /// Variance bounds ordered low to high, whatever order they were configured in.
    pub fn variance_bounds(&self) -> (u32, u32) {
        let (a, b) = (self.variance_min_permille, self.variance_max_permille);
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl Default for DamageParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    pub damage: DamageParams,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VARIANCE_MIN_PERMILLE: u32 = 800;
    pub const DEFAULT_VARIANCE_MAX_PERMILLE: u32 = 1200;
    pub const DEFAULT_LEVEL_STEP_PERMILLE: u32 = 150;
    pub const DEFAULT_LEVEL_DIFF_CAP: u32 = 5;
    pub const DEFAULT_DEFENSE_SOFTCAP: u32 = 15;
    pub const DEFAULT_DEFENSE_CAP_PERMILLE: u32 = 850;

    pub const fn new() -> Self {
        Self {
            damage: DamageParams::new(),
        }
    }

    pub const fn with_damage(damage: DamageParams) -> Self {
        Self { damage }
    }
}
