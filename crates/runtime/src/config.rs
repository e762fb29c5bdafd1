use combat_core::CombatConfig;

/// Runtime configuration for hosting encounters.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
    /// Base seed; each encounter derives its own seed from this and its id.
    pub seed: u64,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
            seed: 0,
        }
    }
}
