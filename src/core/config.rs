//! Match configuration.
//!
//! The host decides which optional rules a match is played with. The engine
//! never reads flags from anywhere else.

use serde::{Deserialize, Serialize};

/// Configuration flags for a single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Rotate through every chaser and beater of a team.
    /// When off, the first listed player acts every round.
    pub duplicate_roles: bool,

    /// Roll for weather before the match.
    /// When off, the weather modifier stays at 0.
    pub use_weather: bool,

    /// Record every player's outcome codes for the result record.
    pub collect_metadata: bool,

    /// Let beaters go after a dangerous enemy seeker instead of the quaffle.
    pub house_rules: bool,

    /// Put an extra dice gate in front of seeker targeting (house rules only).
    pub randomized_targeting_gate: bool,

    /// Seed for the default dice.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duplicate_roles: false,
            use_weather: false,
            collect_metadata: false,
            house_rules: false,
            randomized_targeting_gate: false,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Create a config with every optional rule switched off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable chaser/beater rotation.
    #[must_use]
    pub fn with_duplicate_roles(mut self, enabled: bool) -> Self {
        self.duplicate_roles = enabled;
        self
    }

    /// Enable or disable the pre-game weather roll.
    #[must_use]
    pub fn with_weather(mut self, enabled: bool) -> Self {
        self.use_weather = enabled;
        self
    }

    /// Enable or disable per-player outcome history.
    #[must_use]
    pub fn with_metadata(mut self, enabled: bool) -> Self {
        self.collect_metadata = enabled;
        self
    }

    /// Enable or disable the seeker-targeting house rule.
    #[must_use]
    pub fn with_house_rules(mut self, enabled: bool) -> Self {
        self.house_rules = enabled;
        self
    }

    /// Enable or disable the randomized targeting gate.
    #[must_use]
    pub fn with_randomized_targeting_gate(mut self, enabled: bool) -> Self {
        self.randomized_targeting_gate = enabled;
        self
    }

    /// Set the seed for the default dice.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
