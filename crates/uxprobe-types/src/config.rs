//! Global configuration shape, loaded from `config.toml` by uxprobe-infra.

use serde::{Deserialize, Serialize};

/// Global configuration for the uxprobe CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// How many agents the status dashboard lists as "recent".
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Whether to seed the in-memory catalog with sample agents on startup.
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

fn default_recent_limit() -> usize {
    3
}

fn default_seed_samples() -> bool {
    true
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            seed_samples: default_seed_samples(),
        }
    }
}
