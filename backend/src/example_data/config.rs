//! Example data configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED: u64 = 42;
const DEFAULT_USER_COUNT: usize = 20;
const DEFAULT_CHEEPS_PER_USER: usize = 5;

/// Configuration values controlling example data seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Enable example data seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// RNG seed; the same seed always yields the same network.
    pub seed: Option<u64>,
    /// Number of users to generate.
    pub user_count: Option<usize>,
    /// Number of cheeps each generated user posts.
    pub cheeps_per_user: Option<usize>,
}

impl ExampleDataSettings {
    /// Settings with seeding switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            seed: None,
            user_count: None,
            cheeps_per_user: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn user_count(&self) -> usize {
        self.user_count.unwrap_or(DEFAULT_USER_COUNT)
    }

    pub fn cheeps_per_user(&self) -> usize {
        self.cheeps_per_user.unwrap_or(DEFAULT_CHEEPS_PER_USER)
    }
}
