//! User settings for fintrack
//!
//! Holds the local profile's user id and the default report knobs.

use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::{FintrackError, FintrackResult};
use crate::models::UserId;

fn default_schema_version() -> u32 {
    1
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_evolution_months() -> u32 {
    6
}

fn default_top_limit() -> u32 {
    10
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The local profile's ledger owner
    #[serde(default)]
    pub user_id: UserId,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Default trailing window for evolution reports
    #[serde(default = "default_evolution_months")]
    pub default_evolution_months: u32,

    /// Default limit for top-transaction reports
    #[serde(default = "default_top_limit")]
    pub default_top_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: UserId::new(),
            currency_symbol: default_currency_symbol(),
            default_evolution_months: default_evolution_months(),
            default_top_limit: default_top_limit(),
        }
    }
}

impl Settings {
    /// Load settings, creating the file with defaults on first run
    pub fn load_or_create(paths: &FintrackPaths) -> FintrackResult<Self> {
        let path = paths.settings_file();

        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                FintrackError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            return serde_json::from_str(&contents).map_err(|e| {
                FintrackError::Config(format!("Failed to parse {}: {}", path.display(), e))
            });
        }

        let settings = Self::default();
        settings.save(paths)?;
        Ok(settings)
    }

    /// Persist settings
    pub fn save(&self, paths: &FintrackPaths) -> FintrackResult<()> {
        paths.ensure_directories()?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FintrackError::Config(format!("Failed to write settings: {}", e)))
    }
}
