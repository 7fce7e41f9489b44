//! Rules configuration shared by every inventory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::inventory::EQUIPMENT_CAPACITY;

/// How forgiving use restoration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Items recharge back to the uses they had when equipped.
    Casual,
    /// Only abilities recharge, and always to their full uses.
    #[default]
    Standard,
}

/// Settings the combat item core reads instead of global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub mode: GameMode,
    pub equipment_capacity: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Standard,
            equipment_capacity: EQUIPMENT_CAPACITY,
        }
    }
}

impl RulesConfig {
    /// Parse a configuration from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
