//! Session configuration loaded from JSON or built from CLI flags.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_ACTIONS_PER_PERIOD, DEFAULT_PLAYER_NAME, DEFAULT_TOTAL_DAYS, STAT_MAX, STAT_MIN,
};
use crate::stats::{StatBlock, StatName};

/// Errors raised when session configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse session config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: u32,
        value: u32,
    },
    #[error("starting {stat} must be between 0 and 100 (got {value})")]
    StartingStatOutOfRange { stat: StatName, value: i32 },
    #[error("player name must not be blank")]
    BlankName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "SessionConfig::default_player_name")]
    pub player_name: String,
    #[serde(default = "SessionConfig::default_total_days")]
    pub total_days: u32,
    #[serde(default = "SessionConfig::default_actions_per_period")]
    pub actions_per_period: u8,
    #[serde(default)]
    pub starting: StatBlock,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_name: Self::default_player_name(),
            total_days: Self::default_total_days(),
            actions_per_period: Self::default_actions_per_period(),
            starting: StatBlock::default(),
        }
    }
}

impl SessionConfig {
    fn default_player_name() -> String {
        DEFAULT_PLAYER_NAME.to_string()
    }

    const fn default_total_days() -> u32 {
        DEFAULT_TOTAL_DAYS
    }

    const fn default_actions_per_period() -> u8 {
        DEFAULT_ACTIONS_PER_PERIOD
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error from [`SessionConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_name.trim().is_empty() {
            return Err(ConfigError::BlankName);
        }
        if self.total_days == 0 {
            return Err(ConfigError::MinViolation {
                field: "total_days",
                min: 1,
                value: 0,
            });
        }
        if self.actions_per_period == 0 {
            return Err(ConfigError::MinViolation {
                field: "actions_per_period",
                min: 1,
                value: 0,
            });
        }
        if let Some((stat, value)) = self
            .starting
            .iter()
            .find(|(_, value)| !(STAT_MIN..=STAT_MAX).contains(value))
        {
            return Err(ConfigError::StartingStatOutOfRange { stat, value });
        }
        Ok(())
    }
}
