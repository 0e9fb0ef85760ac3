//! Dice battle configuration.
//!
//! Loaded from YAML by the `dice battle` command; CLI flags override fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::notation::PoolSpec;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// How each player's pool is rolled every round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl std::str::FromStr for RollMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(RollMode::Normal),
            "advantage" => Ok(RollMode::Advantage),
            "disadvantage" => Ok(RollMode::Disadvantage),
            other => Err(ConfigError::Invalid(format!(
                "unknown roll mode {other:?} (expected normal|advantage|disadvantage)"
            ))),
        }
    }
}

/// One battle participant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerConfig {
    pub name: String,
    /// Pool in NdK notation, e.g. "5d6".
    pub pool: String,
}

impl PlayerConfig {
    pub fn pool_spec(&self) -> Result<PoolSpec, ConfigError> {
        self.pool
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("player {:?}: {e}", self.name)))
    }
}

/// Root battle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BattleConfig {
    pub players: Vec<PlayerConfig>,
    /// Base seed; each player's stream is derived from it. None = OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub mode: RollMode,
    /// Optional NDJSON event log path.
    #[serde(default)]
    pub log_path: Option<String>,
}

impl BattleConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// At least two players, each with parseable pool notation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "battle needs at least 2 players, got {}",
                self.players.len()
            )));
        }
        for p in &self.players {
            p.pool_spec()?;
        }
        Ok(())
    }

    /// Replace every player's pool.
    pub fn set_all_pools(&mut self, pool: &PoolSpec) {
        for p in &mut self.players {
            p.pool = pool.to_string();
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            players: vec![
                PlayerConfig {
                    name: "Player 1".to_string(),
                    pool: "5d6".to_string(),
                },
                PlayerConfig {
                    name: "Player 2".to_string(),
                    pool: "5d6".to_string(),
                },
            ],
            seed: None,
            mode: RollMode::Normal,
            log_path: None,
        }
    }
}
