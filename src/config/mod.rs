//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pairing::PairingOptions;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tournament configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Tournament name; also the directory its data lives in
    #[serde(default = "default_tournament_name")]
    pub name: String,

    /// Accept a reported match between players who already met
    #[serde(default)]
    pub allow_rematches: bool,

    /// Fail pairing if the match history answers differently by argument order
    #[serde(default = "default_verify_symmetry")]
    pub verify_history_symmetry: bool,
}

fn default_tournament_name() -> String {
    "default".to_string()
}

fn default_verify_symmetry() -> bool {
    true
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: default_tournament_name(),
            allow_rematches: false,
            verify_history_symmetry: default_verify_symmetry(),
        }
    }
}

impl TournamentConfig {
    pub fn pairing_options(&self) -> PairingOptions {
        PairingOptions {
            verify_symmetry: self.verify_history_symmetry,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub tournament: TournamentConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            tournament: TournamentConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.tournament.name;
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Tournament name must not be empty".to_string(),
            ));
        }

        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::ValidationError(format!(
                "Tournament name must be a plain directory name: {:?}",
                name
            )));
        }

        Ok(())
    }
}
