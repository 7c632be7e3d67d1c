//! Configuration loading and management
//!
//! Handles parsing of `taskgrid.toml` configuration files. Everything has
//! a sensible default; the file is optional.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::{Priority, Status};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Override for the task blob path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Defaults applied to newly created tasks
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Defaults for new tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default status for new tasks
    #[serde(default = "default_status")]
    pub status: String,

    /// Default priority for new tasks
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_status() -> String {
    "Pending".to_string()
}

fn default_priority() -> String {
    "Low".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            status: default_status(),
            priority: default_priority(),
        }
    }
}

impl DefaultsConfig {
    /// Parsed default status
    pub fn status(&self) -> Status {
        self.status.parse().unwrap_or_default()
    }

    /// Parsed default priority
    pub fn priority(&self) -> Priority {
        self.priority.parse().unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        self.status
            .parse::<Status>()
            .map_err(|_| Error::InvalidConfig(format!("defaults.status '{}' is not a valid status", self.status)))?;
        self.priority
            .parse::<Priority>()
            .map_err(|_| {
                Error::InvalidConfig(format!(
                    "defaults.priority '{}' is not a valid priority",
                    self.priority
                ))
            })?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from a `taskgrid.toml` file
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path, or from `taskgrid.toml`
    /// in the platform config directory, or fall back to defaults.
    pub fn load_or_default(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(&path);
        }
        let Some(dirs) = directories::ProjectDirs::from("", "", "taskgrid") else {
            return Ok(Self::default());
        };
        let candidate = dirs.config_dir().join("taskgrid.toml");
        if candidate.exists() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &PathBuf) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.defaults.validate()
    }
}
