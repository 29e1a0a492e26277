//! Configuration handling for todo-queue
//!
//! Configuration is read from `config.toml` in the user config directory
//! (e.g. `~/.config/todo-queue/config.toml`), or from the path given with
//! `--config` / `TODOQ_CONFIG`. Only settings live here; tasks are never
//! written to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest length the form may offer, a century in hours
pub const MAX_LENGTH_HOURS: u32 = 100 * 365 * 24;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Categories offered by the form
    pub categories: Vec<String>,

    /// Task lengths in hours offered by the form
    pub lengths: Vec<u32>,

    /// strftime pattern for due and completion times
    pub date_format: String,

    /// Input poll interval for the TUI
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: ["Study", "Shop", "Cook", "Sleep"]
                .into_iter()
                .map(String::from)
                .collect(),
            lengths: vec![1, 2, 3, 4, 5],
            date_format: "%m/%d/%Y %H:%M".to_string(),
            tick_rate_ms: 250,
        }
    }
}

/// Configuration together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when no file existed and defaults are in use
    pub source: Option<PathBuf>,
}

impl Config {
    /// Returns the default config file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "todo-queue", "todo-queue")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads from an explicit path, or from the default location.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        if let Some(path) = explicit {
            let config = Self::load_file(path)?;
            return Ok(LoadedConfig {
                config,
                source: Some(path.to_path_buf()),
            });
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                let config = Self::load_file(&path)?;
                Ok(LoadedConfig {
                    config,
                    source: Some(path),
                })
            }
            _ => Ok(LoadedConfig {
                config: Config::default(),
                source: None,
            }),
        }
    }

    /// Reads and validates a config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses and validates TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the form has something to offer
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid("categories must not be empty".to_string()));
        }
        if self.lengths.is_empty() {
            return Err(ConfigError::Invalid("lengths must not be empty".to_string()));
        }
        if self.lengths.contains(&0) {
            return Err(ConfigError::Invalid(
                "lengths must be at least one hour".to_string(),
            ));
        }
        if self.lengths.iter().any(|&hours| hours > MAX_LENGTH_HOURS) {
            return Err(ConfigError::Invalid(format!(
                "lengths must be at most {} hours",
                MAX_LENGTH_HOURS
            )));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "date_format is not a valid strftime pattern: {}",
                self.date_format
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Formats a timestamp in local time using `date_format`
    pub fn format_time(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&Local).format(&self.date_format).to_string()
    }

    /// Serializes to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
