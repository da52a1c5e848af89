//! Configuration management.

use anyhow::{Context, Result};
use sensorbar_core::{ModuleConfig, DEFAULT_INTERVAL_SECS};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure.
///
/// `interval` and `tooltip` drive the host loop; every other key is handed
/// to the sensor module as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Poll interval in seconds
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Whether to emit tooltips
    #[serde(default = "default_tooltip")]
    pub tooltip: bool,

    /// Sensor module keys (`type`, `hwmon-path`, `format`, ...)
    #[serde(flatten)]
    pub module: toml::Table,
}

// Default value functions
fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_tooltip() -> bool {
    true
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Returns the poll interval, at least one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval.max(1))
    }

    /// Returns the sensor module mapping.
    pub fn module_config(&self) -> ModuleConfig {
        ModuleConfig::new(self.module.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            tooltip: default_tooltip(),
            module: toml::Table::new(),
        }
    }
}
