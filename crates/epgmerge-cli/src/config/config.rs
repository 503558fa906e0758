//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use epgmerge_core::FeedSource;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Feed sources in declaration order; lower priority integer wins
    /// during the merge.
    #[serde(default = "default_sources")]
    pub sources: Vec<FeedSource>,
    /// Output directory settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output directory configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory name receiving today's schedules.
    #[serde(default = "default_today_dir")]
    pub today_dir: String,
    /// Directory name receiving tomorrow's schedules.
    #[serde(default = "default_tomorrow_dir")]
    pub tomorrow_dir: String,
}

fn default_today_dir() -> String {
    String::from("today")
}

fn default_tomorrow_dir() -> String {
    String::from("tomorrow")
}

/// The stock source list used when no config file exists.
fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource {
            name: String::from("Jio TV"),
            url: String::from("https://avkb.short.gy/jioepg.xml.gz"),
            priority: 1,
        },
        FeedSource {
            name: String::from("Tata Play"),
            url: String::from("https://avkb.short.gy/tsepg.xml.gz"),
            priority: 2,
        },
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            today_dir: default_today_dir(),
            tomorrow_dir: default_tomorrow_dir(),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
