//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Get default config file path
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wayfinder")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format used when `--format` is absent
    pub default_format: String,
    /// Always print search statistics
    pub show_stats: bool,
    /// Treat graph edges as undirected
    pub undirected: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: "table".to_string(),
            show_stats: false,
            undirected: false,
        }
    }
}

impl Config {
    /// Load config from `path`, using defaults if it is missing or unreadable
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Cannot read config {}: {}", path.display(), e);
                return Self::default();
            }
        };

        toml::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Write config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Known config keys
    pub fn keys() -> &'static [&'static str] {
        &["default_format", "show_stats", "undirected"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_format" => Some(self.default_format.clone()),
            "show_stats" => Some(self.show_stats.to_string()),
            "undirected" => Some(self.undirected.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "default_format" => {
                let format = value.to_lowercase();
                if !["table", "json", "csv"].contains(&format.as_str()) {
                    anyhow::bail!("Invalid format '{}': expected table, json or csv", value);
                }
                self.default_format = format;
            }
            "show_stats" => self.show_stats = parse_bool(key, value)?,
            "undirected" => self.undirected = parse_bool(key, value)?,
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid value for {}: '{}' (expected true or false)", key, value),
    }
}
