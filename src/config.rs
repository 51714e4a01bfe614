//! Configuration management for deck-drawer
//!
//! Config file location:
//! - Linux: ~/.config/deck-drawer/config.toml
//! - macOS: ~/Library/Application Support/deck-drawer/config.toml
//! - Windows: %APPDATA%/deck-drawer/config.toml
//!
//! You can override the config location by setting `DECK_DRAWER_CONFIG_PATH`.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Lower bound for the auto-draw period; anything faster just hammers the service.
pub const MIN_DRAW_INTERVAL_MS: u64 = 50;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Deck service endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Auto-draw behavior
    #[serde(default)]
    pub draw: DrawConfig,
}

impl Config {
    /// Load configuration from file or fall back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path; a missing file yields defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to an explicit path
    #[allow(dead_code)]
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, toml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("DECK_DRAWER_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = project_dirs()?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Directory used for the TUI log file.
    pub fn data_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "deckdrawer", "deck-drawer")
        .context("Could not determine project directories")
}

/// Deck service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the deck endpoints (`{base}/new/shuffle/`, `{base}/{id}/draw/`)
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Whether to verify SSL certificates
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_seconds: default_timeout(),
            verify_ssl: default_true(),
        }
    }
}

impl ApiConfig {
    /// Apply `DECK_DRAWER_API_URL` / `DECK_DRAWER_API_TIMEOUT_SECONDS` on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = std::env::var("DECK_DRAWER_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
        {
            self.base_url = url;
        }

        if let Some(timeout) = std::env::var("DECK_DRAWER_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
        {
            self.timeout_seconds = timeout;
        }

        self
    }
}

fn default_api_url() -> String {
    "https://deckofcardsapi.com/api/deck".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

/// Auto-draw configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Period of the auto-draw timer in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl DrawConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_DRAW_INTERVAL_MS))
    }
}

fn default_interval_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://deckofcardsapi.com/api/deck");
        assert_eq!(config.api.timeout_seconds, 10);
        assert!(config.api.verify_ssl);
        assert_eq!(config.draw.interval_ms, 1000);
        assert_eq!(config.draw.interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();

        assert!(toml.contains("base_url"));
        assert!(toml.contains("timeout_seconds"));
        assert!(toml.contains("[draw]"));
        assert!(toml.contains("interval_ms"));
    }

    #[test]
    fn test_interval_is_clamped() {
        let draw = DrawConfig { interval_ms: 1 };
        assert_eq!(draw.interval(), Duration::from_millis(MIN_DRAW_INTERVAL_MS));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[draw]\ninterval_ms = 250\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.draw.interval_ms, 250);
        assert_eq!(config.api.base_url, default_api_url());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "http://127.0.0.1:9999/api/deck".to_string();
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.api.base_url, "http://127.0.0.1:9999/api/deck");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.draw.interval_ms, 1000);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[draw\ninterval_ms = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
