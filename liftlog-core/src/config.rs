//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/liftlog/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/liftlog/` (~/.config/liftlog/)
//! - Data: `$XDG_DATA_HOME/liftlog/` (~/.local/share/liftlog/)
//! - State/Logs: `$XDG_STATE_HOME/liftlog/` (~/.local/state/liftlog/)

use crate::error::{Error, Result};
use crate::stats::trend::TrendConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Statistics policy knobs
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Statistics policy configuration
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Minimum samples before a trend is classified
    #[serde(default = "default_trend_min_samples")]
    pub trend_min_samples: usize,

    /// Percent change beyond which a trend counts as improving/declining
    #[serde(default = "default_trend_threshold_pct")]
    pub trend_threshold_pct: f64,
}

impl AnalyticsConfig {
    /// Trend classifier configuration derived from these knobs.
    pub fn trend_config(&self) -> TrendConfig {
        TrendConfig {
            min_samples: self.trend_min_samples,
            improve_threshold_pct: self.trend_threshold_pct,
            decline_threshold_pct: -self.trend_threshold_pct,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_min_samples: default_trend_min_samples(),
            trend_threshold_pct: default_trend_threshold_pct(),
        }
    }
}

fn default_trend_min_samples() -> usize {
    6
}

fn default_trend_threshold_pct() -> f64 {
    5.0
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Path to the config file
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("liftlog/config.toml")
    }

    /// Path to the SQLite database
    pub fn database_path() -> PathBuf {
        xdg_data_home().join("liftlog/liftlog.db")
    }

    /// Directory for log files
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("liftlog")
    }

    /// Path to the current log file
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("liftlog.log")
    }
}
