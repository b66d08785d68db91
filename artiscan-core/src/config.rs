//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/artiscan/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/artiscan/` (~/.config/artiscan/)
//! - State/Logs: `$XDG_STATE_HOME/artiscan/` (~/.local/state/artiscan/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

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

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Report output configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Where reports go and which template renders them
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ReportConfig {
    /// Directory reports are written into (default: current directory)
    pub output_dir: Option<PathBuf>,

    /// Directory holding a replacement `report.html` template
    pub template_dir: Option<PathBuf>,
}

impl ReportConfig {
    /// Resolved output directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.template_dir {
            if !dir.is_dir() {
                return Err(Error::Config(format!(
                    "report.template_dir {:?} is not a directory",
                    dir
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/artiscan/config.toml` (~/.config/artiscan/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("artiscan").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/artiscan/` (~/.local/state/artiscan/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("artiscan")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/artiscan/artiscan.log` (~/.local/state/artiscan/artiscan.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("artiscan.log")
    }
}
