//! Configuration management for taskdesk
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, NOTIFICATION_MAX_SECONDS, NOTIFICATION_MIN_SECONDS, REQUEST_TIMEOUT_MAX_SECONDS,
};
use crate::icons::IconTheme;
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend kind: "http" talks to a task server, "memory" serves a local dataset
    pub backend: String,
    /// Base URL of the task server, endpoints are appended to it
    pub base_url: String,
    /// Name of the environment variable holding an optional bearer token
    pub token_env: String,
    /// JSON dataset for the memory backend (built-in sample data when unset)
    pub dataset: Option<PathBuf>,
    /// Request timeout in seconds (0 = wait indefinitely)
    pub request_timeout_secs: u64,
}

/// Identity of the person using this session. Authors comments and uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub user_id: String,
    pub user_name: String,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Date format for start/due dates
    pub date_format: String,
    /// Format for comment and attachment timestamps
    pub datetime_format: String,
    /// Icon theme: "emoji", "unicode" or "ascii"
    pub icon_theme: IconTheme,
    /// How long notifications stay on screen
    pub notification_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write log records to a file
    pub enabled: bool,
    /// Minimum level: error, warn, info, debug or trace
    pub level: String,
    /// Log file location (defaults to the data directory)
    pub file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            base_url: "http://localhost:3000/api".to_string(),
            token_env: "TASKDESK_API_TOKEN".to_string(),
            dataset: None,
            request_timeout_secs: 0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: "1".to_string(),
            user_name: "Me".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: datetime::DATE_FORMAT.to_string(),
            datetime_format: datetime::DEFAULT_DATETIME_FORMAT.to_string(),
            icon_theme: IconTheme::default(),
            notification_seconds: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("taskdesk.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("taskdesk").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.validate_api()?;

        if self.session.user_id.trim().is_empty() {
            anyhow::bail!("session.user_id cannot be empty");
        }
        if self.session.user_name.trim().is_empty() {
            anyhow::bail!("session.user_name cannot be empty");
        }

        if !(NOTIFICATION_MIN_SECONDS..=NOTIFICATION_MAX_SECONDS).contains(&self.display.notification_seconds) {
            anyhow::bail!(
                "notification_seconds must be between {} and {}, got {}",
                NOTIFICATION_MIN_SECONDS,
                NOTIFICATION_MAX_SECONDS,
                self.display.notification_seconds
            );
        }

        // Validate date/time formats
        if let Err(e) = chrono::NaiveDate::parse_from_str("2025-01-01", &self.display.date_format) {
            anyhow::bail!("Invalid date_format '{}': {}", self.display.date_format, e);
        }
        if self.display.datetime_format.trim().is_empty() {
            anyhow::bail!("datetime_format cannot be empty");
        }

        self.logging.level_filter()?;

        Ok(())
    }

    fn validate_api(&self) -> Result<()> {
        match self.api.backend.as_str() {
            "http" => {
                let url = reqwest::Url::parse(&self.api.base_url)
                    .with_context(|| format!("Invalid api.base_url '{}'", self.api.base_url))?;
                if !matches!(url.scheme(), "http" | "https") {
                    anyhow::bail!("api.base_url must use http or https, got '{}'", url.scheme());
                }
            }
            "memory" => {}
            other => anyhow::bail!("Unsupported api.backend '{}' (expected 'http' or 'memory')", other),
        }

        if self.api.request_timeout_secs > REQUEST_TIMEOUT_MAX_SECONDS {
            anyhow::bail!(
                "request_timeout_secs cannot exceed {} seconds",
                REQUEST_TIMEOUT_MAX_SECONDS
            );
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# taskdesk configuration file\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("taskdesk"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
