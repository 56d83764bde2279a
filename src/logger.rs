//! Application logging.
//!
//! Code logs through the `log` macros. [`Logger::install`] wires a `fern` dispatch that
//! copies every record into an in-memory buffer (shown by the logs dialog) and, when
//! logging is enabled in the configuration, appends it to a log file.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Oldest entries are dropped past this many buffered lines
const MAX_BUFFERED_LOGS: usize = 2000;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            log_file: None,
        }
    }

    /// Build a logger from configuration. File output is only set up when enabled.
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let log_file = if config.enabled {
            match &config.file {
                Some(path) => Some(path.clone()),
                None => Some(Self::default_log_file_path()?),
            }
        } else {
            None
        };

        Ok(Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            log_file,
        })
    }

    /// Whether records are also written to a file
    pub fn is_enabled(&self) -> bool {
        self.log_file.is_some()
    }

    pub fn log_file_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Default log file location: `<data dir>/taskdesk/taskdesk.log`
    pub fn default_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("taskdesk").join("taskdesk.log"))
    }

    /// Install this logger as the global `log` backend. Can only succeed once per process.
    pub fn install(&self, level: LevelFilter) -> Result<()> {
        let buffer = self.clone();
        let mut dispatch = fern::Dispatch::new()
            .level(level)
            .level_for("hyper", LevelFilter::Warn)
            .level_for("hyper_util", LevelFilter::Warn)
            .level_for("reqwest", LevelFilter::Warn)
            .level_for("rustls", LevelFilter::Warn)
            .chain(
                fern::Dispatch::new()
                    .format(|out, message, record| out.finish(format_args!("{:<5} {}", record.level(), message)))
                    .chain(fern::Output::call(move |record| buffer.log(record.args().to_string()))),
            );

        if let Some(path) = &self.log_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {:<5} {}] {}",
                            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }

        dispatch.apply().context("A global logger is already installed")?;
        Ok(())
    }

    /// Add a log entry to the in-memory buffer
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message);
            if logs.len() > MAX_BUFFERED_LOGS {
                let excess = logs.len() - MAX_BUFFERED_LOGS;
                logs.drain(..excess);
            }
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
