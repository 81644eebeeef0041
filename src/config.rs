//! Serde-backed engine settings.
//!
//! Covers the knobs the session needs at runtime: the detector's input size
//! (drives the fixed ROI mode and the full-image shortcut) and log
//! verbosity. Hosts load/save the file themselves; a missing file simply
//! yields defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::LabelError;
use crate::model::Size;

/// Current settings file format version.
pub const CONFIG_VERSION: u32 = 1;

/// Log level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// All log levels in order from least to most verbose.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to the log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Engine settings, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Version of the settings file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Detector input size; enables the fixed ROI mode and the
    /// full-image ROI shortcut when set
    #[serde(default)]
    pub model_input_size: Option<Size>,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            model_input_size: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, LabelError> {
        if !path.exists() {
            log::info!("no settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        if settings.version != CONFIG_VERSION {
            log::warn!(
                "settings version {} differs from current {}",
                settings.version,
                CONFIG_VERSION
            );
        }
        Ok(settings)
    }

    /// Save settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), LabelError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("settings saved to {:?}", path);
        Ok(())
    }
}
