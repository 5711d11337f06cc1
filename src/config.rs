//! Configuration loading and management
//!
//! Handles parsing of `.tend.toml` configuration files from the data
//! directory. Every field has a default so a missing or partial file
//! always yields a usable config.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// History (undo/redo) configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Activity ledger configuration
    #[serde(default)]
    pub stats: StatsConfig,

    /// Focus session configuration
    #[serde(default)]
    pub focus: FocusConfig,

    /// Due-task scan configuration
    #[serde(default)]
    pub due: DueConfig,

    /// Recent-locations configuration
    #[serde(default)]
    pub locations: LocationsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            stats: StatsConfig::default(),
            focus: FocusConfig::default(),
            due: DueConfig::default(),
            locations: LocationsConfig::default(),
        }
    }
}

impl Config {
    /// Load config from `<dir>/.tend.toml`, falling back to defaults when
    /// the file is missing or unreadable. A present-but-invalid file is
    /// also a defaults fallback; startup never aborts on config.
    pub fn load_from_dir(dir: &Path) -> Self {
        let path = dir.join(".tend.toml");
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "invalid config, using defaults");
                Self::default()
            }
        }
    }
}

/// Undo/redo history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of retained snapshots
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

fn default_history_capacity() -> usize {
    50
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

/// Activity ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Length of the trailing per-day window, in days
    #[serde(default = "default_window_days")]
    pub window_days: usize,
}

fn default_window_days() -> usize {
    84
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

/// Focus session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Default work duration in minutes
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,

    /// Short break duration in minutes
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,

    /// Long break duration in minutes
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,

    /// Every Nth completed work session earns a long break
    #[serde(default = "default_long_break_every")]
    pub long_break_every: u32,
}

fn default_work_minutes() -> u32 {
    25
}

fn default_short_break_minutes() -> u32 {
    5
}

fn default_long_break_minutes() -> u32 {
    15
}

fn default_long_break_every() -> u32 {
    4
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_every: default_long_break_every(),
        }
    }
}

/// Due-task scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueConfig {
    /// Poll interval for `due --watch`, in seconds
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,

    /// A task is due when its due instant is within this many seconds of now
    #[serde(default = "default_window_secs")]
    pub window_secs: i64,
}

fn default_poll_secs() -> u64 {
    30
}

fn default_window_secs() -> i64 {
    60
}

impl Default for DueConfig {
    fn default() -> Self {
        Self {
            poll_secs: default_poll_secs(),
            window_secs: default_window_secs(),
        }
    }
}

/// Recent-locations configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsConfig {
    /// Maximum number of remembered locations
    #[serde(default = "default_locations_cap")]
    pub capacity: usize,
}

fn default_locations_cap() -> usize {
    10
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            capacity: default_locations_cap(),
        }
    }
}
