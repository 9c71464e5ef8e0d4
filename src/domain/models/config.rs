//! Configuration model with serde defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the client core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Edit history settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Debounce delays for the editing surface.
    #[serde(default)]
    pub debounce: DebounceConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Edit history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum retained history entries; oldest are evicted first.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

fn default_history_capacity() -> usize {
    50
}

/// Debounce delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period before an edit becomes a history entry.
    #[serde(default = "default_commit_ms")]
    pub commit_ms: u64,

    /// Quiet period before the cost oracle is queried.
    #[serde(default = "default_cost_estimate_ms")]
    pub cost_estimate_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            commit_ms: default_commit_ms(),
            cost_estimate_ms: default_cost_estimate_ms(),
        }
    }
}

fn default_commit_ms() -> u64 {
    800
}

fn default_cost_estimate_ms() -> u64 {
    500
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
