//! Logging configuration.

use serde::{Deserialize, Serialize};

use super::ConfigError;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default single-line format.
    #[default]
    Full,
    /// Shorter single-line format.
    Compact,
    /// Multi-line, human-oriented format.
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Emit an event when each span closes.
    #[serde(default)]
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            include_spans: false,
        }
    }
}

impl LoggingConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of: {LEVELS:?}"
            )));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
