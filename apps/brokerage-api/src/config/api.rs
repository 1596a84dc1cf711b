//! API facade configuration.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::application::DEFAULT_BASE_PATH;

/// API facade configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Path prefix of every endpoint (e.g. `/v1`).
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

impl ApiConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "api.base_path must start with '/', got '{}'",
                self.base_path
            )));
        }
        Ok(())
    }
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}
