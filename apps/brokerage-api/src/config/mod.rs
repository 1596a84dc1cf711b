//! Configuration for the mapping core.
//!
//! Loads a YAML document with environment variable interpolation and turns
//! it into the parser, builder and facade settings the rest of the crate
//! consumes.
//!
//! # Usage
//!
//! ```rust,ignore
//! use brokerage_api::config::load_config;
//!
//! // Load from default path (brokerage.yaml)
//! let config = load_config(None)?;
//!
//! let parser = config.temporal.parser();
//! let defaults = config.builder.defaults()?;
//! ```

mod api;
mod builder;
mod observability;
mod temporal;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use api::ApiConfig;
pub use builder::BuilderConfig;
pub use observability::{LogFormat, LoggingConfig};
pub use temporal::TemporalConfig;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "brokerage.yaml";

/// Why a mapping configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read mapping config '{path}': {source}")]
    ReadError {
        /// Path that was tried.
        path: String,
        /// IO failure.
        source: std::io::Error,
    },

    /// The document is not valid YAML for [`MappingConfig`].
    #[error("Invalid mapping config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// A value is out of range or not an accepted enumeration member.
    #[error("Invalid mapping config: {0}")]
    ValidationError(String),
}

/// Everything the mapping core reads from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Temporal parser settings.
    #[serde(default)]
    pub temporal: TemporalConfig,
    /// Order builder defaults.
    #[serde(default)]
    pub builder: BuilderConfig,
    /// API facade settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============================================
// Loading
// ============================================

/// Read, interpolate and validate a YAML file.
///
/// `None` reads [`DEFAULT_CONFIG_PATH`] from the working directory.
pub fn load_config(path: Option<&str>) -> Result<MappingConfig, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_string(),
        source,
    })?;

    let config = load_config_from_string(&contents)?;
    tracing::debug!(path, "Loaded mapping configuration");
    Ok(config)
}

/// Interpolate and validate an in-memory YAML document.
pub fn load_config_from_string(yaml: &str) -> Result<MappingConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: MappingConfig = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Expand environment references.
///
/// Accepts both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables take the default, or the empty string without one.
#[allow(clippy::expect_used)] // Regex is a compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(value)) if !value.is_empty() => value,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Reject values the parser, builder or facade would not accept.
fn validate_config(config: &MappingConfig) -> Result<(), ConfigError> {
    config.temporal.validate()?;
    config.builder.defaults()?;
    config.api.validate()?;
    config.logging.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::io::Write;

    use crate::domain::{MarketSession, OrderTerm, QuantityType};
    use crate::mapping::TemporalValue;

    #[test]
    fn test_default_config() {
        let config = MappingConfig::default();

        assert_eq!(config.api.base_path, "/v1");
        assert_eq!(config.builder.quantity_type, "QUANTITY");
        assert!(config.temporal.zone_offsets.is_empty());
        assert!(config.temporal.anchor_date.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_minimal_config() {
        let yaml = r"
api:
  base_path: /v1
";

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };
        assert_eq!(config.builder.quantity, dec!(1));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
temporal:
  zone_offsets:
    HST: -10
    AKDT: -8
  anchor_date: "2024-06-21"
builder:
  quantity_type: DOLLAR
  order_term: GOOD_FOR_DAY
  market_session: EXTENDED
  quantity: 25
api:
  base_path: /sandbox/v1/
logging:
  level: debug
  format: compact
  include_spans: false
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        let defaults = config.builder.defaults().unwrap();
        assert_eq!(defaults.quantity_type, QuantityType::Dollar);
        assert_eq!(defaults.order_term, Some(OrderTerm::GoodForDay));
        assert_eq!(defaults.market_session, Some(MarketSession::Extended));
        assert_eq!(defaults.quantity, dec!(25));
        assert_eq!(config.logging.format, LogFormat::Compact);

        let parser = config.temporal.parser();
        let anchor = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        assert_eq!(
            parser.parse(&json!("093000")),
            Some(TemporalValue::TimeOfDay(anchor.and_hms_opt(9, 30, 0).unwrap()))
        );
        let hst = parser.parse(&json!("08:00:00 HST 06-21-2024")).unwrap();
        assert_eq!(hst.as_instant().map(|i| i.to_rfc3339()), Some("2024-06-21T18:00:00+00:00".into()));
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "quantity_type: ${BROKERAGE_CONFIG_TEST_NONEXISTENT_VAR:-DOLLAR}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "quantity_type: DOLLAR");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "base_path: ${BROKERAGE_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "base_path: ");
    }

    #[test]
    fn test_interpolated_default_reaches_config() {
        let yaml = r"
builder:
  market_session: ${BROKERAGE_CONFIG_TEST_SESSION_UNSET:-REGULAR}
";
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(
            config.builder.defaults().unwrap().market_session,
            Some(MarketSession::Regular)
        );
    }

    #[test]
    fn test_validation_invalid_quantity_type() {
        let yaml = r"
builder:
  quantity_type: SHARES
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid quantity type");
        };
        let message = err.to_string();
        assert!(message.contains("quantityType"));
        assert!(message.contains("QUANTITY, DOLLAR, ALL_I_OWN"));
    }

    #[test]
    fn test_validation_zone_offset_out_of_range() {
        let yaml = r"
temporal:
  zone_offsets:
    XYZ: 20
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for out-of-range offset");
        };
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_validation_relative_base_path() {
        let yaml = r"
api:
  base_path: v1
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for relative base path");
        };
        assert!(err.to_string().contains("base_path"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "builder:\n  order_term: GOOD_UNTIL_CANCEL").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.builder.order_term.as_deref(), Some("GOOD_UNTIL_CANCEL"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_config(Some("/nonexistent/brokerage.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
