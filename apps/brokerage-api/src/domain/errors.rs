//! Domain errors.

use thiserror::Error;

/// A string did not match any member of a fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field} '{value}'; allowed values: {allowed}")]
pub struct EnumValueError {
    /// Field being validated (e.g. "orderType").
    pub field: &'static str,
    /// Rejected input.
    pub value: String,
    /// Comma-separated list of accepted values.
    pub allowed: String,
}

impl EnumValueError {
    /// Create a new error.
    #[must_use]
    pub fn new(field: &'static str, value: impl Into<String>, allowed: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            allowed: allowed.into(),
        }
    }
}
