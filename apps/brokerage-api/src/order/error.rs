//! Order construction errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::EnumValueError;

/// Validation failure raised while assembling an order request.
///
/// Every variant names the offending field and the constraint it broke. No
/// request is produced once one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderBuildError {
    /// Value outside a fixed enumeration.
    #[error("Invalid {field} '{value}'; allowed values: {allowed}")]
    InvalidEnum {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: String,
        /// Accepted values, comma separated.
        allowed: String,
    },

    /// Year/month/day that is not a real calendar date.
    #[error("Invalid {field}: {year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate {
        /// Field name.
        field: &'static str,
        /// Year as given.
        year: i64,
        /// Month as given.
        month: i64,
        /// Day as given.
        day: i64,
    },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: Decimal,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: Decimal,
    },

    /// Required context was never set.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Option leg added with no expiry on the leg or the builder.
    #[error("Option expiry is not set; call with_expiry(year, month, day) before adding option legs")]
    MissingExpiry,

    /// Leg added with no symbol on the leg or the builder.
    #[error("Symbol is not set; call with_symbol(symbol) or set one on the leg")]
    MissingSymbol,

    /// Build attempted with no instrument legs.
    #[error("At least one instrument leg is required")]
    NoLegs,

    /// Place request attempted with no preview ids.
    #[error("at least one preview id required")]
    NoPreviewIds,

    /// Preview id that is not a positive integer.
    #[error("Invalid preview id '{0}'; expected a positive integer")]
    InvalidPreviewId(String),
}

impl From<EnumValueError> for OrderBuildError {
    fn from(err: EnumValueError) -> Self {
        Self::InvalidEnum {
            field: err.field,
            value: err.value,
            allowed: err.allowed,
        }
    }
}
