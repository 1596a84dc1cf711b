//! Order builder defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::domain::{EnumValueError, MarketSession, OrderTerm, QuantityType};
use crate::order::BuilderDefaults;

/// Order builder configuration.
///
/// Enumerations are kept as strings so interpolated values are validated
/// with the same messages the builder uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Quantity type for legs that do not name one.
    #[serde(default = "default_quantity_type")]
    pub quantity_type: String,
    /// Order term preset on new orders.
    #[serde(default)]
    pub order_term: Option<String>,
    /// Market session preset on new orders.
    #[serde(default)]
    pub market_session: Option<String>,
    /// Quantity used for equity legs added without one.
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            quantity_type: default_quantity_type(),
            order_term: None,
            market_session: None,
            quantity: default_quantity(),
        }
    }
}

impl BuilderConfig {
    /// Validated builder defaults.
    pub fn defaults(&self) -> Result<BuilderDefaults, ConfigError> {
        let quantity_type = self.quantity_type.parse::<QuantityType>().map_err(invalid)?;
        let order_term = non_empty(self.order_term.as_deref())
            .map(str::parse::<OrderTerm>)
            .transpose()
            .map_err(invalid)?;
        let market_session = non_empty(self.market_session.as_deref())
            .map(str::parse::<MarketSession>)
            .transpose()
            .map_err(invalid)?;

        if self.quantity <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "builder.quantity must be positive, got {}",
                self.quantity
            )));
        }

        Ok(BuilderDefaults {
            quantity_type,
            order_term,
            market_session,
            quantity: self.quantity,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn invalid(err: EnumValueError) -> ConfigError {
    ConfigError::ValidationError(format!("builder: {err}"))
}

fn default_quantity_type() -> String {
    QuantityType::Quantity.as_str().to_string()
}

const fn default_quantity() -> Decimal {
    Decimal::ONE
}
