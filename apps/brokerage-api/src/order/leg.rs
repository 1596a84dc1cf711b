//! Instrument legs.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::error::OrderBuildError;
use crate::domain::{CallPut, OrderAction, QuantityType, SecurityType};
use crate::mapping::{Entity, hydrate};
use crate::schemas;

/// One leg of an order, before builder context is applied.
///
/// Unset symbol, expiry and quantity type fall back to the builder's
/// defaults when the leg is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentLeg {
    /// Underlying or equity symbol.
    pub symbol: Option<String>,
    /// Security class.
    pub security_type: SecurityType,
    /// What the leg does.
    pub order_action: OrderAction,
    /// Shares, contracts or dollars.
    pub quantity: Decimal,
    /// Unit of `quantity`.
    pub quantity_type: Option<QuantityType>,
    /// Option right.
    pub call_put: Option<CallPut>,
    /// Option strike.
    pub strike_price: Option<Decimal>,
    /// Option expiry.
    pub expiry: Option<NaiveDate>,
}

impl InstrumentLeg {
    /// Equity leg.
    #[must_use]
    pub const fn equity(order_action: OrderAction, quantity: Decimal) -> Self {
        Self::security(SecurityType::Equity, order_action, quantity)
    }

    /// Leg of any security type, with no option terms.
    #[must_use]
    pub const fn security(
        security_type: SecurityType,
        order_action: OrderAction,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: None,
            security_type,
            order_action,
            quantity,
            quantity_type: None,
            call_put: None,
            strike_price: None,
            expiry: None,
        }
    }

    /// Option leg.
    #[must_use]
    pub const fn option(
        order_action: OrderAction,
        call_put: CallPut,
        strike_price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: None,
            security_type: SecurityType::Option,
            order_action,
            quantity,
            quantity_type: None,
            call_put: Some(call_put),
            strike_price: Some(strike_price),
            expiry: None,
        }
    }

    /// Set the symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set the quantity type.
    #[must_use]
    pub const fn with_quantity_type(mut self, quantity_type: QuantityType) -> Self {
        self.quantity_type = Some(quantity_type);
        self
    }

    /// Set the option expiry.
    #[must_use]
    pub const fn with_expiry(mut self, expiry: NaiveDate) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Read a leg from a wire-shaped map.
    ///
    /// Product fields may sit under `Product` or directly on the leg.
    /// `orderAction` is required; `securityType` defaults to `EQ`.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, OrderBuildError> {
        let raw = Value::Object(map.clone());
        let leg = hydrate(schemas::instrument(), &raw);
        let product = match leg.entity("product") {
            Some(product) => product.clone(),
            None => hydrate(schemas::product(), &raw),
        };

        let order_action = match leg.str("orderAction") {
            Some(action) if !action.is_empty() => action.parse::<OrderAction>()?,
            _ => return Err(OrderBuildError::MissingField("orderAction")),
        };
        let security_type = match product.str("securityType") {
            Some(kind) if !kind.is_empty() => kind.parse::<SecurityType>()?,
            _ => SecurityType::Equity,
        };
        let quantity_type = match leg.str("quantityType") {
            Some(kind) if !kind.is_empty() => Some(kind.parse::<QuantityType>()?),
            _ => None,
        };
        let call_put = match product.str("callPut") {
            Some(right) if !right.is_empty() => Some(right.parse::<CallPut>()?),
            _ => None,
        };
        let expiry = expiry_from_product(&product)?;

        Ok(Self {
            symbol: product
                .str("symbol")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            security_type,
            order_action,
            quantity: leg.decimal("quantity").unwrap_or_default(),
            quantity_type,
            call_put,
            strike_price: product.decimal("strikePrice"),
            expiry,
        })
    }
}

fn expiry_from_product(product: &Entity) -> Result<Option<NaiveDate>, OrderBuildError> {
    let (Some(year), Some(month), Some(day)) = (
        product.int("expiryYear"),
        product.int("expiryMonth"),
        product.int("expiryDay"),
    ) else {
        return Ok(None);
    };
    let invalid = OrderBuildError::InvalidDate {
        field: "expiry",
        year,
        month,
        day,
    };
    let (Ok(y), Ok(m), Ok(d)) = (i32::try_from(year), u32::try_from(month), u32::try_from(day))
    else {
        return Err(invalid);
    };
    NaiveDate::from_ymd_opt(y, m, d).map(Some).ok_or(invalid)
}

/// A leg as accepted by `add_instrument`: typed, or an equivalent map.
#[derive(Debug, Clone, PartialEq)]
pub enum LegInput {
    /// Typed leg.
    Typed(InstrumentLeg),
    /// Wire-shaped map.
    Map(Map<String, Value>),
}

impl LegInput {
    pub(crate) fn into_leg(self) -> Result<InstrumentLeg, OrderBuildError> {
        match self {
            Self::Typed(leg) => Ok(leg),
            Self::Map(map) => InstrumentLeg::from_map(&map),
        }
    }
}

impl From<InstrumentLeg> for LegInput {
    fn from(leg: InstrumentLeg) -> Self {
        Self::Typed(leg)
    }
}

impl From<Map<String, Value>> for LegInput {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

/// Leg with builder context applied and every constraint checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedLeg {
    pub symbol: String,
    pub security_type: SecurityType,
    pub order_action: OrderAction,
    pub quantity: Decimal,
    pub quantity_type: QuantityType,
    pub option: Option<OptionTerms>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OptionTerms {
    pub call_put: CallPut,
    pub strike_price: Decimal,
    pub expiry: NaiveDate,
}

impl ResolvedLeg {
    /// `{Product: {...}, orderAction, quantityType, quantity}` entity.
    pub fn to_entity(&self) -> Entity {
        let mut product = Entity::new(schemas::product());
        product.set("symbol", self.symbol.as_str());
        product.set("securityType", self.security_type.as_str());
        if let Some(terms) = self.option {
            product.set("callPut", terms.call_put.as_str());
            product.set("expiryYear", i64::from(terms.expiry.year()));
            product.set("expiryMonth", terms.expiry.month());
            product.set("expiryDay", terms.expiry.day());
            product.set("strikePrice", terms.strike_price);
        }

        let mut leg = Entity::new(schemas::instrument());
        leg.set("product", product);
        leg.set("orderAction", self.order_action.as_str());
        leg.set("quantityType", self.quantity_type.as_str());
        leg.set("quantity", self.quantity);
        leg
    }
}
