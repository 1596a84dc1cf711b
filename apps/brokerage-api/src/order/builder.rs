//! Fluent, validating assembler for preview and place order requests.
//!
//! The builder accumulates context (account, order type, default symbol and
//! expiry), detail fields and legs. Every setter validates its input and
//! fails fast; the two build operations take `&self`, so the same builder
//! yields a preview request and later the matching place request.
//!
//! A builder is a plain single-owner value. It is not meant to be shared
//! between threads while being mutated.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::OrderBuildError;
use super::leg::{InstrumentLeg, LegInput, OptionTerms, ResolvedLeg};
use super::preview_id::{PreviewId, PreviewIdInput};
use crate::domain::{
    CallPut, MarketSession, OrderAction, OrderTerm, OrderType, PriceType, QuantityType,
    SecurityType,
};
use crate::mapping::{Entity, EntitySchema, FieldValue, serialize};
use crate::schemas;

const STOP_PRICE: &str = "stopPrice";

/// Context every new builder starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderDefaults {
    /// Quantity type for legs that do not name one.
    pub quantity_type: QuantityType,
    /// Order term preset on the order detail.
    pub order_term: Option<OrderTerm>,
    /// Market session preset on the order detail.
    pub market_session: Option<MarketSession>,
    /// Quantity used by `add_equity`.
    pub quantity: Decimal,
}

impl Default for BuilderDefaults {
    fn default() -> Self {
        Self {
            quantity_type: QuantityType::Quantity,
            order_term: None,
            market_session: None,
            quantity: Decimal::ONE,
        }
    }
}

/// Builder for preview/place order requests.
#[derive(Debug, Clone)]
pub struct OrderRequestBuilder {
    account_id_key: String,
    order_type: Option<OrderType>,
    client_order_id: Option<String>,
    order_id: Option<i64>,
    symbol: Option<String>,
    expiry: Option<NaiveDate>,
    quantity_type: QuantityType,
    quantity: Decimal,
    detail: Entity,
    legs: Vec<ResolvedLeg>,
}

impl OrderRequestBuilder {
    /// Start an order for the account identified by `account_id_key`.
    #[must_use]
    pub fn for_account(account_id_key: impl Into<String>) -> Self {
        Self::with_defaults(account_id_key, &BuilderDefaults::default())
    }

    /// Start an order with explicit defaults.
    #[must_use]
    pub fn with_defaults(account_id_key: impl Into<String>, defaults: &BuilderDefaults) -> Self {
        let mut detail = Entity::new(schemas::order_detail());
        if let Some(term) = defaults.order_term {
            detail.set("orderTerm", term.as_str());
        }
        if let Some(session) = defaults.market_session {
            detail.set("marketSession", session.as_str());
        }

        Self {
            account_id_key: account_id_key.into(),
            order_type: None,
            client_order_id: None,
            order_id: None,
            symbol: None,
            expiry: None,
            quantity_type: defaults.quantity_type,
            quantity: defaults.quantity,
            detail,
            legs: Vec::new(),
        }
    }

    /// Account key the order is for.
    #[must_use]
    pub fn account_id_key(&self) -> &str {
        &self.account_id_key
    }

    /// Existing order id, for change flows.
    #[must_use]
    pub const fn existing_order_id(&self) -> Option<i64> {
        self.order_id
    }

    /// Number of legs added so far.
    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    // =========================================================================
    // Identity and context
    // =========================================================================

    /// Set the order type.
    pub fn order_type(mut self, order_type: impl AsRef<str>) -> Result<Self, OrderBuildError> {
        self.order_type = Some(order_type.as_ref().parse::<OrderType>()?);
        Ok(self)
    }

    /// Set the caller-chosen client order id.
    #[must_use]
    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// Set the existing order id, for change (modify) flows.
    pub fn order_id(mut self, id: i64) -> Result<Self, OrderBuildError> {
        if id <= 0 {
            return Err(OrderBuildError::NotPositive {
                field: "orderId",
                value: Decimal::from(id),
            });
        }
        self.order_id = Some(id);
        Ok(self)
    }

    /// Default symbol for legs that do not name one.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Default option expiry. Must be a real calendar date.
    pub fn with_expiry(self, year: i32, month: u32, day: u32) -> Result<Self, OrderBuildError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(OrderBuildError::InvalidDate {
            field: "expiry",
            year: i64::from(year),
            month: i64::from(month),
            day: i64::from(day),
        })?;
        Ok(self.with_expiry_date(date))
    }

    /// Default option expiry.
    #[must_use]
    pub const fn with_expiry_date(mut self, expiry: NaiveDate) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Default quantity type for legs that do not name one.
    pub fn quantity_type(mut self, quantity_type: impl AsRef<str>) -> Result<Self, OrderBuildError> {
        self.quantity_type = quantity_type.as_ref().parse::<QuantityType>()?;
        Ok(self)
    }

    /// Quantity used by `add_equity`.
    pub fn with_quantity(mut self, quantity: impl Into<Decimal>) -> Result<Self, OrderBuildError> {
        self.quantity = ensure_positive("quantity", quantity.into())?;
        Ok(self)
    }

    // =========================================================================
    // Pricing and term
    // =========================================================================

    /// Set the order term.
    pub fn order_term(self, term: impl AsRef<str>) -> Result<Self, OrderBuildError> {
        let term = term.as_ref().parse::<OrderTerm>()?;
        Ok(self.set_detail("orderTerm", term.as_str()))
    }

    /// Good until cancelled.
    #[must_use]
    pub fn gtc(self) -> Self {
        self.set_detail("orderTerm", OrderTerm::GoodUntilCancel.as_str())
    }

    /// Good for the day.
    #[must_use]
    pub fn gfd(self) -> Self {
        self.set_detail("orderTerm", OrderTerm::GoodForDay.as_str())
    }

    /// Set the price type.
    pub fn price_type(self, price_type: impl AsRef<str>) -> Result<Self, OrderBuildError> {
        let price_type = price_type.as_ref().parse::<PriceType>()?;
        Ok(self.set_detail("priceType", price_type.as_str()))
    }

    /// Market order.
    #[must_use]
    pub fn market(self) -> Self {
        self.set_detail("priceType", PriceType::Market.as_str())
    }

    /// Limit order at `price`.
    pub fn limit(self, price: impl Into<Decimal>) -> Result<Self, OrderBuildError> {
        self.set_detail("priceType", PriceType::Limit.as_str())
            .limit_price(price)
    }

    /// Stop order triggering at `price`.
    pub fn stop(self, price: impl Into<Decimal>) -> Result<Self, OrderBuildError> {
        self.set_detail("priceType", PriceType::Stop.as_str())
            .stop_price(price)
    }

    /// Stop-limit order: `stopPrice` triggers, `stopLimitPrice` bounds the fill.
    pub fn stop_limit(
        self,
        stop: impl Into<Decimal>,
        limit: impl Into<Decimal>,
    ) -> Result<Self, OrderBuildError> {
        self.set_detail("priceType", PriceType::StopLimit.as_str())
            .stop_price(stop)?
            .stop_limit_price(limit)
    }

    /// Multi-leg order paying at most `price`.
    pub fn net_debit(self, price: impl Into<Decimal>) -> Result<Self, OrderBuildError> {
        self.set_detail("priceType", PriceType::NetDebit.as_str())
            .limit_price(price)
    }

    /// Multi-leg order receiving at least `price`.
    pub fn net_credit(self, price: impl Into<Decimal>) -> Result<Self, OrderBuildError> {
        self.set_detail("priceType", PriceType::NetCredit.as_str())
            .limit_price(price)
    }

    /// Multi-leg order at even money.
    #[must_use]
    pub fn net_even(self) -> Self {
        self.set_detail("priceType", PriceType::NetEven.as_str())
    }

    /// Limit price. Must not be negative.
    pub fn limit_price(self, price: impl Into<Decimal>) -> Result<Self, OrderBuildError> {
        let price = ensure_non_negative("limitPrice", price.into())?;
        Ok(self.set_detail("limitPrice", price))
    }

    /// Stop price. Must be positive.
    pub fn stop_price(self, price: impl Into<Decimal>) -> Result<Self, OrderBuildError> {
        let price = ensure_positive(STOP_PRICE, price.into())?;
        Ok(self.set_detail(STOP_PRICE, price))
    }

    /// Stop-limit price. Must be positive.
    pub fn stop_limit_price(self, price: impl Into<Decimal>) -> Result<Self, OrderBuildError> {
        let price = ensure_positive("stopLimitPrice", price.into())?;
        Ok(self.set_detail("stopLimitPrice", price))
    }

    /// Send an explicit empty stop price, which clears it on a changed order.
    #[must_use]
    pub fn clear_stop_price(self) -> Self {
        self.set_detail(STOP_PRICE, "")
    }

    /// Set the market session.
    pub fn market_session(self, session: impl AsRef<str>) -> Result<Self, OrderBuildError> {
        let session = session.as_ref().parse::<MarketSession>()?;
        Ok(self.set_detail("marketSession", session.as_str()))
    }

    /// All-or-none flag.
    #[must_use]
    pub fn all_or_none(self, all_or_none: bool) -> Self {
        self.set_detail("allOrNone", all_or_none)
    }

    /// Set any order detail field that has no dedicated method.
    ///
    /// `null` unsets the field, except for `stopPrice`, where an explicit
    /// null is sent as an empty string.
    #[must_use]
    pub fn detail(mut self, name: &str, value: impl Into<Value>) -> Self {
        match sanitize_detail(name, value.into()) {
            Some(value) => self.detail.set(name, value),
            None => {
                self.detail.remove(name);
            }
        }
        self
    }

    fn set_detail(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.detail.set(name, value);
        self
    }

    // =========================================================================
    // Legs
    // =========================================================================

    /// Add a leg, typed or as a wire-shaped map.
    ///
    /// Symbol, expiry and quantity type fall back to the builder's context
    /// when the leg leaves them unset.
    pub fn add_instrument(mut self, leg: impl Into<LegInput>) -> Result<Self, OrderBuildError> {
        let resolved = self.resolve_leg(leg.into().into_leg()?)?;
        self.legs.push(resolved);
        Ok(self)
    }

    /// Option leg on the default symbol and expiry.
    pub fn add_option(
        self,
        order_action: impl AsRef<str>,
        call_put: impl AsRef<str>,
        strike_price: impl Into<Decimal>,
        quantity: impl Into<Decimal>,
    ) -> Result<Self, OrderBuildError> {
        let order_action = order_action.as_ref().parse::<OrderAction>()?;
        let call_put = call_put.as_ref().parse::<CallPut>()?;
        self.add_instrument(InstrumentLeg::option(
            order_action,
            call_put,
            strike_price.into(),
            quantity.into(),
        ))
    }

    /// Buy-to-open call.
    pub fn add_long_call(
        self,
        strike_price: impl Into<Decimal>,
        quantity: impl Into<Decimal>,
    ) -> Result<Self, OrderBuildError> {
        self.add_option(OrderAction::BuyOpen, CallPut::Call, strike_price, quantity)
    }

    /// Sell-to-open call.
    pub fn add_short_call(
        self,
        strike_price: impl Into<Decimal>,
        quantity: impl Into<Decimal>,
    ) -> Result<Self, OrderBuildError> {
        self.add_option(OrderAction::SellOpen, CallPut::Call, strike_price, quantity)
    }

    /// Buy-to-open put.
    pub fn add_long_put(
        self,
        strike_price: impl Into<Decimal>,
        quantity: impl Into<Decimal>,
    ) -> Result<Self, OrderBuildError> {
        self.add_option(OrderAction::BuyOpen, CallPut::Put, strike_price, quantity)
    }

    /// Sell-to-open put.
    pub fn add_short_put(
        self,
        strike_price: impl Into<Decimal>,
        quantity: impl Into<Decimal>,
    ) -> Result<Self, OrderBuildError> {
        self.add_option(OrderAction::SellOpen, CallPut::Put, strike_price, quantity)
    }

    /// Equity leg on the default symbol with the default quantity.
    pub fn add_equity(self, order_action: impl AsRef<str>) -> Result<Self, OrderBuildError> {
        let order_action = order_action.as_ref().parse::<OrderAction>()?;
        let quantity = self.quantity;
        self.add_instrument(InstrumentLeg::equity(order_action, quantity))
    }

    /// Leg of any security type on the default symbol.
    pub fn add_security(
        self,
        security_type: impl AsRef<str>,
        order_action: impl AsRef<str>,
        quantity: impl Into<Decimal>,
    ) -> Result<Self, OrderBuildError> {
        let security_type = security_type.as_ref().parse::<SecurityType>()?;
        let order_action = order_action.as_ref().parse::<OrderAction>()?;
        self.add_instrument(InstrumentLeg::security(
            security_type,
            order_action,
            quantity.into(),
        ))
    }

    fn resolve_leg(&self, leg: InstrumentLeg) -> Result<ResolvedLeg, OrderBuildError> {
        let option = if leg.security_type == SecurityType::Option {
            let expiry = leg.expiry.or(self.expiry).ok_or(OrderBuildError::MissingExpiry)?;
            let call_put = leg.call_put.ok_or(OrderBuildError::MissingField("callPut"))?;
            let strike_price = leg
                .strike_price
                .ok_or(OrderBuildError::MissingField("strikePrice"))?;
            Some(OptionTerms {
                call_put,
                strike_price: ensure_positive("strikePrice", strike_price)?,
                expiry,
            })
        } else {
            None
        };

        let symbol = leg
            .symbol
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.symbol.clone().filter(|s| !s.trim().is_empty()))
            .ok_or(OrderBuildError::MissingSymbol)?;

        Ok(ResolvedLeg {
            symbol,
            security_type: leg.security_type,
            order_action: leg.order_action,
            quantity: ensure_positive("quantity", leg.quantity)?,
            quantity_type: leg.quantity_type.unwrap_or(self.quantity_type),
            option,
        })
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Assemble `{"PreviewOrderRequest": {...}}`.
    pub fn build_preview_request(&self) -> Result<Map<String, Value>, OrderBuildError> {
        let schema = schemas::preview_order_request();
        let request = self.request_entity(schema)?;
        Ok(self.finish(schema, &request))
    }

    /// Assemble `{"PlaceOrderRequest": {...}}` for previously previewed ids.
    ///
    /// Each id may be a [`PreviewId`], a number or digit string, or a map
    /// with a `previewId` key.
    pub fn build_place_request<I>(&self, preview_ids: I) -> Result<Map<String, Value>, OrderBuildError>
    where
        I: IntoIterator,
        I::Item: Into<PreviewIdInput>,
    {
        let schema = schemas::place_order_request();
        let mut request = self.request_entity(schema)?;

        let ids = preview_ids
            .into_iter()
            .map(|id| id.into().resolve())
            .collect::<Result<Vec<PreviewId>, _>>()?;
        if ids.is_empty() {
            return Err(OrderBuildError::NoPreviewIds);
        }
        request.set(
            "previewIds",
            ids.into_iter().map(PreviewId::to_entity).collect::<Vec<_>>(),
        );

        Ok(self.finish(schema, &request))
    }

    fn request_entity(&self, schema: &'static EntitySchema) -> Result<Entity, OrderBuildError> {
        if self.account_id_key.trim().is_empty() {
            return Err(OrderBuildError::MissingField("accountIdKey"));
        }
        let order_type = self
            .order_type
            .ok_or(OrderBuildError::MissingField("orderType"))?;
        let client_order_id = self
            .client_order_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(OrderBuildError::MissingField("clientOrderId"))?;
        if self.legs.is_empty() {
            return Err(OrderBuildError::NoLegs);
        }

        let mut detail = self.detail.clone();
        detail.set(
            "instrument",
            self.legs.iter().map(ResolvedLeg::to_entity).collect::<Vec<_>>(),
        );

        let mut request = Entity::new(schema);
        request.set("orderType", order_type.as_str());
        request.set("clientOrderId", client_order_id);
        if let Some(order_id) = self.order_id {
            request.set("orderId", order_id);
        }
        request.set("order", vec![detail]);
        Ok(request)
    }

    fn finish(&self, schema: &'static EntitySchema, request: &Entity) -> Map<String, Value> {
        debug!(
            request = schema.name(),
            account_id_key = %self.account_id_key,
            order_type = ?self.order_type,
            legs = self.legs.len(),
            "Built order request"
        );

        let mut wrapped = Map::new();
        wrapped.insert(schema.name().to_string(), Value::Object(serialize(request)));
        wrapped
    }
}

/// Explicit null unsets a detail field; for `stopPrice` it means "clear".
fn sanitize_detail(name: &str, value: Value) -> Option<FieldValue> {
    match value {
        Value::Null if name == STOP_PRICE => Some(FieldValue::String(String::new())),
        Value::Null => None,
        other => Some(FieldValue::from_raw(&other)),
    }
}

fn ensure_positive(field: &'static str, value: Decimal) -> Result<Decimal, OrderBuildError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(OrderBuildError::NotPositive { field, value })
    }
}

fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<Decimal, OrderBuildError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(OrderBuildError::Negative { field, value })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn equity_builder() -> OrderRequestBuilder {
        OrderRequestBuilder::for_account("dBZOKt9xDrtRSAOl4MSiiA")
            .order_type("EQ")
            .unwrap()
            .client_order_id("C1")
            .with_symbol("FB")
            .market()
            .add_equity("BUY")
            .unwrap()
    }

    fn order_detail(request: &Map<String, Value>, root: &str) -> Value {
        request[root]["Order"][0].clone()
    }

    #[test]
    fn limit_equity_preview() {
        let request = OrderRequestBuilder::for_account("ACC")
            .order_type("EQ")
            .unwrap()
            .client_order_id("C")
            .with_symbol("FB")
            .quantity_type("QUANTITY")
            .unwrap()
            .gfd()
            .price_type("LIMIT")
            .unwrap()
            .limit_price(169)
            .unwrap()
            .market_session("REGULAR")
            .unwrap()
            .all_or_none(false)
            .add_equity("BUY")
            .unwrap()
            .build_preview_request()
            .unwrap();

        assert_eq!(
            Value::Object(request),
            json!({
                "PreviewOrderRequest": {
                    "orderType": "EQ",
                    "clientOrderId": "C",
                    "Order": [{
                        "orderTerm": "GOOD_FOR_DAY",
                        "priceType": "LIMIT",
                        "limitPrice": 169,
                        "marketSession": "REGULAR",
                        "allOrNone": false,
                        "Instrument": [{
                            "Product": {"symbol": "FB", "securityType": "EQ"},
                            "orderAction": "BUY",
                            "quantityType": "QUANTITY",
                            "quantity": 1
                        }]
                    }]
                }
            })
        );
    }

    #[test]
    fn invalid_order_type_lists_allowed_values() {
        let err = OrderRequestBuilder::for_account("ACC")
            .order_type("INVALID")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid orderType 'INVALID'; allowed values: EQ, OPTN, SPREADS, BUY_WRITES, \
             BUTTERFLY, IRON_BUTTERFLY, CONDOR, IRON_CONDOR, MF, MMF"
        );
    }

    #[test]
    fn place_requires_preview_ids() {
        let err = equity_builder()
            .build_place_request(Vec::<PreviewId>::new())
            .unwrap_err();
        assert_eq!(err, OrderBuildError::NoPreviewIds);
        assert_eq!(err.to_string(), "at least one preview id required");
    }

    #[test]
    fn option_leg_without_expiry_is_rejected() {
        let err = OrderRequestBuilder::for_account("ACC")
            .with_symbol("IBM")
            .add_long_call(140, 1)
            .unwrap_err();
        assert_eq!(err, OrderBuildError::MissingExpiry);
        assert!(err.to_string().contains("expiry"));
    }

    #[test]
    fn explicit_empty_stop_price_survives() {
        let cleared = equity_builder().clear_stop_price().build_preview_request().unwrap();
        assert_eq!(order_detail(&cleared, "PreviewOrderRequest")["stopPrice"], json!(""));

        let nulled = equity_builder()
            .detail("stopPrice", Value::Null)
            .build_preview_request()
            .unwrap();
        assert_eq!(order_detail(&nulled, "PreviewOrderRequest")["stopPrice"], json!(""));

        let unset = equity_builder().build_preview_request().unwrap();
        assert!(order_detail(&unset, "PreviewOrderRequest").get("stopPrice").is_none());
    }

    #[test]
    fn place_request_accepts_every_id_shape() {
        let builder = equity_builder();
        let ids: Vec<PreviewIdInput> = vec![
            PreviewId::new(11).unwrap().into(),
            json!({"previewId": 12}).into(),
            "13".into(),
        ];
        let request = builder.build_place_request(ids).unwrap();

        assert_eq!(
            request["PlaceOrderRequest"]["PreviewIds"],
            json!([{"previewId": 11}, {"previewId": 12}, {"previewId": 13}])
        );
        assert_eq!(request["PlaceOrderRequest"]["orderType"], json!("EQ"));
    }

    #[test]
    fn builds_do_not_mutate_the_builder() {
        let builder = equity_builder();
        let first = builder.build_preview_request().unwrap();
        let second = builder.build_preview_request().unwrap();
        assert_eq!(first, second);

        let place = builder.build_place_request([42_i64]).unwrap();
        assert_eq!(
            place["PlaceOrderRequest"]["Order"],
            first["PreviewOrderRequest"]["Order"]
        );
        assert_eq!(builder.leg_count(), 1);
    }

    #[test]
    fn iron_condor_legs() {
        let request = OrderRequestBuilder::for_account("ACC")
            .order_type("IRON_CONDOR")
            .unwrap()
            .client_order_id("IC-1")
            .with_symbol("SPY")
            .with_expiry(2024, 6, 21)
            .unwrap()
            .net_credit(dec!(1.25))
            .unwrap()
            .gtc()
            .add_long_put(500, 1)
            .unwrap()
            .add_short_put(510, 1)
            .unwrap()
            .add_short_call(540, 1)
            .unwrap()
            .add_long_call(550, 1)
            .unwrap()
            .build_preview_request()
            .unwrap();

        let detail = order_detail(&request, "PreviewOrderRequest");
        assert_eq!(detail["priceType"], json!("NET_CREDIT"));
        assert_eq!(detail["limitPrice"], json!(1.25));
        assert_eq!(detail["orderTerm"], json!("GOOD_UNTIL_CANCEL"));

        let legs = detail["Instrument"].as_array().unwrap();
        assert_eq!(legs.len(), 4);
        assert_eq!(legs[0]["orderAction"], json!("BUY_OPEN"));
        assert_eq!(legs[1]["orderAction"], json!("SELL_OPEN"));
        assert_eq!(
            legs[2]["Product"],
            json!({"symbol": "SPY", "securityType": "OPTN", "callPut": "CALL",
                   "expiryYear": 2024, "expiryMonth": 6, "expiryDay": 21, "strikePrice": 540})
        );
    }

    #[test]
    fn map_leg_takes_quantity_type_from_context() {
        let leg = match json!({"Product": {"symbol": "AAPL"}, "orderAction": "SELL", "quantity": 500}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let request = OrderRequestBuilder::for_account("ACC")
            .order_type("EQ")
            .unwrap()
            .client_order_id("C")
            .quantity_type("DOLLAR")
            .unwrap()
            .market()
            .add_instrument(leg)
            .unwrap()
            .build_preview_request()
            .unwrap();

        let leg = &order_detail(&request, "PreviewOrderRequest")["Instrument"][0];
        assert_eq!(leg["quantityType"], json!("DOLLAR"));
        assert_eq!(leg["Product"]["symbol"], json!("AAPL"));
        assert_eq!(leg["quantity"], json!(500));
    }

    #[test]
    fn typed_leg_overrides_context() {
        let leg = InstrumentLeg::equity(OrderAction::SellShort, dec!(5))
            .with_symbol("TSLA")
            .with_quantity_type(QuantityType::AllIOwn);
        let request = OrderRequestBuilder::for_account("ACC")
            .order_type(OrderType::Equity)
            .unwrap()
            .client_order_id("C")
            .with_symbol("FB")
            .add_instrument(leg)
            .unwrap()
            .build_preview_request()
            .unwrap();

        let leg = &order_detail(&request, "PreviewOrderRequest")["Instrument"][0];
        assert_eq!(leg["Product"]["symbol"], json!("TSLA"));
        assert_eq!(leg["quantityType"], json!("ALL_I_OWN"));
        assert_eq!(leg["orderAction"], json!("SELL_SHORT"));
    }

    #[test]
    fn missing_context_is_reported_in_order() {
        let err = OrderRequestBuilder::for_account("")
            .build_preview_request()
            .unwrap_err();
        assert_eq!(err, OrderBuildError::MissingField("accountIdKey"));

        let err = OrderRequestBuilder::for_account("ACC")
            .build_preview_request()
            .unwrap_err();
        assert_eq!(err, OrderBuildError::MissingField("orderType"));

        let err = OrderRequestBuilder::for_account("ACC")
            .order_type("EQ")
            .unwrap()
            .build_preview_request()
            .unwrap_err();
        assert_eq!(err, OrderBuildError::MissingField("clientOrderId"));

        let err = OrderRequestBuilder::for_account("ACC")
            .order_type("EQ")
            .unwrap()
            .client_order_id("C")
            .build_preview_request()
            .unwrap_err();
        assert_eq!(err, OrderBuildError::NoLegs);
    }

    #[test]
    fn numeric_constraints() {
        let builder = OrderRequestBuilder::for_account("ACC");
        assert!(matches!(
            builder.clone().limit_price(-1).unwrap_err(),
            OrderBuildError::Negative { field: "limitPrice", .. }
        ));
        assert!(builder.clone().limit_price(0).is_ok());
        assert!(matches!(
            builder.clone().stop_price(0).unwrap_err(),
            OrderBuildError::NotPositive { field: "stopPrice", .. }
        ));
        assert!(matches!(
            builder.clone().with_quantity(0).unwrap_err(),
            OrderBuildError::NotPositive { field: "quantity", .. }
        ));
        assert!(matches!(
            builder.clone().order_id(0).unwrap_err(),
            OrderBuildError::NotPositive { field: "orderId", .. }
        ));
        assert!(matches!(
            builder.clone().with_expiry(2023, 2, 29).unwrap_err(),
            OrderBuildError::InvalidDate { .. }
        ));
        assert!(matches!(
            builder
                .with_symbol("IBM")
                .with_expiry(2024, 6, 21)
                .unwrap()
                .add_long_call(0, 1)
                .unwrap_err(),
            OrderBuildError::NotPositive { field: "strikePrice", .. }
        ));
    }

    #[test]
    fn equity_leg_requires_symbol() {
        let err = OrderRequestBuilder::for_account("ACC")
            .add_equity("BUY")
            .unwrap_err();
        assert_eq!(err, OrderBuildError::MissingSymbol);
    }

    #[test]
    fn enum_setters_validate() {
        let builder = OrderRequestBuilder::for_account("ACC");
        assert!(builder.clone().price_type("LIMIT_ON_OPEN").is_err());
        assert!(builder.clone().order_term("GTC").is_err());
        assert!(builder.clone().market_session("AFTER_HOURS").is_err());
        assert!(builder.clone().quantity_type("SHARES").is_err());
        assert!(builder.with_symbol("FB").add_security("BOND", "BUY", 1).is_err());
    }

    #[test]
    fn change_flow_includes_order_id_and_overrides() {
        let request = equity_builder()
            .order_id(4321)
            .unwrap()
            .detail("routingDestination", "AUTO")
            .detail("marketSession", Value::Null)
            .build_preview_request()
            .unwrap();

        assert_eq!(request["PreviewOrderRequest"]["orderId"], json!(4321));
        let detail = order_detail(&request, "PreviewOrderRequest");
        assert_eq!(detail["routingDestination"], json!("AUTO"));
        assert!(detail.get("marketSession").is_none());
    }

    #[test]
    fn defaults_preset_detail_fields() {
        let defaults = BuilderDefaults {
            quantity_type: QuantityType::Quantity,
            order_term: Some(OrderTerm::GoodForDay),
            market_session: Some(MarketSession::Extended),
            quantity: dec!(100),
        };
        let request = OrderRequestBuilder::with_defaults("ACC", &defaults)
            .order_type("EQ")
            .unwrap()
            .client_order_id("C")
            .with_symbol("FB")
            .market()
            .add_equity("BUY")
            .unwrap()
            .build_preview_request()
            .unwrap();

        let detail = order_detail(&request, "PreviewOrderRequest");
        assert_eq!(detail["orderTerm"], json!("GOOD_FOR_DAY"));
        assert_eq!(detail["marketSession"], json!("EXTENDED"));
        assert_eq!(detail["Instrument"][0]["quantity"], json!(100));
    }
}
