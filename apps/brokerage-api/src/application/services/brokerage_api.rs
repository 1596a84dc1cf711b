//! Brokerage API facade.
//!
//! Turns builder output and account keys into transport calls and hydrates
//! whatever comes back into typed views.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::application::ports::{Query, TransportPort};
use crate::config::MappingConfig;
use crate::error::{Error, Result};
use crate::mapping::{Entity, Hydrator, serialize};
use crate::order::{OrderBuildError, OrderRequestBuilder, PreviewIdInput};
use crate::responses::{
    AccountListResponse, BalanceResponse, CancelOrderResponse, Message, OrdersResponse,
    PlaceOrderResponse, PortfolioResponse, PreviewOrderResponse, QuoteResponse,
};
use crate::schemas;

/// Default path prefix of the brokerage REST API.
pub const DEFAULT_BASE_PATH: &str = "/v1";

/// Typed facade over a [`TransportPort`].
pub struct BrokerageApi<T: TransportPort> {
    transport: Arc<T>,
    base_path: String,
    hydrator: Hydrator,
}

impl<T: TransportPort> BrokerageApi<T> {
    /// Create a facade with the default base path and hydrator.
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            base_path: DEFAULT_BASE_PATH.to_string(),
            hydrator: Hydrator::default(),
        }
    }

    /// Create a facade from loaded configuration.
    pub fn from_config(transport: Arc<T>, config: &MappingConfig) -> Self {
        Self::new(transport)
            .with_base_path(&config.api.base_path)
            .with_hydrator(Hydrator::new(config.temporal.parser()))
    }

    /// Override the path prefix.
    #[must_use]
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.trim_end_matches('/').to_string();
        self
    }

    /// Override the hydrator.
    #[must_use]
    pub fn with_hydrator(mut self, hydrator: Hydrator) -> Self {
        self.hydrator = hydrator;
        self
    }

    /// Path prefix in use.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// List the user's accounts.
    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> Result<AccountListResponse> {
        let path = self.path("/accounts/list");
        let raw = self.transport.get(&path, &Query::new()).await?;
        let body = expect_object(&path, &raw)?;
        Ok(AccountListResponse::from_raw_with(&self.hydrator, body))
    }

    /// Real-time balance of one account.
    #[instrument(skip(self))]
    pub async fn balance(&self, account_id_key: &str) -> Result<BalanceResponse> {
        let path = self.path(&format!("/accounts/{account_id_key}/balance"));
        let query = vec![
            ("instType".to_string(), "BROKERAGE".to_string()),
            ("realTimeNAV".to_string(), "true".to_string()),
        ];
        let raw = self.transport.get(&path, &query).await?;
        let body = expect_object(&path, &raw)?;
        Ok(BalanceResponse::from_raw_with(&self.hydrator, body))
    }

    /// Positions held in one account.
    #[instrument(skip(self))]
    pub async fn portfolio(&self, account_id_key: &str) -> Result<PortfolioResponse> {
        let path = self.path(&format!("/accounts/{account_id_key}/portfolio"));
        let raw = self.transport.get(&path, &Query::new()).await?;
        let body = expect_object(&path, &raw)?;
        Ok(PortfolioResponse::from_raw_with(&self.hydrator, body))
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// One page of an account's orders. Pass the previous page's marker to
    /// continue.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        account_id_key: &str,
        marker: Option<&str>,
    ) -> Result<OrdersResponse> {
        let path = self.path(&format!("/accounts/{account_id_key}/orders"));
        let query: Query = marker
            .map(|m| ("marker".to_string(), m.to_string()))
            .into_iter()
            .collect();
        let raw = self.transport.get(&path, &query).await?;
        let body = expect_object(&path, &raw)?;
        Ok(OrdersResponse::from_raw_with(&self.hydrator, body))
    }

    /// Preview the builder's order. A builder carrying an existing order id
    /// previews a change to that order.
    #[instrument(skip_all, fields(account_id_key = %builder.account_id_key()))]
    pub async fn preview_order(
        &self,
        builder: &OrderRequestBuilder,
    ) -> Result<PreviewOrderResponse> {
        let body = builder.build_preview_request()?;
        let path = self.order_path(builder, "preview");
        let raw = self.send(builder, &path, &body).await?;
        let response =
            PreviewOrderResponse::from_raw_with(&self.hydrator, expect_object(&path, &raw)?);
        log_messages(&path, &response.messages());
        Ok(response)
    }

    /// Place the builder's order using ids from its preview.
    #[instrument(skip_all, fields(account_id_key = %builder.account_id_key()))]
    pub async fn place_order<I>(
        &self,
        builder: &OrderRequestBuilder,
        preview_ids: I,
    ) -> Result<PlaceOrderResponse>
    where
        I: IntoIterator,
        I::Item: Into<PreviewIdInput>,
    {
        let body = builder.build_place_request(preview_ids)?;
        let path = self.order_path(builder, "place");
        let raw = self.send(builder, &path, &body).await?;
        let response =
            PlaceOrderResponse::from_raw_with(&self.hydrator, expect_object(&path, &raw)?);
        log_messages(&path, &response.messages());
        Ok(response)
    }

    /// Cancel an open order.
    #[instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        account_id_key: &str,
        order_id: i64,
    ) -> Result<CancelOrderResponse> {
        if order_id <= 0 {
            return Err(OrderBuildError::NotPositive {
                field: "orderId",
                value: order_id.into(),
            }
            .into());
        }

        let schema = schemas::cancel_order_request();
        let mut request = Entity::new(schema);
        request.set("orderId", order_id);
        let mut body = Map::new();
        body.insert(schema.name().to_string(), Value::Object(serialize(&request)));

        let path = self.path(&format!("/accounts/{account_id_key}/orders/cancel"));
        let raw = self.transport.put(&path, &body).await?;
        let body = expect_object(&path, &raw)?;
        Ok(CancelOrderResponse::from_raw_with(&self.hydrator, body))
    }

    // =========================================================================
    // Market
    // =========================================================================

    /// Full quotes for one or more symbols.
    #[instrument(skip(self))]
    pub async fn quotes(&self, symbols: &[&str]) -> Result<QuoteResponse> {
        let symbols: Vec<&str> = symbols
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if symbols.is_empty() {
            return Err(OrderBuildError::MissingField("symbols").into());
        }

        let path = self.path(&format!("/market/quote/{}", symbols.join(",")));
        let query = vec![("detailFlag".to_string(), "ALL".to_string())];
        let raw = self.transport.get(&path, &query).await?;
        let body = expect_object(&path, &raw)?;
        Ok(QuoteResponse::from_raw_with(&self.hydrator, body))
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.base_path)
    }

    fn order_path(&self, builder: &OrderRequestBuilder, action: &str) -> String {
        let key = builder.account_id_key();
        match builder.existing_order_id() {
            Some(order_id) => {
                self.path(&format!("/accounts/{key}/orders/{order_id}/change/{action}"))
            }
            None => self.path(&format!("/accounts/{key}/orders/{action}")),
        }
    }

    /// New orders are POSTed; changes to existing orders are PUT.
    async fn send(
        &self,
        builder: &OrderRequestBuilder,
        path: &str,
        body: &Map<String, Value>,
    ) -> Result<Value> {
        debug!(path, "Sending order request");
        let raw = if builder.existing_order_id().is_some() {
            self.transport.put(path, body).await?
        } else {
            self.transport.post(path, body).await?
        };
        Ok(raw)
    }
}

fn expect_object<'a>(endpoint: &str, raw: &'a Value) -> Result<&'a Value> {
    if raw.is_object() {
        Ok(raw)
    } else {
        Err(Error::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            detail: format!("expected an object, got {}", json_kind(raw)),
        })
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Error-typed messages log at `warn!`, the rest at `debug!`.
fn log_messages(path: &str, messages: &[Message]) {
    for message in messages {
        if message.message_type.is_error() {
            warn!(
                path,
                code = message.code,
                description = %message.description,
                "Brokerage reported an error"
            );
        } else {
            debug!(
                path,
                code = message.code,
                kind = %message.message_type,
                description = %message.description,
                "Brokerage message"
            );
        }
    }
}
