//! Order response views.

use rust_decimal::Decimal;

use super::message::Message;
use super::response_view;
use crate::domain::OrderType;
use crate::mapping::{Entity, TemporalValue};
use crate::order::PreviewId;
use crate::schemas;

response_view! {
    /// Result of previewing an order.
    PreviewOrderResponse => schemas::preview_order_response
}

impl PreviewOrderResponse {
    /// Account the preview was made for.
    #[must_use]
    pub fn account_id(&self) -> &str {
        self.0.str("accountId").unwrap_or_default()
    }

    /// Order type echoed back, if recognised.
    #[must_use]
    pub fn order_type(&self) -> Option<OrderType> {
        self.0.str("orderType").and_then(|s| s.parse().ok())
    }

    /// Client order id echoed back.
    #[must_use]
    pub fn client_order_id(&self) -> &str {
        self.0.str("clientOrderId").unwrap_or_default()
    }

    /// Ids to pass to `build_place_request`. Invalid entries are skipped.
    #[must_use]
    pub fn preview_ids(&self) -> Vec<PreviewId> {
        self.0
            .list("previewIds")
            .iter()
            .filter_map(|entry| entry.int("previewId"))
            .filter_map(|id| PreviewId::new(id).ok())
            .collect()
    }

    /// Estimated order value.
    #[must_use]
    pub fn total_order_value(&self) -> Decimal {
        self.0.decimal("totalOrderValue").unwrap_or_default()
    }

    /// Estimated commission.
    #[must_use]
    pub fn total_commission(&self) -> Decimal {
        self.0.decimal("totalCommission").unwrap_or_default()
    }

    /// When the preview was generated.
    #[must_use]
    pub fn preview_time(&self) -> Option<TemporalValue> {
        self.0.temporal("previewTime")
    }

    /// Order details as previewed.
    #[must_use]
    pub fn orders(&self) -> &[Entity] {
        self.0.list("order")
    }

    /// Messages on the response and on each order detail.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        collect_messages(&self.0)
    }
}

response_view! {
    /// Result of placing an order.
    PlaceOrderResponse => schemas::place_order_response
}

impl PlaceOrderResponse {
    /// Account the order was placed in.
    #[must_use]
    pub fn account_id(&self) -> &str {
        self.0.str("accountId").unwrap_or_default()
    }

    /// Client order id echoed back.
    #[must_use]
    pub fn client_order_id(&self) -> &str {
        self.0.str("clientOrderId").unwrap_or_default()
    }

    /// Ids assigned to the placed order.
    ///
    /// Reads the `OrderIds` list, falling back to a bare `orderId`.
    #[must_use]
    pub fn order_ids(&self) -> Vec<i64> {
        let ids: Vec<i64> = self
            .0
            .list("orderIds")
            .iter()
            .filter_map(|entry| entry.int("orderId"))
            .filter(|id| *id > 0)
            .collect();
        if ids.is_empty() {
            self.0.int("orderId").filter(|id| *id > 0).into_iter().collect()
        } else {
            ids
        }
    }

    /// When the order was placed.
    #[must_use]
    pub fn placed_time(&self) -> Option<TemporalValue> {
        self.0.temporal("placedTime")
    }

    /// Estimated order value.
    #[must_use]
    pub fn total_order_value(&self) -> Decimal {
        self.0.decimal("totalOrderValue").unwrap_or_default()
    }

    /// Order details as placed.
    #[must_use]
    pub fn orders(&self) -> &[Entity] {
        self.0.list("order")
    }

    /// Messages on the response and on each order detail.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        collect_messages(&self.0)
    }
}

response_view! {
    /// Result of cancelling an order.
    CancelOrderResponse => schemas::cancel_order_response
}

impl CancelOrderResponse {
    /// Account the order belonged to.
    #[must_use]
    pub fn account_id(&self) -> &str {
        self.0.str("accountId").unwrap_or_default()
    }

    /// Cancelled order id.
    #[must_use]
    pub fn order_id(&self) -> i64 {
        self.0.int("orderId").unwrap_or_default()
    }

    /// When the cancellation was accepted.
    #[must_use]
    pub fn cancel_time(&self) -> Option<TemporalValue> {
        self.0.temporal("cancelTime")
    }

    /// Messages.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        Message::list(&self.0)
    }
}

response_view! {
    /// One page of an account's orders.
    OrdersResponse => schemas::orders_response
}

impl OrdersResponse {
    /// Orders on this page.
    #[must_use]
    pub fn orders(&self) -> &[Entity] {
        self.0.list("order")
    }

    /// Marker for the next page, if there is one.
    #[must_use]
    pub fn marker(&self) -> Option<&str> {
        self.0.str("marker").filter(|m| !m.is_empty())
    }

    /// Messages.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        Message::list(&self.0)
    }
}

fn collect_messages(response: &Entity) -> Vec<Message> {
    let mut messages = Message::list(response);
    for detail in response.list("order") {
        messages.extend(Message::list(detail));
    }
    messages
}
