//! Order payloads: requests, previews, placements, cancellations, listings.

use super::messages::{messages_field, unwrap_messages};
use crate::entity_schema;
use crate::mapping::{EntitySchema, FieldDescriptor};

entity_schema! {
    /// Tradable product of a leg.
    pub fn product() => EntitySchema::new("Product").fields([
        FieldDescriptor::string("symbol"),
        FieldDescriptor::string("securityType"),
        FieldDescriptor::string("securitySubType").nullable(),
        FieldDescriptor::string("callPut").nullable(),
        FieldDescriptor::int("expiryYear").nullable(),
        FieldDescriptor::int("expiryMonth").nullable(),
        FieldDescriptor::int("expiryDay").nullable(),
        FieldDescriptor::float("strikePrice").nullable(),
        FieldDescriptor::string("expiryType").nullable(),
    ])
}

entity_schema! {
    /// One leg of an order.
    pub fn instrument() => EntitySchema::new("Instrument").fields([
        FieldDescriptor::entity("product", product).wire_key("Product"),
        FieldDescriptor::string("symbolDescription"),
        FieldDescriptor::string("orderAction"),
        FieldDescriptor::string("quantityType"),
        FieldDescriptor::float("quantity"),
        FieldDescriptor::float("cancelQuantity"),
        FieldDescriptor::float("orderedQuantity"),
        FieldDescriptor::float("filledQuantity"),
        FieldDescriptor::float("averageExecutionPrice"),
        FieldDescriptor::float("estimatedCommission"),
        FieldDescriptor::float("estimatedFees"),
        FieldDescriptor::float("bid").nullable(),
        FieldDescriptor::float("ask").nullable(),
        FieldDescriptor::float("lastprice").nullable(),
        FieldDescriptor::bool("reserveOrder"),
        FieldDescriptor::float("reserveQuantity"),
    ])
}

entity_schema! {
    /// Pricing, term and legs of one order.
    pub fn order_detail() => EntitySchema::new("OrderDetail")
        .fields([
            FieldDescriptor::int("orderNumber").nullable(),
            FieldDescriptor::string("accountId").nullable(),
            FieldDescriptor::temporal("previewTime"),
            FieldDescriptor::temporal("placedTime"),
            FieldDescriptor::temporal("executedTime"),
            FieldDescriptor::float("orderValue"),
            FieldDescriptor::string("status").nullable(),
            FieldDescriptor::string("orderTerm"),
            FieldDescriptor::string("priceType"),
            FieldDescriptor::float("limitPrice"),
            FieldDescriptor::float("stopPrice").keep_empty(),
            FieldDescriptor::float("stopLimitPrice"),
            FieldDescriptor::string("offsetType").nullable(),
            FieldDescriptor::float("offsetValue").nullable(),
            FieldDescriptor::string("marketSession"),
            FieldDescriptor::string("routingDestination").nullable(),
            FieldDescriptor::float("bracketedLimitPrice").nullable(),
            FieldDescriptor::float("initialStopPrice").nullable(),
            FieldDescriptor::float("trailPrice").nullable(),
            FieldDescriptor::float("triggerPrice").nullable(),
            FieldDescriptor::float("conditionPrice").nullable(),
            FieldDescriptor::string("conditionSymbol").nullable(),
            FieldDescriptor::string("conditionType").nullable(),
            FieldDescriptor::int("replacedByOrderId").nullable(),
            FieldDescriptor::int("replacesOrderId").nullable(),
            FieldDescriptor::bool("allOrNone"),
            FieldDescriptor::float("netPrice").nullable(),
            FieldDescriptor::float("netBid").nullable(),
            FieldDescriptor::float("netAsk").nullable(),
            FieldDescriptor::float("estimatedCommission").nullable(),
            FieldDescriptor::float("estimatedTotalAmount").nullable(),
            FieldDescriptor::list("instrument", instrument).wire_key("Instrument"),
            messages_field(),
        ])
        .with_pre_hydrate(unwrap_messages)
}

entity_schema! {
    /// Preview id issued by a preview response and consumed by a place request.
    pub fn preview_id() => EntitySchema::new("PreviewId").fields([
        FieldDescriptor::int("previewId"),
        FieldDescriptor::string("cashMargin").nullable(),
    ])
}

entity_schema! {
    /// Order id issued by a place response.
    pub fn order_id_ref() => EntitySchema::new("OrderId").fields([
        FieldDescriptor::int("orderId"),
        FieldDescriptor::string("cashMargin").nullable(),
    ])
}

entity_schema! {
    /// One order in an order listing.
    pub fn order() => EntitySchema::new("Order").fields([
        FieldDescriptor::int("orderId"),
        FieldDescriptor::string("details").nullable(),
        FieldDescriptor::string("orderType"),
        FieldDescriptor::float("totalOrderValue").nullable(),
        FieldDescriptor::float("totalCommission").nullable(),
        FieldDescriptor::list("orderDetail", order_detail).wire_key("OrderDetail"),
    ])
}

entity_schema! {
    /// Page of orders for an account.
    pub fn orders_response() => EntitySchema::new("OrdersResponse")
        .fields([
            FieldDescriptor::string("marker").nullable(),
            FieldDescriptor::string("next").nullable(),
            FieldDescriptor::list("order", order).wire_key("Order"),
            messages_field(),
        ])
        .with_pre_hydrate(unwrap_messages)
}

fn request_fields() -> [FieldDescriptor; 4] {
    [
        FieldDescriptor::string("orderType"),
        FieldDescriptor::string("clientOrderId"),
        FieldDescriptor::int("orderId").nullable(),
        FieldDescriptor::list("order", order_detail).wire_key("Order"),
    ]
}

entity_schema! {
    /// Outbound preview request body.
    pub fn preview_order_request() => EntitySchema::new("PreviewOrderRequest")
        .fields(request_fields())
}

entity_schema! {
    /// Outbound place request body.
    pub fn place_order_request() => EntitySchema::new("PlaceOrderRequest")
        .fields(request_fields())
        .field(FieldDescriptor::list("previewIds", preview_id).wire_key("PreviewIds"))
}

fn response_fields() -> [FieldDescriptor; 11] {
    [
        FieldDescriptor::string("accountId"),
        FieldDescriptor::string("orderType"),
        FieldDescriptor::string("clientOrderId"),
        FieldDescriptor::float("totalOrderValue"),
        FieldDescriptor::float("totalCommission"),
        FieldDescriptor::bool("dstFlag"),
        FieldDescriptor::int("optionLevelCd").nullable(),
        FieldDescriptor::string("marginLevelCd").nullable(),
        FieldDescriptor::float("commissionFee").nullable(),
        FieldDescriptor::list("order", order_detail).wire_key("Order"),
        messages_field(),
    ]
}

entity_schema! {
    /// Result of an order preview.
    pub fn preview_order_response() => EntitySchema::new("PreviewOrderResponse")
        .fields(response_fields())
        .fields([
            FieldDescriptor::temporal("previewTime"),
            FieldDescriptor::list("previewIds", preview_id).wire_key("PreviewIds"),
        ])
        .with_pre_hydrate(unwrap_messages)
}

entity_schema! {
    /// Result of an order placement.
    pub fn place_order_response() => EntitySchema::new("PlaceOrderResponse")
        .fields(response_fields())
        .fields([
            FieldDescriptor::temporal("placedTime"),
            FieldDescriptor::int("orderId").nullable(),
            FieldDescriptor::list("orderIds", order_id_ref).wire_key("OrderIds"),
        ])
        .with_pre_hydrate(unwrap_messages)
}

entity_schema! {
    /// Outbound cancel request body.
    pub fn cancel_order_request() => EntitySchema::new("CancelOrderRequest")
        .field(FieldDescriptor::int("orderId"))
}

entity_schema! {
    /// Result of an order cancellation.
    pub fn cancel_order_response() => EntitySchema::new("CancelOrderResponse")
        .fields([
            FieldDescriptor::string("accountId"),
            FieldDescriptor::int("orderId"),
            FieldDescriptor::temporal("cancelTime"),
            messages_field(),
        ])
        .with_pre_hydrate(unwrap_messages)
}
