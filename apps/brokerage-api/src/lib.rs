// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::option_if_let_else,
        clippy::items_after_statements
    )
)]

//! Brokerage API - Rust Core Library
//!
//! Typed request/response mapping core for a brokerage trading API.
//!
//! # Architecture
//!
//! ## Inbound (wire → entities)
//!
//! - `mapping`: array normalizer, temporal parser, hydration engine, entity graph
//! - `schemas`: declarative schema catalogue for accounts, orders and quotes
//! - `responses`: read-only typed views over hydrated responses
//!
//! ## Outbound (entities → wire)
//!
//! - `mapping::serialize`: entity graph → wire-ready map
//! - `order`: validated preview/place order request builder
//!
//! ## Edges
//!
//! - `domain`: the brokerage's closed enumerations
//! - `application`: transport port and the endpoint facade
//! - `config`: YAML configuration with env interpolation
//! - `telemetry`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use brokerage_api::{OrderRequestBuilder, OrderType};
//!
//! let request = OrderRequestBuilder::for_account("abc123")
//!     .order_type(OrderType::Spreads)?
//!     .client_order_id("ord-1")
//!     .with_symbol("FB")
//!     .with_expiry(2018, 12, 21)?
//!     .net_debit(dec!(1.25))?
//!     .add_long_call(170, 1)?
//!     .add_short_call(175, 1)?
//!     .build_preview_request()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Entity graph, hydration, serialization and temporal parsing.
pub mod mapping;

/// Declarative schemas for the brokerage payloads.
pub mod schemas;

/// Closed enumerations and their validation errors.
pub mod domain;

/// Order request builder.
pub mod order;

/// Typed response views.
pub mod responses;

/// Transport port and endpoint facade.
pub mod application;

/// Configuration loading and validation.
pub mod config;

/// Crate-level error type.
pub mod error;

/// Logging setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::{BrokerageApi, Query, TransportError, TransportPort};
pub use config::{MappingConfig, load_config, load_config_from_string};
pub use domain::{
    CallPut, EnumValueError, MarketSession, MessageType, OrderAction, OrderTerm, OrderType,
    PriceType, QuantityType, SecurityType,
};
pub use error::{Error, Result};
pub use mapping::{
    Entity, FieldValue, Hydrator, TemporalParser, TemporalValue, hydrate, normalize,
    parse_temporal, serialize,
};
pub use order::{
    BuilderDefaults, InstrumentLeg, LegInput, OrderBuildError, OrderRequestBuilder, PreviewId,
    PreviewIdInput,
};
pub use responses::{
    AccountListResponse, BalanceResponse, CancelOrderResponse, Message, OrdersResponse,
    PlaceOrderResponse, PortfolioResponse, PreviewOrderResponse, QuoteResponse,
};
