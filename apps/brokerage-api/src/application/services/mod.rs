//! Application services.

mod brokerage_api;

pub use brokerage_api::{BrokerageApi, DEFAULT_BASE_PATH};
