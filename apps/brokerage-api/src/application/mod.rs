//! Application layer: the transport port and the facade built on it.

pub mod ports;
pub mod services;

pub use ports::{Query, TransportError, TransportPort};
pub use services::{BrokerageApi, DEFAULT_BASE_PATH};
