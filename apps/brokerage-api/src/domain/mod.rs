//! Domain vocabulary for orders.
//!
//! The fixed enumerations the brokerage accepts on outbound requests, and the
//! error raised when a caller supplies a value outside one of them.

pub mod errors;
pub mod value_objects;

pub use errors::EnumValueError;
pub use value_objects::{
    CallPut, MarketSession, MessageType, OrderAction, OrderTerm, OrderType, PriceType,
    QuantityType, SecurityType,
};
