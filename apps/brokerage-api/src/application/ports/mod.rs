//! Driven ports.

mod transport_port;

pub use transport_port::{Query, TransportError, TransportPort};
