//! Read-only typed views over hydrated responses.
//!
//! Each view wraps the [`Entity`] its schema produces and adds accessors for
//! the fields callers reach for most. The full entity stays available through
//! `entity()` for anything else.

mod accounts;
mod message;
mod orders;

use serde_json::Value;

pub use accounts::{AccountListResponse, BalanceResponse, PortfolioResponse, QuoteResponse};
pub use message::Message;
pub use orders::{CancelOrderResponse, OrdersResponse, PlaceOrderResponse, PreviewOrderResponse};

/// Strip the single root key (`{"PreviewOrderResponse": {...}}`) if present.
///
/// The root key is matched up to the case of its first letter; a payload
/// without it is returned as is.
#[must_use]
pub fn unwrap_root<'a>(raw: &'a Value, root: &str) -> &'a Value {
    let Value::Object(map) = raw else {
        return raw;
    };
    map.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(root) && key.get(1..) == root.get(1..))
        .map_or(raw, |(_, inner)| inner)
}

/// Declare a newtype view over an entity of one schema.
macro_rules! response_view {
    ($(#[$meta:meta])* $name:ident => $schema:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name($crate::mapping::Entity);

        impl $name {
            /// Hydrate from a decoded payload, with or without its root key.
            #[must_use]
            pub fn from_raw(raw: &serde_json::Value) -> Self {
                Self::from_raw_with(&$crate::mapping::Hydrator::default(), raw)
            }

            /// Hydrate with a specific hydrator.
            #[must_use]
            pub fn from_raw_with(
                hydrator: &$crate::mapping::Hydrator,
                raw: &serde_json::Value,
            ) -> Self {
                let schema = $schema();
                let body = $crate::responses::unwrap_root(raw, schema.name());
                Self(hydrator.hydrate(schema, body))
            }

            /// The underlying entity.
            #[must_use]
            pub const fn entity(&self) -> &$crate::mapping::Entity {
                &self.0
            }

            /// Take the underlying entity.
            #[must_use]
            pub fn into_entity(self) -> $crate::mapping::Entity {
                self.0
            }
        }

        impl From<$name> for $crate::mapping::Entity {
            fn from(view: $name) -> Self {
                view.0
            }
        }
    };
}

pub(crate) use response_view;
