//! Bidirectional wire mapping.
//!
//! Inbound: raw decoded payload → [`normalize`] / [`TemporalParser`] →
//! [`Hydrator`] → [`Entity`] graph.
//!
//! Outbound: [`Entity`] graph → [`serialize`] → wire map.
//!
//! Raw nodes are plain [`serde_json::Value`]s: whatever the transport decoded,
//! JSON or XML-as-JSON.

mod entity;
mod hydrate;
mod normalize;
mod schema;
mod serialize;
mod temporal;

pub use entity::{Entity, FieldValue};
pub use hydrate::{Hydrator, hydrate};
pub use normalize::normalize;
pub use schema::{
    EntitySchema, FieldDescriptor, FieldKind, PostHydrateHook, PreHydrateHook, SchemaRef,
};
pub use serialize::serialize;
pub use temporal::{TemporalParser, TemporalValue, parse_temporal};
