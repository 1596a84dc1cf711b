//! Order request assembly.
//!
//! [`OrderRequestBuilder`] collects context, pricing and legs, validates as
//! it goes, and produces wire-ready preview and place request maps.

mod builder;
mod error;
mod leg;
mod preview_id;

pub use builder::{BuilderDefaults, OrderRequestBuilder};
pub use error::OrderBuildError;
pub use leg::{InstrumentLeg, LegInput};
pub use preview_id::{PreviewId, PreviewIdInput};
