//! Transport Port (Driven Port)
//!
//! Interface to whatever performs the actual HTTP round trip: request
//! signing, retries and XML/JSON decoding all live behind it. The core only
//! sees decoded payloads.

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Query string parameters, in order.
pub type Query = Vec<(String, String)>;

/// Transport port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Could not reach the brokerage.
    #[error("Transport connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("Brokerage returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as received.
        body: String,
    },

    /// Credentials missing, expired or rejected.
    #[error("Not authorized")]
    Unauthorized,

    /// Rate limited.
    #[error("Rate limited by brokerage")]
    RateLimited,

    /// Body could not be decoded.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Error details.
        message: String,
    },
}

/// Port for brokerage HTTP calls.
///
/// Paths are absolute within the API host (e.g. `/v1/accounts/list`).
#[async_trait]
pub trait TransportPort: Send + Sync {
    /// GET `path` with `query`.
    async fn get(&self, path: &str, query: &Query) -> Result<Value, TransportError>;

    /// POST a JSON body.
    async fn post(&self, path: &str, body: &Map<String, Value>) -> Result<Value, TransportError>;

    /// PUT a JSON body.
    async fn put(&self, path: &str, body: &Map<String, Value>) -> Result<Value, TransportError>;
}
