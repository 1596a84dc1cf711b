//! Crate-level error type.

use thiserror::Error;

use crate::application::ports::TransportError;
use crate::config::ConfigError;
use crate::order::OrderBuildError;

/// Any failure surfaced by the API facade or configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    /// Request could not be built.
    #[error(transparent)]
    Build(#[from] OrderBuildError),

    /// Transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Brokerage answered with something other than the expected payload.
    #[error("Unexpected response from {endpoint}: {detail}")]
    UnexpectedResponse {
        /// Path that was called.
        endpoint: String,
        /// What was wrong.
        detail: String,
    },
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
