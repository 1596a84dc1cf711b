//! Logging setup.
//!
//! Installs a `tracing` fmt subscriber driven by [`LoggingConfig`].
//! `RUST_LOG` overrides the configured level when set.
//!
//! # Usage
//!
//! ```rust,ignore
//! use brokerage_api::{config::load_config, telemetry::init_logging};
//!
//! let config = load_config(None)?;
//! init_logging(&config.logging);
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed; the existing one
/// stays in place.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let span_events = if config.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_span_events(span_events)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
    .is_ok();

    if installed {
        tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    }
    installed
}

/// Install the global subscriber with default settings.
pub fn init_default_logging() -> bool {
    init_logging(&LoggingConfig::default())
}
