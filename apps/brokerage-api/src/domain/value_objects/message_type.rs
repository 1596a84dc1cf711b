//! Severity of a message attached to a response.

use std::fmt;

/// Message severity. Read side only, so unknown spellings are kept rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Warning.
    Warning,
    /// Informational.
    Info,
    /// Informational; order held for review.
    InfoHold,
    /// Error.
    Error,
    /// Anything else the brokerage sends.
    Other(String),
}

impl MessageType {
    /// Lenient parse. Empty input reads as `Info`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "WARNING" => Self::Warning,
            "" | "INFO" => Self::Info,
            "INFO_HOLD" => Self::InfoHold,
            "ERROR" => Self::Error,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Returns true for `ERROR`.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
            Self::InfoHold => write!(f, "INFO_HOLD"),
            Self::Error => write!(f, "ERROR"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}
