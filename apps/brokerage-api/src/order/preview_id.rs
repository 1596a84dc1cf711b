//! Preview ids and the shapes callers hand them in.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::OrderBuildError;
use crate::mapping::Entity;
use crate::schemas;

/// Id returned by a preview and required to place the previewed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewId(i64);

impl PreviewId {
    /// Create a preview id. Must be positive.
    pub fn new(id: i64) -> Result<Self, OrderBuildError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(OrderBuildError::InvalidPreviewId(id.to_string()))
        }
    }

    /// Numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// `{"previewId": n}` entity for a place request.
    pub(crate) fn to_entity(self) -> Entity {
        let mut entity = Entity::new(schemas::preview_id());
        entity.set("previewId", self.0);
        entity
    }
}

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Any of the shapes a preview id may be supplied in.
///
/// Typed ids, raw numbers or digit strings, and maps carrying a `previewId`
/// key (as found in a preview response's `PreviewIds` list) are equivalent.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewIdInput {
    /// Already-validated id.
    Id(PreviewId),
    /// Raw number.
    Number(i64),
    /// Raw text.
    Text(String),
    /// Map with a `previewId` key.
    Map(Map<String, Value>),
    /// Any decoded value.
    Raw(Value),
}

impl PreviewIdInput {
    /// Normalize to a validated [`PreviewId`].
    pub fn resolve(self) -> Result<PreviewId, OrderBuildError> {
        match self {
            Self::Id(id) => Ok(id),
            Self::Number(n) => PreviewId::new(n),
            Self::Text(text) => parse_text(&text),
            Self::Map(map) => {
                let value = map
                    .get("previewId")
                    .or_else(|| map.get("PreviewId"))
                    .ok_or_else(|| OrderBuildError::InvalidPreviewId(Value::Object(map.clone()).to_string()))?;
                resolve_value(value)
            }
            Self::Raw(value) => resolve_value(&value),
        }
    }
}

fn resolve_value(value: &Value) -> Result<PreviewId, OrderBuildError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| OrderBuildError::InvalidPreviewId(n.to_string()))
            .and_then(PreviewId::new),
        Value::String(text) => parse_text(text),
        Value::Object(map) => PreviewIdInput::Map(map.clone()).resolve(),
        other => Err(OrderBuildError::InvalidPreviewId(other.to_string())),
    }
}

fn parse_text(text: &str) -> Result<PreviewId, OrderBuildError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| OrderBuildError::InvalidPreviewId(text.to_string()))
        .and_then(PreviewId::new)
}

impl From<PreviewId> for PreviewIdInput {
    fn from(id: PreviewId) -> Self {
        Self::Id(id)
    }
}

impl From<&PreviewId> for PreviewIdInput {
    fn from(id: &PreviewId) -> Self {
        Self::Id(*id)
    }
}

impl From<i64> for PreviewIdInput {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<u64> for PreviewIdInput {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or_else(|_| Self::Text(n.to_string()), Self::Number)
    }
}

impl From<&str> for PreviewIdInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PreviewIdInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Map<String, Value>> for PreviewIdInput {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl From<Value> for PreviewIdInput {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}
