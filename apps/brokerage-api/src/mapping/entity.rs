//! The typed entity graph.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::schema::EntitySchema;
use super::temporal::TemporalValue;

/// A resolved field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit null.
    Null,
    /// Text.
    String(String),
    /// Integer.
    Int(i64),
    /// Decimal number.
    Float(Decimal),
    /// Boolean.
    Bool(bool),
    /// Date/time.
    Temporal(TemporalValue),
    /// Nested entity.
    Entity(Box<Entity>),
    /// Ordered list of entities.
    List(Vec<Entity>),
    /// Raw value passed through without a declared type.
    Raw(Value),
}

impl FieldValue {
    /// Whether this is an explicit null (including a raw JSON null).
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Raw(Value::Null))
    }

    /// Convert an untyped scalar, keeping its natural type.
    #[must_use]
    pub fn from_raw(raw: &Value) -> Self {
        match raw {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::String(s) => Self::String(s.clone()),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| decimal_from_str(&n.to_string()).map(Self::Float))
                .unwrap_or_else(|| Self::Raw(raw.clone())),
            Value::Array(_) | Value::Object(_) => Self::Raw(raw.clone()),
        }
    }

    /// Text view of a scalar value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Raw(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer view; decimals with no fractional part qualify.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        use rust_decimal::prelude::ToPrimitive;

        match self {
            Self::Int(n) => Some(*n),
            Self::Float(d) if d.fract().is_zero() => d.to_i64(),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Decimal view.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Float(d) => Some(*d),
            Self::Int(n) => Some(Decimal::from(*n)),
            Self::String(s) => decimal_from_str(s),
            _ => None,
        }
    }

    /// Boolean view.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(n) => Some(*n != 0),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<TemporalValue> for FieldValue {
    fn from(value: TemporalValue) -> Self {
        Self::Temporal(value)
    }
}

impl From<Entity> for FieldValue {
    fn from(value: Entity) -> Self {
        Self::Entity(Box::new(value))
    }
}

impl From<Vec<Entity>> for FieldValue {
    fn from(value: Vec<Entity>) -> Self {
        Self::List(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

/// An instantiated node of the entity graph.
///
/// Only values that were resolved from input (or explicitly set) are stored;
/// everything else reads as the schema's declared default.
///
/// Read-only outside this crate: hydration, schema hooks and the order
/// builder are the only writers.
#[derive(Debug, Clone)]
pub struct Entity {
    schema: &'static EntitySchema,
    values: Vec<(String, FieldValue)>,
}

impl Entity {
    /// Create an entity with no stored values.
    #[must_use]
    pub const fn new(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            values: Vec::new(),
        }
    }

    /// The schema this entity was built against.
    #[must_use]
    pub const fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    /// Schema name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.schema.name()
    }

    /// Stored value, without default resolution.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Whether a value is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Store a value, replacing any previous one in place.
    pub(crate) fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    /// Remove a stored value.
    pub(crate) fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.values.iter().position(|(key, _)| key == name)?;
        Some(self.values.remove(index).1)
    }

    /// Stored values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored value, falling back to the declared default.
    ///
    /// A stored explicit null also falls back. Returns `None` for names the
    /// schema does not declare and the entity does not store.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        match self.get(name) {
            Some(value) if !value.is_null() => Some(value),
            _ => self.schema.descriptor(name).map(|d| d.default()),
        }
    }

    /// Text value.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(FieldValue::as_str)
    }

    /// Integer value.
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(FieldValue::as_i64)
    }

    /// Decimal value.
    #[must_use]
    pub fn decimal(&self, name: &str) -> Option<Decimal> {
        self.value(name).and_then(FieldValue::as_decimal)
    }

    /// Boolean value.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(FieldValue::as_bool)
    }

    /// Date/time value.
    #[must_use]
    pub fn temporal(&self, name: &str) -> Option<TemporalValue> {
        match self.value(name) {
            Some(FieldValue::Temporal(t)) => Some(*t),
            _ => None,
        }
    }

    /// Nested entity, present only if an alias key was present in the input.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Self> {
        match self.value(name) {
            Some(FieldValue::Entity(e)) => Some(e),
            _ => None,
        }
    }

    /// Nested list; empty when absent.
    #[must_use]
    pub fn list(&self, name: &str) -> &[Self] {
        match self.value(name) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }
}

impl PartialEq for Entity {
    /// Same schema and the same stored values, regardless of insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name()
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

pub(crate) fn decimal_from_str(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
