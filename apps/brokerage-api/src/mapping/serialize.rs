//! Entity → wire map conversion.
//!
//! Null and empty values are stripped (an absent field means "no change" to
//! the receiving system). Fields declared `keep_empty` keep an explicit empty
//! string, which means "clear this value". Wire-key renames come from the
//! parent schema's field declarations.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};

use super::entity::{Entity, FieldValue};

/// Serialize an entity into a wire-ready map. Pure: the entity is not touched.
#[must_use]
pub fn serialize(entity: &Entity) -> Map<String, Value> {
    let schema = entity.schema();
    let mut out = Map::new();

    for (name, value) in entity.iter() {
        let descriptor = schema.descriptor(name);
        let keep_empty = descriptor.is_some_and(|d| d.keeps_empty());
        let key = descriptor.map_or(name, |d| d.serialized_key());

        if let Some(wire) = to_wire(value, keep_empty) {
            out.insert(key.to_string(), wire);
        }
    }

    out
}

fn to_wire(value: &FieldValue, keep_empty: bool) -> Option<Value> {
    let wire = match value {
        FieldValue::Null => Value::Null,
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Int(n) => Value::from(*n),
        FieldValue::Float(d) => decimal_to_wire(*d),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Temporal(t) => t.to_wire(),
        FieldValue::Entity(e) => Value::Object(serialize(e)),
        FieldValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| Value::Object(serialize(item)))
                .collect(),
        ),
        FieldValue::Raw(raw) => strip_empty(raw)?,
    };

    if is_empty(&wire) && !(keep_empty && wire.is_string()) {
        return None;
    }
    Some(wire)
}

/// Whole decimals go out as integers, everything else as a float.
fn decimal_to_wire(value: Decimal) -> Value {
    let value = value.normalize();
    if value.scale() == 0 {
        if let Some(n) = value.to_i64() {
            return Value::from(n);
        }
    }
    value
        .to_f64()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

fn strip_empty(raw: &Value) -> Option<Value> {
    let stripped = match raw {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter_map(|(k, v)| strip_empty(v).map(|v| (k.clone(), v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().filter_map(strip_empty).collect()),
        scalar => scalar.clone(),
    };
    (!is_empty(&stripped)).then_some(stripped)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
