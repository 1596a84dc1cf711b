//! Schema-driven raw → entity mapping.
//!
//! Hydration is lenient: structurally unexpected nodes degrade to defaults
//! and never fail the whole response.

use std::borrow::Cow;

use serde_json::{Map, Value};

use super::entity::{Entity, FieldValue, decimal_from_str};
use super::normalize::normalize;
use super::schema::{EntitySchema, FieldDescriptor, FieldKind};
use super::temporal::TemporalParser;

/// Hydrate `raw` against `schema` with the default temporal parser.
#[must_use]
pub fn hydrate(schema: &'static EntitySchema, raw: &Value) -> Entity {
    Hydrator::default().hydrate(schema, raw)
}

/// Reusable hydration engine.
#[derive(Debug, Clone, Default)]
pub struct Hydrator {
    temporal: TemporalParser,
}

impl Hydrator {
    /// Create a hydrator with a specific temporal parser.
    #[must_use]
    pub const fn new(temporal: TemporalParser) -> Self {
        Self { temporal }
    }

    /// The temporal parser in use.
    #[must_use]
    pub const fn temporal(&self) -> &TemporalParser {
        &self.temporal
    }

    /// Map a raw node onto a fresh entity.
    ///
    /// Non-object input yields an entity with no stored values.
    #[must_use]
    pub fn hydrate(&self, schema: &'static EntitySchema, raw: &Value) -> Entity {
        let mut entity = Entity::new(schema);
        let Value::Object(map) = raw else {
            if !raw.is_null() {
                tracing::trace!(schema = schema.name(), "Expected an object, got a scalar or list");
            }
            return entity;
        };

        let prepared: Cow<'_, Map<String, Value>> = match schema.pre_hydrate() {
            Some(hook) => {
                let mut owned = map.clone();
                hook(&mut owned);
                Cow::Owned(owned)
            }
            None => Cow::Borrowed(map),
        };

        for descriptor in schema.descriptors() {
            // First alias present wins; aliases are never merged
            let Some(raw_value) = descriptor
                .aliases()
                .iter()
                .find_map(|alias| prepared.get(alias.as_str()))
            else {
                continue;
            };

            let value = self.resolve(descriptor, raw_value);
            if !value.is_null() {
                entity.set(descriptor.name(), value);
            }
        }

        if let Some(hook) = schema.post_hydrate() {
            hook(&prepared, &mut entity);
        }

        entity
    }

    fn resolve(&self, descriptor: &FieldDescriptor, raw: &Value) -> FieldValue {
        match descriptor.kind() {
            FieldKind::String => string_value(raw),
            FieldKind::Int => int_value(raw),
            FieldKind::Float => float_value(raw),
            FieldKind::Bool => bool_value(raw),
            FieldKind::Temporal => self
                .temporal
                .parse(raw)
                .map_or(FieldValue::Null, FieldValue::Temporal),
            FieldKind::Entity(schema) => FieldValue::Entity(Box::new(self.hydrate(schema(), raw))),
            FieldKind::List(schema) => FieldValue::List(
                normalize(raw)
                    .iter()
                    .map(|item| self.hydrate(schema(), item))
                    .collect(),
            ),
        }
    }
}

/// Empty containers are how an absent string decodes; read them as `""`.
fn string_value(raw: &Value) -> FieldValue {
    match raw {
        Value::Array(items) if items.is_empty() => FieldValue::String(String::new()),
        Value::Object(map) if map.is_empty() => FieldValue::String(String::new()),
        Value::String(s) => FieldValue::String(s.clone()),
        Value::Number(n) => FieldValue::String(n.to_string()),
        Value::Bool(b) => FieldValue::String(b.to_string()),
        Value::Null => FieldValue::Null,
        Value::Array(_) | Value::Object(_) => FieldValue::Raw(raw.clone()),
    }
}

fn int_value(raw: &Value) -> FieldValue {
    let parsed = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.map_or(FieldValue::Null, FieldValue::Int)
}

fn float_value(raw: &Value) -> FieldValue {
    let parsed = match raw {
        Value::Number(n) => decimal_from_str(&n.to_string()),
        Value::String(s) => decimal_from_str(s),
        _ => None,
    };
    parsed.map_or(FieldValue::Null, FieldValue::Float)
}

/// `"true"`/`"false"` in any case coerce; anything else passes through.
fn bool_value(raw: &Value) -> FieldValue {
    match raw {
        Value::String(s) if s.eq_ignore_ascii_case("true") => FieldValue::Bool(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => FieldValue::Bool(false),
        other => FieldValue::from_raw(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_schema;
    use rust_decimal_macros::dec;
    use serde_json::json;

    entity_schema! {
        fn leaf() => EntitySchema::new("Leaf").fields([
            FieldDescriptor::string("symbol"),
            FieldDescriptor::int("count"),
        ])
    }

    entity_schema! {
        fn parent() => EntitySchema::new("Parent").fields([
            FieldDescriptor::string("accountId").alias("acctId"),
            FieldDescriptor::string("note").nullable(),
            FieldDescriptor::int("quantity"),
            FieldDescriptor::float("price"),
            FieldDescriptor::bool("allOrNone"),
            FieldDescriptor::temporal("placedTime"),
            FieldDescriptor::entity("product", leaf),
            FieldDescriptor::list("items", leaf),
        ])
    }

    fn uppercase_symbol(_raw: &Map<String, Value>, entity: &mut Entity) {
        if let Some(symbol) = entity.str("symbol").map(str::to_uppercase) {
            entity.set("symbol", symbol);
        }
    }

    fn rename_ticker(raw: &mut Map<String, Value>) {
        if let Some(ticker) = raw.remove("ticker") {
            raw.insert("symbol".to_string(), ticker);
        }
    }

    entity_schema! {
        fn hooked() => EntitySchema::new("Hooked")
            .field(FieldDescriptor::string("symbol"))
            .with_pre_hydrate(rename_ticker)
            .with_post_hydrate(uppercase_symbol)
    }

    #[test]
    fn resolves_aliases_in_precedence_order() {
        let entity = hydrate(parent(), &json!({"AccountId": "B", "acctId": "C"}));
        assert_eq!(entity.str("accountId"), Some("B"));

        let entity = hydrate(parent(), &json!({"accountId": "A", "AccountId": "B"}));
        assert_eq!(entity.str("accountId"), Some("A"));

        let entity = hydrate(parent(), &json!({"acctId": "C"}));
        assert_eq!(entity.str("accountId"), Some("C"));
    }

    #[test]
    fn absent_fields_keep_defaults() {
        let entity = hydrate(parent(), &json!({}));
        assert_eq!(entity.str("accountId"), Some(""));
        assert_eq!(entity.str("note"), None);
        assert_eq!(entity.int("quantity"), Some(0));
        assert_eq!(entity.bool("allOrNone"), Some(false));
        assert!(entity.temporal("placedTime").is_none());
        assert!(entity.entity("product").is_none());
        assert!(entity.list("items").is_empty());
        assert!(entity.is_empty());
    }

    #[test]
    fn empty_container_string_is_empty_string() {
        let entity = hydrate(parent(), &json!({"accountId": [], "note": {}}));
        assert_eq!(entity.get("accountId"), Some(&FieldValue::String(String::new())));
        assert_eq!(entity.str("note"), Some(""));
    }

    #[test]
    fn bool_strings_coerce_and_others_pass_through() {
        let entity = hydrate(parent(), &json!({"allOrNone": "TRUE"}));
        assert_eq!(entity.bool("allOrNone"), Some(true));

        let entity = hydrate(parent(), &json!({"allOrNone": "False"}));
        assert_eq!(entity.bool("allOrNone"), Some(false));

        let entity = hydrate(parent(), &json!({"allOrNone": true}));
        assert_eq!(entity.bool("allOrNone"), Some(true));

        let entity = hydrate(parent(), &json!({"allOrNone": "yes"}));
        assert_eq!(entity.get("allOrNone"), Some(&FieldValue::String("yes".to_string())));
    }

    #[test]
    fn numbers_coerce_leniently() {
        let entity = hydrate(parent(), &json!({"quantity": "12", "price": "169.25"}));
        assert_eq!(entity.int("quantity"), Some(12));
        assert_eq!(entity.decimal("price"), Some(dec!(169.25)));

        let entity = hydrate(parent(), &json!({"quantity": "lots", "price": 10.5}));
        assert!(!entity.contains("quantity"));
        assert_eq!(entity.int("quantity"), Some(0));
        assert_eq!(entity.decimal("price"), Some(dec!(10.5)));
    }

    #[test]
    fn temporal_fields_delegate_to_parser() {
        let entity = hydrate(parent(), &json!({"placedTime": 1_700_000_000_000_i64}));
        assert!(entity.temporal("placedTime").is_some());

        let entity = hydrate(parent(), &json!({"placedTime": "garbage"}));
        assert!(entity.temporal("placedTime").is_none());
    }

    #[test]
    fn empty_nested_map_creates_entity_with_defaults() {
        let entity = hydrate(parent(), &json!({"Product": {}}));
        let product = entity.entity("product").unwrap();
        assert_eq!(product.str("symbol"), Some(""));
    }

    #[test]
    fn single_list_item_is_normalized() {
        let entity = hydrate(parent(), &json!({"items": {"symbol": "FB", "count": 2}}));
        let items = entity.list("items");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].str("symbol"), Some("FB"));
        assert_eq!(items[0].int("count"), Some(2));

        let entity = hydrate(parent(), &json!({"Items": [{"symbol": "A"}, {"symbol": "B"}]}));
        assert_eq!(entity.list("items").len(), 2);
    }

    #[test]
    fn non_object_input_yields_empty_entity() {
        assert!(hydrate(parent(), &json!([1, 2])).is_empty());
        assert!(hydrate(parent(), &json!("x")).is_empty());
    }

    #[test]
    fn hooks_run_around_generic_resolution() {
        let raw = json!({"ticker": "fb"});
        let entity = hydrate(hooked(), &raw);
        assert_eq!(entity.str("symbol"), Some("FB"));
        // input untouched
        assert_eq!(raw, json!({"ticker": "fb"}));
    }
}
