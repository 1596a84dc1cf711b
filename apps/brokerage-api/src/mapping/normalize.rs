//! Singular/plural normalization for XML-derived maps.
//!
//! The upstream XML-to-map decoding collapses a repeated element that occurs
//! exactly once into a bare object instead of a one-element list. Every
//! list-typed field runs its raw value through [`normalize`] before per-item
//! hydration.
//!
//! # Known limitation
//!
//! A genuinely sparse numeric-keyed object (`{"0": .., "2": ..}`) cannot be
//! told apart from a single associative item and normalizes to a singleton.
//! Upstream does not define what such data means, so it is left that way.

use serde_json::{Map, Value};

/// Normalize a raw node into an ordered list of items.
///
/// - `null` and `{}` yield an empty list.
/// - An array is returned as-is.
/// - An object keyed exactly `"0".."n-1"` yields its values in index order.
/// - Any other object, or a scalar, is wrapped as a single item.
#[must_use]
pub fn normalize(raw: &Value) -> Vec<Value> {
    match raw {
        Value::Null => Vec::new(),
        Value::Array(items) => items.clone(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        Value::Object(map) => indexed_items(map).unwrap_or_else(|| vec![raw.clone()]),
        scalar => vec![scalar.clone()],
    }
}

/// Returns the values of `map` in index order if its keys are exactly `0..n-1`.
fn indexed_items(map: &Map<String, Value>) -> Option<Vec<Value>> {
    let mut slots: Vec<Option<&Value>> = vec![None; map.len()];

    for (key, value) in map {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // "01" is a name, not an index
        if key.len() > 1 && key.starts_with('0') {
            return None;
        }
        let index: usize = key.parse().ok()?;
        *slots.get_mut(index)? = Some(value);
    }

    slots.into_iter().map(|slot| slot.cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_empty() {
        assert!(normalize(&Value::Null).is_empty());
    }

    #[test]
    fn empty_object_is_empty() {
        assert!(normalize(&json!({})).is_empty());
    }

    #[test]
    fn single_object_is_wrapped() {
        assert_eq!(normalize(&json!({"a": 1})), vec![json!({"a": 1})]);
    }

    #[test]
    fn list_is_unchanged() {
        let raw = json!([{"a": 1}, {"a": 2}]);
        assert_eq!(normalize(&raw), vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn empty_list_stays_empty() {
        assert!(normalize(&json!([])).is_empty());
    }

    #[test]
    fn contiguous_index_keys_become_list() {
        let raw = json!({"1": {"a": 2}, "0": {"a": 1}});
        assert_eq!(normalize(&raw), vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn sparse_index_keys_are_one_item() {
        let raw = json!({"0": {"a": 1}, "2": {"a": 3}});
        assert_eq!(normalize(&raw), vec![raw.clone()]);
    }

    #[test]
    fn zero_padded_keys_are_one_item() {
        let raw = json!({"00": 1});
        assert_eq!(normalize(&raw), vec![raw.clone()]);
    }

    #[test]
    fn scalar_is_wrapped() {
        assert_eq!(normalize(&json!(42)), vec![json!(42)]);
        assert_eq!(normalize(&json!("x")), vec![json!("x")]);
    }
}
