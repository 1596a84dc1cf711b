//! Entity schemas for every payload the core reads or writes.
//!
//! Each schema is a lazily-built `&'static EntitySchema`. Outbound renames
//! (`product` → `Product`, `instrument` → `Instrument`, ...) are declared on
//! the owning field with `wire_key`; inbound case variants come for free from
//! the default aliases.

pub mod accounts;
pub mod market;
pub mod messages;
pub mod orders;

use serde_json::{Map, Value};

pub use accounts::{
    account, account_list_response, account_portfolio, balance_computed, balance_response,
    portfolio_response, position, real_time_values,
};
pub use market::{quote_data, quote_detail, quote_response};
pub use messages::{message, unwrap_messages};
pub use orders::{
    cancel_order_request, cancel_order_response, instrument, order, order_detail, order_id_ref,
    orders_response, place_order_request, place_order_response, preview_id,
    preview_order_request, preview_order_response, product,
};

/// Collapse a `{"Outer": {"Inner": x}}` wrapper into `{"Outer": x}`.
///
/// Either key may appear with its first letter in either case. The result is
/// always stored under `outer` exactly as given. A wrapper without the inner
/// key is left alone.
pub(crate) fn collapse_wrapper(raw: &mut Map<String, Value>, outer: &str, inner: &str) {
    let Some(key) = find_key(raw, outer) else {
        return;
    };
    let Some(Value::Object(wrapper)) = raw.get(&key) else {
        return;
    };
    let Some(inner_key) = find_key(wrapper, inner) else {
        return;
    };
    let unwrapped = wrapper.get(&inner_key).cloned().unwrap_or(Value::Null);
    raw.remove(&key);
    raw.insert(outer.to_string(), unwrapped);
}

/// The key present in `map` that matches `name` up to the case of its first letter.
fn find_key(map: &Map<String, Value>, name: &str) -> Option<String> {
    map.keys()
        .find(|key| {
            key.len() == name.len()
                && key.get(1..) == name.get(1..)
                && key
                    .chars()
                    .next()
                    .zip(name.chars().next())
                    .is_some_and(|(a, b)| a.eq_ignore_ascii_case(&b))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn collapses_either_casing() {
        let mut raw = object(json!({"messages": {"message": [{"code": 1}]}}));
        collapse_wrapper(&mut raw, "Messages", "Message");
        assert_eq!(Value::Object(raw), json!({"Messages": [{"code": 1}]}));
    }

    #[test]
    fn leaves_unwrapped_lists_alone() {
        let mut raw = object(json!({"Messages": [{"code": 1}]}));
        collapse_wrapper(&mut raw, "Messages", "Message");
        assert_eq!(Value::Object(raw), json!({"Messages": [{"code": 1}]}));

        let mut raw = object(json!({"other": 1}));
        collapse_wrapper(&mut raw, "Messages", "Message");
        assert_eq!(Value::Object(raw), json!({"other": 1}));
    }
}
