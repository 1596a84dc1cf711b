//! Response messages.
//!
//! The brokerage wraps message lists one level deep
//! (`{"Messages": {"Message": [...]}}`), sometimes lower-cased. Schemas that
//! carry messages install [`unwrap_messages`] as their pre-hydrate hook and
//! declare a plain `messages` list.

use serde_json::{Map, Value};

use super::collapse_wrapper;
use crate::entity_schema;
use crate::mapping::{EntitySchema, FieldDescriptor};

entity_schema! {
    /// One message: code, text and severity.
    pub fn message() => EntitySchema::new("Message").fields([
        FieldDescriptor::string("description"),
        FieldDescriptor::int("code"),
        FieldDescriptor::string("type"),
    ])
}

/// Pre-hydrate hook: `Messages.Message` → `Messages`.
pub fn unwrap_messages(raw: &mut Map<String, Value>) {
    collapse_wrapper(raw, "Messages", "Message");
}

/// The standard `messages` list field.
pub(crate) fn messages_field() -> FieldDescriptor {
    FieldDescriptor::list("messages", message).wire_key("Messages")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::hydrate;
    use serde_json::json;

    entity_schema! {
        fn carrier() => EntitySchema::new("Carrier")
            .field(messages_field())
            .with_pre_hydrate(unwrap_messages)
    }

    #[test]
    fn single_wrapped_message_becomes_one_item() {
        let raw = json!({
            "Messages": {"Message": {"description": "Order held", "code": 1026, "type": "WARNING"}}
        });
        let entity = hydrate(carrier(), &raw);
        let messages = entity.list("messages");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].int("code"), Some(1026));
        assert_eq!(messages[0].str("type"), Some("WARNING"));
    }

    #[test]
    fn lower_case_wrapper_with_list() {
        let raw = json!({"messages": {"message": [{"code": 1}, {"code": 2}]}});
        assert_eq!(hydrate(carrier(), &raw).list("messages").len(), 2);
    }

    #[test]
    fn absent_messages_are_empty() {
        assert!(hydrate(carrier(), &json!({})).list("messages").is_empty());
    }
}
