//! Response message view.

use crate::domain::MessageType;
use crate::mapping::Entity;

/// One message attached to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Numeric code.
    pub code: i64,
    /// Text.
    pub description: String,
    /// Severity.
    pub message_type: MessageType,
}

impl Message {
    /// Read a message entity.
    #[must_use]
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            code: entity.int("code").unwrap_or_default(),
            description: entity.str("description").unwrap_or_default().to_string(),
            message_type: MessageType::parse(entity.str("type").unwrap_or_default()),
        }
    }

    /// Read every entry of a `messages` list field.
    #[must_use]
    pub fn list(owner: &Entity) -> Vec<Self> {
        owner.list("messages").iter().map(Self::from_entity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::hydrate;
    use crate::schemas;
    use serde_json::json;

    #[test]
    fn reads_code_text_and_type() {
        let entity = hydrate(
            schemas::message(),
            &json!({"code": "1026", "description": "Held", "type": "WARNING"}),
        );
        let message = Message::from_entity(&entity);
        assert_eq!(message.code, 1026);
        assert_eq!(message.description, "Held");
        assert_eq!(message.message_type, MessageType::Warning);
    }

    #[test]
    fn missing_fields_default() {
        let message = Message::from_entity(&hydrate(schemas::message(), &json!({})));
        assert_eq!(message.code, 0);
        assert_eq!(message.description, "");
        assert_eq!(message.message_type, MessageType::Info);
    }
}
