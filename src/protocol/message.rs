//! A2A message types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, lenient_vec};

/// A message in the A2A protocol
///
/// Outgoing messages always carry a role and a single text part. Messages
/// embedded in replies are decoded field by field: a malformed field is
/// dropped and a malformed part becomes an empty one in its position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role of the message sender
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Role>,

    /// Ordered content parts
    #[serde(default, deserialize_with = "lenient_vec")]
    pub parts: Vec<MessagePart>,

    /// Optional message identifier
    #[serde(
        rename = "messageId",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_id: Option<String>,

    /// Optional task identifier
    #[serde(
        rename = "taskId",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_id: Option<String>,

    /// Optional context identifier
    #[serde(
        rename = "contextId",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_id: Option<String>,

    /// Optional metadata for the message
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<HashMap<String, Value>>,
}

impl Message {
    /// Create a new message with a single text part
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            parts: vec![MessagePart::text(text)],
            message_id: None,
            task_id: None,
            context_id: None,
            metadata: None,
        }
    }

    /// Create a user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent message with text content
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }

    /// Add a metadata field to the message
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Set the message ID
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }

    /// The first content part, if any
    pub fn first_part(&self) -> Option<&MessagePart> {
        self.parts.first()
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from a user
    User,

    /// Message from an AI agent
    Agent,
}

/// Kind tag of a content part
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Text,
    File,
    Data,

    /// Any kind this client does not know about
    Other,
}

impl From<&str> for PartKind {
    fn from(kind: &str) -> Self {
        match kind {
            "text" => PartKind::Text,
            "file" => PartKind::File,
            "data" => PartKind::Data,
            _ => PartKind::Other,
        }
    }
}

impl<'de> Deserialize<'de> for PartKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let kind = String::deserialize(deserializer)?;
        Ok(PartKind::from(kind.as_str()))
    }
}

/// A content part of a message or artifact
///
/// The `kind` tag is sent on every outgoing part but is optional on decode,
/// since replies are not required to carry it (`{"text": "..."}` is valid).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessagePart {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<PartKind>,

    /// Text payload for text parts
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,

    /// File payload (URI or bytes), kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Value>,

    /// Structured data payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl MessagePart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some(PartKind::Text),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a data part
    pub fn data(data: Value) -> Self {
        Self {
            kind: Some(PartKind::Data),
            data: Some(data),
            ..Default::default()
        }
    }

    /// The text payload, if this part has one
    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_message_wire_shape() {
        let msg = Message::user("Hello, agent!");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(
            json,
            json!({
                "role": "user",
                "parts": [{"kind": "text", "text": "Hello, agent!"}]
            })
        );
    }

    #[test]
    fn test_part_without_kind_decodes() {
        let part: MessagePart = serde_json::from_value(json!({"text": "pong"})).unwrap();

        assert_eq!(part.kind, None);
        assert_eq!(part.as_text(), Some("pong"));
    }

    #[test]
    fn test_unknown_part_kind_decodes() {
        let part: MessagePart =
            serde_json::from_value(json!({"kind": "video", "uri": "x"})).unwrap();

        assert_eq!(part.kind, Some(PartKind::Other));
        assert_eq!(part.as_text(), None);
    }

    #[test]
    fn test_reply_message_without_role() {
        let msg: Message =
            serde_json::from_value(json!({"parts": [{"kind": "text", "text": "hi"}]})).unwrap();

        assert_eq!(msg.role, None);
        assert_eq!(msg.first_part().and_then(MessagePart::as_text), Some("hi"));
    }

    #[test]
    fn test_unknown_role_is_dropped() {
        let msg: Message = serde_json::from_value(json!({
            "role": "assistant",
            "parts": [{"text": "hi"}]
        }))
        .unwrap();

        assert_eq!(msg.role, None);
        assert_eq!(msg.parts.len(), 1);
    }

    #[test]
    fn test_bad_sibling_fields_keep_parts() {
        let msg: Message = serde_json::from_value(json!({
            "messageId": 7,
            "taskId": {"id": 1},
            "contextId": false,
            "metadata": "not a map",
            "parts": [{"text": "live"}]
        }))
        .unwrap();

        assert_eq!(msg.message_id, None);
        assert_eq!(msg.task_id, None);
        assert_eq!(msg.context_id, None);
        assert_eq!(msg.metadata, None);
        assert_eq!(msg.first_part().and_then(MessagePart::as_text), Some("live"));
    }

    #[test]
    fn test_malformed_part_keeps_position() {
        let msg: Message = serde_json::from_value(json!({
            "parts": [{"text": "pong"}, 5, {"kind": 3, "text": "third"}]
        }))
        .unwrap();

        assert_eq!(msg.parts.len(), 3);
        assert_eq!(msg.parts[0].as_text(), Some("pong"));
        assert_eq!(msg.parts[1], MessagePart::default());
        assert_eq!(msg.parts[2].kind, None);
        assert_eq!(msg.parts[2].as_text(), Some("third"));
    }

    #[test]
    fn test_message_with_metadata() {
        let msg = Message::agent("Test").with_metadata("key", json!("value"));

        assert_eq!(msg.role, Some(Role::Agent));
        assert!(msg.metadata.is_some());
    }
}
