//! Conversation types and normalization.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Speaker roles this router itself produces or inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message in a conversation.
///
/// Held as the caller's raw JSON element so it is forwarded verbatim: other
/// roles (`tool`, ...), structured content and extra fields all survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatMessage(Value);

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self(json!({ "role": role.as_str(), "content": content.into() }))
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// The `role` field, when the element is an object with a string role.
    pub fn role(&self) -> Option<&str> {
        self.0.get("role").and_then(Value::as_str)
    }

    pub fn is_system(&self) -> bool {
        self.role() == Some(Role::System.as_str())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ChatMessage {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// An ordered conversation as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationRequest {
    messages: Vec<ChatMessage>,
}

impl ConversationRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    /// Extract the `messages` field from a raw request body.
    ///
    /// Never fails: a body that is not a JSON object, or whose `messages` is
    /// missing or not an array, yields an empty conversation. Array elements
    /// are kept exactly as sent.
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(Value::Object(mut object)) = serde_json::from_slice::<Value>(body) else {
            tracing::debug!(body_len = body.len(), "Chat body is not a JSON object, using empty conversation");
            return Self::default();
        };

        match object.remove("messages") {
            Some(Value::Array(items)) => Self {
                messages: items.into_iter().map(ChatMessage::from).collect(),
            },
            Some(other) => {
                tracing::debug!(kind = json_kind(&other), "messages is not an array, using empty conversation");
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Returns true if any message carries the system role.
    pub fn has_system_message(&self) -> bool {
        self.messages.iter().any(ChatMessage::is_system)
    }

    /// Guarantee a system message is present.
    ///
    /// Prepends `system_prompt` only when no system message exists anywhere in
    /// the sequence; caller-supplied messages are never removed or reordered.
    pub fn normalize(mut self, system_prompt: &str) -> Self {
        if !self.has_system_message() {
            self.messages.insert(0, ChatMessage::system(system_prompt));
        }
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
