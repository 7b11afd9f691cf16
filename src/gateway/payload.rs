//! Upstream request body.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chat::ChatMessage;
use crate::config::{ChatConfig, GatewayConfig};
use crate::gateway::endpoint::dynamic_model;

/// JSON body posted to the gateway's chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamPayload {
    /// `dynamic/{route}` directive, not a literal model id.
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    /// Always true; passthrough relies on a streamed upstream body.
    pub stream: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl UpstreamPayload {
    pub fn new(gateway: &GatewayConfig, chat: &ChatConfig, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: dynamic_model(gateway),
            messages,
            max_tokens: chat.max_tokens,
            stream: true,
            metadata: chat.metadata.clone(),
        }
    }
}
