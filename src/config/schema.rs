//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream AI gateway route configuration.
    pub gateway: GatewayConfig,

    /// Chat forwarding settings.
    pub chat: ChatConfig,

    /// Static asset settings.
    pub assets: AssetsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// Route configuration for the upstream gateway.
///
/// Fixed at startup and read-only for the lifetime of the process. Derives the
/// upstream endpoint URL and the `dynamic/{name}` routing directive.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway origin, without the `/v1/...` path.
    pub base_url: String,

    /// Account that owns the gateway.
    pub account_id: String,

    /// Gateway identifier within the account.
    pub gateway_name: String,

    /// Dynamic route configured on the gateway.
    pub dynamic_route_name: String,

    /// Bearer credential for authenticated gateways.
    /// Prefer the `GATEWAY_API_TOKEN` environment variable over the file.
    pub api_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gateway.ai.cloudflare.com".to_string(),
            account_id: String::new(),
            gateway_name: String::new(),
            dynamic_route_name: String::new(),
            api_token: None,
        }
    }
}

// Hand-written so the credential never reaches a log line.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .field("gateway_name", &self.gateway_name)
            .field("dynamic_route_name", &self.dynamic_route_name)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Chat forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatConfig {
    /// System message prepended to conversations that carry none.
    pub system_prompt: String,

    /// Upper bound on upstream generation length.
    pub max_tokens: u32,

    /// Static annotations sent upstream for logging/routing.
    pub metadata: BTreeMap<String, String>,

    /// Largest request body read from the client, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("source".to_string(), "website_frontend".to_string());
        metadata.insert("user_tier".to_string(), "pro".to_string());

        Self {
            system_prompt:
                "You are a helpful, friendly assistant. Provide concise and accurate responses."
                    .to_string(),
            max_tokens: 1024,
            metadata,
            max_body_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory served for every non-API path.
    pub directory: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            directory: "public".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
