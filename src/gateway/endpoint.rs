//! Upstream endpoint construction.

use crate::config::GatewayConfig;

/// Build the gateway's OpenAI-compatible chat completions URL.
///
/// A pure function of the route configuration:
/// `{base}/v1/{account_id}/{gateway_name}/compat/chat/completions`.
pub fn endpoint_url(config: &GatewayConfig) -> String {
    format!(
        "{}/v1/{}/{}/compat/chat/completions",
        config.base_url.trim_end_matches('/'),
        config.account_id,
        config.gateway_name,
    )
}

/// The `model` routing directive selecting a dynamic route on the gateway.
pub fn dynamic_model(config: &GatewayConfig) -> String {
    format!("dynamic/{}", config.dynamic_route_name)
}
