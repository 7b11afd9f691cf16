//! Chat request forwarding to the AI gateway.
//!
//! # Responsibilities
//! - Normalize the caller's conversation
//! - Build the upstream URL, headers and JSON payload
//! - Issue exactly one upstream POST (no retries, no fallback route)
//! - Hand back the upstream stream untouched, or a typed failure

use std::time::Instant;

use bytes::Bytes;
use futures_util::Stream;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

use crate::chat::ConversationRequest;
use crate::config::{ChatConfig, GatewayConfig};
use crate::gateway::endpoint::endpoint_url;
use crate::gateway::error::ForwardError;
use crate::gateway::payload::UpstreamPayload;
use crate::observability::metrics;

/// A successful upstream response whose body has not been read yet.
#[derive(Debug)]
pub struct UpstreamResponse {
    inner: reqwest::Response,
}

impl UpstreamResponse {
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Split into status, headers and the chunked body stream.
    ///
    /// Chunks are pulled from the connection only as the stream is polled.
    pub fn into_parts(
        self,
    ) -> (
        StatusCode,
        HeaderMap,
        impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) {
        let status = self.inner.status();
        let headers = self.inner.headers().clone();
        (status, headers, self.inner.bytes_stream())
    }
}

/// Relays chat conversations to a single gateway dynamic route.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    gateway: GatewayConfig,
    chat: ChatConfig,
    endpoint: String,
}

impl Forwarder {
    pub fn new(gateway: GatewayConfig, chat: ChatConfig, client: Client) -> Self {
        let endpoint = endpoint_url(&gateway);
        Self {
            client,
            gateway,
            chat,
            endpoint,
        }
    }

    /// Upstream URL every request is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Normalize a raw client body into the payload sent upstream.
    pub fn build_payload(&self, body: &[u8]) -> UpstreamPayload {
        let conversation = ConversationRequest::from_body(body).normalize(&self.chat.system_prompt);
        UpstreamPayload::new(&self.gateway, &self.chat, conversation.into_messages())
    }

    /// Forward a raw client body to the gateway.
    pub async fn forward(&self, body: Bytes) -> Result<UpstreamResponse, ForwardError> {
        let payload = self.build_payload(&body);

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %payload.model,
            messages = payload.messages.len(),
            "Forwarding chat request"
        );

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload);
        if let Some(token) = &self.gateway.api_token {
            request = request.bearer_auth(token);
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::error!(endpoint = %self.endpoint, error = %e, "Failed to connect to gateway");
            ForwardError::Unreachable(e)
        })?;
        metrics::record_upstream_latency(start);

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) => text,
                Err(e) => format!("<unreadable error body: {}>", e),
            };
            tracing::error!(
                endpoint = %self.endpoint,
                status = %status,
                body = %body,
                "Gateway returned error status"
            );
            return Err(ForwardError::Rejected { status, body });
        }

        Ok(UpstreamResponse { inner: response })
    }
}
