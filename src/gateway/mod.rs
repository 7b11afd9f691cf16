//! Upstream AI gateway forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! raw client body
//!     → chat::ConversationRequest (parse, normalize)
//!     → payload.rs (model directive, max_tokens, stream = true)
//!     → endpoint.rs (URL derived from GatewayConfig)
//!     → forwarder.rs (single POST)
//!     → Ok(UpstreamResponse) | Err(ForwardError)
//! ```
//!
//! # Design Decisions
//! - The forwarder never builds client-facing HTTP responses; the http
//!   layer translates ForwardError kinds into fixed statuses
//! - No retries and no timeout at this layer
//! - Upstream error bodies are logged, never returned

pub mod endpoint;
pub mod error;
pub mod forwarder;
pub mod payload;

pub use endpoint::endpoint_url;
pub use error::ForwardError;
pub use forwarder::{Forwarder, UpstreamResponse};
pub use payload::UpstreamPayload;
