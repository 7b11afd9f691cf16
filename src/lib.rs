//! Edge chat router library.
//!
//! Serves static assets for most paths and relays `POST /api/chat` to a
//! multi-provider AI gateway, streaming the gateway's response back untouched.

pub mod chat;
pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use gateway::{ForwardError, Forwarder};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
