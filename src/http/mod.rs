//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID + trace middleware)
//!     → routing::classify (asset | chat | 405 | 404)
//!     → ServeDir (assets) or gateway::Forwarder (chat)
//!     → response.rs (stream passthrough or error translation)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
