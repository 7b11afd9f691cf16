//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Decide which handler owns a request from its method and path alone
//! - Return an explicit disposition for misses rather than a silent default
//!
//! # Design Decisions
//! - Stateless pure function (thread-safe without locks)
//! - Precedence: asset paths, then the chat endpoint, then API miss
//! - The request body is never touched here

use axum::http::Method;

/// Prefix reserved for API endpoints. Everything else is a static asset.
pub const API_PREFIX: &str = "/api/";

/// The chat forwarding endpoint.
pub const CHAT_PATH: &str = "/api/chat";

/// Where a request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Serve from the static asset directory, request untouched.
    Asset,
    /// Forward to the AI gateway.
    Chat,
    /// Chat endpoint hit with something other than POST.
    MethodNotAllowed,
    /// Unknown API path.
    NotFound,
}

/// Classify a request by method and path.
pub fn classify(method: &Method, path: &str) -> Disposition {
    if path == "/" || !path.starts_with(API_PREFIX) {
        return Disposition::Asset;
    }

    if path == CHAT_PATH {
        return if method == Method::POST {
            Disposition::Chat
        } else {
            Disposition::MethodNotAllowed
        };
    }

    Disposition::NotFound
}
