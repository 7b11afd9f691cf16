//! Response handling and error translation.
//!
//! # Responsibilities
//! - Relay a successful upstream response to the client
//! - Map forwarding failures to fixed client-facing responses
//!
//! # Design Decisions
//! - Streaming responses avoid buffering the entire body
//! - Hop-by-hop headers stripped; they describe the upstream connection
//! - Every upstream failure surfaces as 500 with a generic `{"error": ...}`;
//!   upstream bodies and transport errors stay in the logs

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::gateway::{ForwardError, UpstreamResponse};

/// Client-facing message when no upstream response was obtained.
pub const CONNECTION_FAILURE_MESSAGE: &str = "Failed to connect to Gateway.";

const HOP_BY_HOP: [header::HeaderName; 7] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Relay upstream status, headers and body stream to the client.
///
/// The body is polled chunk by chunk as the client connection accepts data;
/// if the client goes away the stream is dropped and the upstream read ends.
pub fn passthrough(upstream: UpstreamResponse) -> Response {
    let (status, mut headers, stream) = upstream.into_parts();
    strip_hop_by_hop(&mut headers);

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Translate a forwarding failure into the client's 500 response.
pub fn error_response(err: &ForwardError) -> Response {
    let message = match err {
        ForwardError::Rejected { status, .. } => format!("AI service failed: {}", status),
        ForwardError::Unreachable(_) => CONNECTION_FAILURE_MESSAGE.to_string(),
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// 405 for the chat endpoint hit with anything but POST.
pub fn method_not_allowed() -> Response {
    let mut response = (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("POST"));
    response
}

/// 404 for unknown API paths.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_rejected_maps_to_500() {
        let err = ForwardError::Rejected {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "provider quota detail".into(),
        };
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("AI service failed"));
        assert!(!message.contains("provider quota detail"));
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_method_not_allowed_and_not_found() {
        let response = method_not_allowed();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "POST");
        let bytes = axum::body::to_bytes(response.into_body(), 64).await.unwrap();
        assert_eq!(&bytes[..], b"Method not allowed");

        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), 64).await.unwrap();
        assert_eq!(&bytes[..], b"Not found");
    }

    #[test]
    fn test_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/event-stream"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert("cf-aig-log-id", HeaderValue::from_static("abc"));

        strip_hop_by_hop(&mut headers);

        assert_eq!(headers.len(), 2);
        assert!(headers.contains_key(header::CONTENT_TYPE));
        assert!(headers.contains_key("cf-aig-log-id"));
    }
}
