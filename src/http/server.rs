//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing)
//! - Serve static assets for non-API paths
//! - Hand chat requests to the Forwarder and translate its result
//! - Graceful shutdown

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::gateway::Forwarder;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::response::{error_response, method_not_allowed, not_found, passthrough};
use crate::observability::metrics;
use crate::routing::{classify, Disposition};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
    pub assets: ServeDir,
    pub max_body_bytes: usize,
}

/// HTTP server for the edge router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("edge-chat-router/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a server that forwards through the given HTTP client.
    pub fn with_client(config: RouterConfig, client: reqwest::Client) -> Self {
        let forwarder = Forwarder::new(config.gateway.clone(), config.chat.clone(), client);

        tracing::info!(
            endpoint = %forwarder.endpoint(),
            assets = %config.assets.directory,
            authenticated = config.gateway.api_token.is_some(),
            "Chat forwarder ready"
        );

        let state = AppState {
            forwarder: Arc::new(forwarder),
            assets: ServeDir::new(&config.assets.directory),
            max_body_bytes: config.chat.max_body_bytes,
        };

        let router = Self::build_router(state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |request: &Request<Body>| {
                            tracing::info_span!(
                                "request",
                                request_id = %request_id(request),
                                method = %request.method(),
                                path = %request.uri().path(),
                            )
                        },
                    ))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point; the routing table decides who owns the request.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    match classify(request.method(), request.uri().path()) {
        Disposition::Asset => serve_asset(state.assets, request).await,
        Disposition::Chat => chat_handler(&state, request).await,
        Disposition::MethodNotAllowed => method_not_allowed(),
        Disposition::NotFound => not_found(),
    }
}

async fn serve_asset(assets: ServeDir, request: Request<Body>) -> Response {
    match assets.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

async fn chat_handler(state: &AppState, request: Request<Body>) -> Response {
    // Unreadable or oversized bodies degrade to an empty conversation.
    let body = match axum::body::to_bytes(request.into_body(), state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read chat body, using empty conversation");
            Bytes::new()
        }
    };

    match state.forwarder.forward(body).await {
        Ok(upstream) => {
            tracing::info!(status = %upstream.status(), "Streaming gateway response");
            metrics::record_chat_request("forwarded");
            passthrough(upstream)
        }
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "Chat request failed");
            metrics::record_chat_request(err.kind());
            error_response(&err)
        }
    }
}
