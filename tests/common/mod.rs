//! Shared utilities for integration tests.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use futures_util::StreamExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use edge_chat_router::{HttpServer, RouterConfig, Shutdown};

/// What the mock gateway answers with.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Reply {
    /// 200 `text/event-stream`, chunks sent one at a time.
    Stream(Vec<&'static str>),
    /// Fixed status and plain-text body.
    Status(u16, &'static str),
    /// 200 stream that sends `first`, then waits for `control.release`
    /// before sending `last` and ending.
    Held {
        first: &'static str,
        last: &'static str,
        control: Arc<StreamControl>,
    },
    /// 200 stream that repeats `heartbeat` until the connection goes away.
    Endless {
        heartbeat: &'static str,
        control: Arc<StreamControl>,
    },
}

/// Lets a test steer a mock stream and observe when it is dropped.
#[allow(dead_code)]
#[derive(Default)]
pub struct StreamControl {
    pub release: Notify,
    pub dropped: Notify,
}

#[allow(dead_code)]
impl StreamControl {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// Signals `dropped` when the mock response body is dropped.
#[allow(dead_code)]
struct DropSignal(Arc<StreamControl>);

impl Drop for DropSignal {
    fn drop(&mut self) {
        self.0.dropped.notify_one();
    }
}

/// A request the mock gateway received.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Captured {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Handle to a running mock gateway.
#[derive(Clone)]
pub struct MockGateway {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
}

#[allow(dead_code)]
impl MockGateway {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> Captured {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream call");
        requests.into_iter().next().unwrap()
    }
}

/// Start a mock gateway on an ephemeral port.
#[allow(dead_code)]
pub async fn start_mock_gateway(reply: Reply) -> MockGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));

    let sink = captured.clone();
    let app = Router::new().fallback(move |request: Request<Body>| {
        let sink = sink.clone();
        let reply = reply.clone();
        async move {
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, 1024 * 1024).await.unwrap();
            sink.lock().unwrap().push(Captured {
                path: parts.uri.path().to_string(),
                headers: parts.headers,
                body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            });
            respond(reply)
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockGateway { addr, captured }
}

fn event_stream(body: Body) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/event-stream")
        .header("cf-aig-log-id", "log-123")
        .body(body)
        .unwrap()
}

fn respond(reply: Reply) -> Response {
    match reply {
        Reply::Stream(chunks) => {
            let stream = futures_util::stream::iter(chunks).then(|chunk| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok::<_, Infallible>(chunk)
            });
            event_stream(Body::from_stream(stream))
        }
        Reply::Status(code, body) => {
            (StatusCode::from_u16(code).unwrap(), body).into_response()
        }
        Reply::Held { first, last, control } => {
            let state = (0u8, DropSignal(control));
            let stream = futures_util::stream::unfold(state, move |(step, signal)| async move {
                match step {
                    0 => Some((Ok::<_, Infallible>(first), (1, signal))),
                    1 => {
                        signal.0.release.notified().await;
                        Some((Ok(last), (2, signal)))
                    }
                    _ => None,
                }
            });
            event_stream(Body::from_stream(stream))
        }
        Reply::Endless { heartbeat, control } => {
            let stream = futures_util::stream::unfold(DropSignal(control), move |signal| async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Some((Ok::<_, Infallible>(heartbeat), signal))
            });
            event_stream(Body::from_stream(stream))
        }
    }
}

/// Address that refuses connections.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Router configuration pointed at `base_url`, serving the repo's `public/`.
pub fn test_config(base_url: String) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.gateway.base_url = base_url;
    config.gateway.account_id = "acct".into();
    config.gateway.gateway_name = "gw".into();
    config.gateway.dynamic_route_name = "hybrid_split".into();
    config.chat.system_prompt = "default system prompt".into();
    config.assets.directory = concat!(env!("CARGO_MANIFEST_DIR"), "/public").into();
    config
}

fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Build a server without binding, for in-process requests.
#[allow(dead_code)]
pub fn build_server(config: RouterConfig) -> HttpServer {
    HttpServer::with_client(config, direct_client())
}

/// Start the router on an ephemeral port.
#[allow(dead_code)]
pub async fn start_router(config: RouterConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = build_server(config);
    let stop = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    (addr, shutdown)
}

/// Client for talking to the router under test.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    direct_client()
}
