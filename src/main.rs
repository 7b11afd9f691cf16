//! Edge chat router.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 EDGE ROUTER                    │
//!                        │                                                │
//!   Client Request       │  ┌─────────┐    ┌──────────┐    ┌───────────┐  │
//!   ─────────────────────┼─▶│  http   │───▶│ routing  │───▶│  assets   │  │
//!                        │  │ server  │    │ classify │    │ (ServeDir)│  │
//!                        │  └─────────┘    └────┬─────┘    └───────────┘  │
//!                        │                      │ POST /api/chat          │
//!                        │                      ▼                         │
//!   Client Response      │  ┌──────────┐   ┌───────────┐                  │
//!   ◀────────────────────┼──│ response │◀──│  gateway  │◀─────────────────┼──── AI Gateway
//!                        │  │passthru/ │   │ forwarder │──────────────────┼───▶ (stream)
//!                        │  │ errors   │   └───────────┘                  │
//!                        │  └──────────┘                                  │
//!                        │  config · observability · lifecycle            │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_chat_router::config::{load_config, load_from_env};
use edge_chat_router::observability::{logging, metrics};
use edge_chat_router::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "edge-chat-router")]
#[command(about = "Static assets plus streamed chat forwarding to an AI gateway", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults and environment variables apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_from_env()?,
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);
    tracing::info!("edge-chat-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        gateway = ?config.gateway,
        max_tokens = config.chat.max_tokens,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, stop).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
