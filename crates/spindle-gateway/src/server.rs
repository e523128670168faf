//! Gateway server - turn endpoint and health

use crate::turn::{run_turn, AppContext};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use spindle_core::TurnRequest;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Gateway configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub bind: BindMode,
}

fn default_port() -> u16 {
    8075
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: BindMode::default(),
        }
    }
}

/// Bind mode for the gateway
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    #[default]
    Loopback,
    Lan,
}

impl BindMode {
    pub fn to_addr(&self) -> &str {
        match self {
            BindMode::Loopback => "127.0.0.1",
            BindMode::Lan => "0.0.0.0",
        }
    }
}

pub async fn start_gateway(config: GatewayConfig, context: AppContext) -> anyhow::Result<()> {
    let context = Arc::new(context);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/turn", post(turn_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(context);

    let bind_addr: SocketAddr = format!("{}:{}", config.bind.to_addr(), config.port).parse()?;

    info!("spindle gateway v{} starting", env!("CARGO_PKG_VERSION"));
    info!("  listening on: {}", bind_addr);
    info!("  turn endpoint: http://{}/v1/turn", bind_addr);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            signal.cancel();
        }
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    Ok(())
}

async fn health_handler(State(context): State<Arc<AppContext>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "graphs": context.registry.list(),
    }))
}

/// One turn per call; the response is an SSE stream of wire events ending
/// in exactly one terminal event. A client disconnect drops the stream,
/// which tears down the whole producer chain.
async fn turn_handler(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<TurnRequest>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let events = run_turn(&context, request).map(|event| Event::default().json_data(&event));
    Sse::new(events).keep_alive(KeepAlive::default())
}
