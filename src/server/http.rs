//! Streamable HTTP transport
//!
//! Mounts the protocol service at `/mcp` inside an axum router.

use super::ConversationServer;
use axum::{routing::get, Json, Router};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the HTTP router
pub fn create_router(server: ConversationServer, shutdown: &CancellationToken) -> Router {
    let config = StreamableHttpServerConfig {
        cancellation_token: shutdown.child_token(),
        ..Default::default()
    };
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        config,
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest_service("/mcp", service)
        .route("/version", get(get_version))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn get_version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Bind `addr` and serve until `shutdown` is cancelled
///
/// Bind failures are returned to the caller, which treats them as fatal.
pub async fn serve_http(
    server: ConversationServer,
    addr: SocketAddr,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let app = create_router(server, &shutdown);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Conversation tracker listening on /mcp");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
