//! Conversation Tracker - goal, key point and summary tracking over MCP
//!
//! A small server that keeps per-conversation state in memory and steers
//! callers through an advisory phase state machine.

mod config;
mod error;
mod identity;
mod operations;
mod resources;
mod server;
mod state_machine;
mod store;
mod summarizer;

use config::{Config, Transport};
use server::ConversationServer;
use std::sync::Arc;
use store::ConversationStore;
use summarizer::TruncatingSummarizer;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging. Always stderr: stdout is the protocol channel on stdio.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conversation_tracker=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    let store = ConversationStore::new();
    let summarizer = Arc::new(TruncatingSummarizer::new(config.summary_max_chars));
    let server = ConversationServer::new(store, summarizer);

    tracing::info!(
        transport = ?config.transport,
        summary_max_chars = config.summary_max_chars,
        "Conversation tracker starting"
    );

    match config.transport {
        Transport::Stdio => server.run_stdio().await.inspect_err(|e| {
            tracing::error!(error = %e, "Stdio transport failed");
        })?,
        Transport::Http => {
            let shutdown = CancellationToken::new();
            tokio::spawn({
                let shutdown = shutdown.clone();
                async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        tracing::info!("Shutdown requested");
                    }
                    shutdown.cancel();
                }
            });

            let addr = config.http_addr();
            server::serve_http(server, addr, shutdown)
                .await
                .inspect_err(|e| {
                    tracing::error!(%addr, error = %e, "HTTP transport failed");
                })?;
        }
    }

    Ok(())
}
