//! Crease Gateway Server
//!
//! HTTP ingestion gateway for cricket delivery (ball-by-ball) events:
//! validates each submission, appends it to the event store, and optionally
//! returns the next expected event from the prediction service.

use clap::Parser;
use crease_client::{HttpEventStore, HttpNextBallClient};
use crease_server::config::GatewayConfig;
use crease_server::server::{build_router, run_server};
use crease_server::state::AppState;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Resolve configuration once; it is immutable for the process lifetime.
    let config = GatewayConfig::parse();

    tracing::info!("Starting crease-server v{}", env!("CARGO_PKG_VERSION"));

    // The event store handle is shared by every request-handling task.
    let event_store = HttpEventStore::new(config.event_store_url.clone());
    if !event_store.connect().await {
        anyhow::bail!(
            "unable to connect to the event store at {}",
            config.event_store_url
        );
    }
    tracing::info!("Connected to event store at {}", config.event_store_url);

    let next_ball = HttpNextBallClient::new(&config.next_ball_host, config.next_ball_port)
        .map_err(|e| {
            tracing::error!(error = %e, "Invalid next-ball service address");
            e
        })?;

    let state = AppState::new(Arc::new(event_store), Arc::new(next_ball));

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", config.listen);
    run_server(router, config.listen).await.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
