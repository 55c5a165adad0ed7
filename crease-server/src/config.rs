//! Gateway configuration.
//!
//! Resolved once at startup from flags and environment variables, then held
//! immutably for the process lifetime. Handlers never read the environment;
//! everything they need is injected through [`AppState`](crate::state).

use clap::Parser;
use std::net::SocketAddr;
use url::Url;

/// Crease - cricket delivery event ingestion gateway
#[derive(Parser, Debug, Clone)]
#[command(name = "crease-server")]
#[command(version, about, long_about = None)]
pub struct GatewayConfig {
    /// The address and port to listen on.
    #[arg(short, long, default_value = "0.0.0.0:4567")]
    pub listen: SocketAddr,

    /// Base URL of the append-only event store.
    #[arg(long, env = "EVENTSTORE_URL", default_value = "http://localhost:2113/")]
    pub event_store_url: Url,

    /// Host of the next-ball prediction service.
    #[arg(long, env = "NEXT_BALL_IP", default_value = "localhost")]
    pub next_ball_host: String,

    /// Port of the next-ball prediction service.
    #[arg(long, env = "NEXT_BALL_PORT", default_value_t = 3004)]
    pub next_ball_port: u16,
}
