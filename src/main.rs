//! MoodLens edge router.
//!
//! Serves the SPA bundle and forwards `/api/*` to the model or core origin.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 MOODLENS EDGE                  │
//!   Client Request       │  ┌────────┐    ┌──────────┐                    │
//!   ─────────────────────┼─▶│ server │───▶│ routing  │── archive ──┐      │
//!                        │  └────────┘    │ classify │── assets ───┤      │
//!                        │                └────┬─────┘             ▼      │
//!                        │                     │ proxy      ┌──────────┐  │
//!                        │                     ▼            │  asset   │  │
//!                        │              ┌────────────┐      │  store   │  │
//!                        │              │  forward   │      └──────────┘  │
//!                        │              │ sanitize + │                    │
//!                        │              │  rewrite   │                    │
//!                        │              └─────┬──────┘                    │
//!                        └────────────────────┼───────────────────────────┘
//!                                             ▼
//!                              API_ORIGIN  or  CORE_ORIGIN
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use moodlens_edge::config::load_config;
use moodlens_edge::http::HttpServer;
use moodlens_edge::lifecycle::{signals, Shutdown};
use moodlens_edge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "moodlens-edge")]
#[command(about = "Edge router for the MoodLens frontend", long_about = None)]
struct Args {
    /// TOML configuration file; environment variables override it.
    #[arg(short, long, env = "EDGE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("moodlens-edge v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_origin = config.origins.effective_api().unwrap_or("<unset>"),
        core_origin = config.origins.effective_core().unwrap_or("<unset>"),
        upstream_timeout_secs = config.timeouts.upstream_secs,
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
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::termination_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
