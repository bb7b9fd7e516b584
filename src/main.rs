//! Local forwarding proxy for the Trading 212 API.
//!
//! Browser clients call this process on loopback; it attaches the basic-auth
//! header built from `API_KEY`/`API_SECRET` and relays `/equity/...` requests
//! to the live or demo API selected by `ENVIRONMENT`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use t212_proxy::config::{resolve_config, Overrides, SystemEnv};
use t212_proxy::http::HttpServer;
use t212_proxy::lifecycle::Shutdown;
use t212_proxy::observability::init_logging;

#[derive(Parser)]
#[command(name = "t212-proxy")]
#[command(about = "Same-origin forwarding proxy for the Trading 212 API", long_about = None)]
struct Cli {
    /// Optional TOML config file (listener, upstream URLs, timeouts).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PORT and config).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    tracing::info!("t212-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let overrides = Overrides {
        config_path: cli.config,
        host: cli.host,
        port: cli.port,
    };
    let config = resolve_config(&overrides, &SystemEnv)?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        live_url = %config.upstream.live_url,
        demo_url = %config.upstream.demo_url,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, Arc::new(SystemEnv))?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
