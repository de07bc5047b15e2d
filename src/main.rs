//! link-gateway
//!
//! HTTP/JSON front door for the users and links services.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────────┐
//!                      │                   LINK GATEWAY                     │
//!   Client Request     │  ┌─────────┐   ┌──────────┐   ┌───────────────┐   │
//!   ───────────────────┼─▶│  http   │──▶│  decode  │──▶│  api handler  │   │
//!                      │  │ server  │   │ (strict) │   │ users / links │   │
//!                      │  └─────────┘   └──────────┘   └──────┬────────┘   │
//!                      │                                      │ deadline   │
//!                      │                                      ▼            │
//!   Client Response    │  ┌──────────┐  ┌───────────┐  ┌───────────────┐   │
//!   ◀──────────────────┼──│ response │◀─│ translate │◀─│  rpc client   │◀──┼── backend
//!                      │  │  writer  │  │  status   │  │               │   │
//!                      │  └──────────┘  └───────────┘  └───────────────┘   │
//!                      └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use link_gateway::config::{load_config, GatewayConfig};
use link_gateway::lifecycle::startup;
use link_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "link-gateway")]
#[command(about = "HTTP/JSON gateway for the users and links services", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("link-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_deadline_ms = config.timeouts.rpc_deadline_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
