//! PledgeBoard — admin backend for fundraising campaigns and pledges.
//!
//! Main entry point that initializes the store and starts the server.

use clap::Parser;
use pledgeboard_console::{ConsoleServer, ConsoleStore};
use pledgeboard_core::config::AppConfig;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "pledgeboard")]
#[command(about = "Admin backend for fundraising campaigns and pledges")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "PLEDGEBOARD__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "PLEDGEBOARD__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Skip demo data seeding (start with an empty store)
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pledgeboard=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("PledgeBoard starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if cli.no_seed {
        config.seed_demo_data = false;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        "Configuration loaded"
    );

    // Initialize the store
    let store = Arc::new(ConsoleStore::new(config.pledges.clone()));
    if config.seed_demo_data {
        store.seed_demo_data()?;
    }

    let server = ConsoleServer::new(config, store);

    // Start metrics exporter
    if let Err(e) = server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("PledgeBoard is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    server.start_http().await?;

    Ok(())
}
