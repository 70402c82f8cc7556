//! Console server — HTTP app assembly plus the metrics exporter.

use crate::handlers::{self, ConsoleState};
use crate::router::console_router;
use crate::store::ConsoleStore;
use axum::routing::get;
use axum::Router;
use pledgeboard_core::config::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP server for the console API.
pub struct ConsoleServer {
    config: AppConfig,
    store: Arc<ConsoleStore>,
}

impl ConsoleServer {
    pub fn new(config: AppConfig, store: Arc<ConsoleStore>) -> Self {
        Self { config, store }
    }

    /// Build the full application router, including operational endpoints
    /// and middleware.
    pub fn app(&self) -> Router {
        let state = ConsoleState {
            store: self.store.clone(),
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
        };

        let ops = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness))
            .route("/live", get(handlers::liveness))
            .with_state(state.clone());

        console_router(state)
            .merge(ops)
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP server (blocks until shutdown).
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.app();

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics server on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
