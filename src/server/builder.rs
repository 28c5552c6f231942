//! ServerBuilder for fluent API to build the HTTP server

use crate::config::ServerConfig;
use crate::core::service::InvoiceService;
use crate::server::handlers::AppState;
use crate::server::router::build_router;
use crate::storage::{InMemoryInvoiceRepository, InvoiceRepository};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the invoicer HTTP server
///
/// # Example
///
/// ```rust,ignore
/// ServerBuilder::new()
///     .with_config(ServerConfig::default())
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    repository: Option<Arc<dyn InvoiceRepository>>,
    config: ServerConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            config: ServerConfig::default(),
        }
    }

    /// Use a specific repository backend (defaults to in-memory)
    pub fn with_repository(mut self, repository: Arc<dyn InvoiceRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Use a specific server configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the Axum router without starting a server.
    ///
    /// Useful for tests that drive the router directly.
    pub fn build(self) -> Router {
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryInvoiceRepository::new()));
        let state = AppState {
            service: InvoiceService::new(repository),
        };
        build_router(state)
    }

    /// Build the router and serve it until Ctrl+C or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr.clone();
        let app = self.build();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
