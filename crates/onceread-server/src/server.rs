use onceread_gate::Sanitizer;
use onceread_store::{EntryStore, FileEntryStore, InMemoryEntryStore, Vault};
use tokio::net::TcpListener;

use crate::config::{BackendConfig, ServerConfig};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// onceread HTTP server.
pub struct OnceReadServer {
    config: ServerConfig,
    state: AppState,
}

impl OnceReadServer {
    /// Prepare the configured backend. An unusable backend is fatal here,
    /// not on the first request.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let (store, kind): (Box<dyn EntryStore>, &'static str) = match &config.backend {
            BackendConfig::Memory => {
                let store: Box<dyn EntryStore> = Box::new(InMemoryEntryStore::new());
                (store, "memory")
            }
            BackendConfig::File { root } => {
                let store: Box<dyn EntryStore> = Box::new(FileEntryStore::open(root)?);
                (store, "file")
            }
        };
        let state = AppState::new(Vault::new(store), Sanitizer::new(config.gate.clone()), kind);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("onceread server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
