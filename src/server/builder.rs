//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::exposure::rest::handlers::AppState;
use crate::config::ServerConfig;
use crate::core::service::PokemonService;
use crate::core::store::PokemonStore;
use crate::storage::JsonFileStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ServerConfig::from_env()?)
///     .with_store(InMemoryStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    store: Option<Arc<dyn PokemonStore>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            store: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the server configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the catalog store
    ///
    /// When no store is given, [`open_store`](Self::open_store) or
    /// [`serve`](Self::serve) use a [`JsonFileStore`] at `config.data_file`.
    pub fn with_store(mut self, store: impl PokemonStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Open the JSON file store named by the configuration, unless a store
    /// was already provided
    pub async fn open_store(mut self) -> Result<Self> {
        if self.store.is_none() {
            let store = JsonFileStore::open(&self.config.data_file).await?;
            tracing::info!(path = %store.path().display(), "using JSON file store");
            self.store = Some(Arc::new(store));
        }
        Ok(self)
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("PokemonStore is required. Call .with_store() or .open_store()"))?;

        let state = AppState::new(PokemonService::new(store));
        Ok(RestExposure::build_router(
            state,
            &self.config,
            self.custom_routes,
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Open the configured store if none was provided
    /// - Bind to `config.host:config.port`
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let builder = self.open_store().await?;
        let addr = builder.config.bind_address();
        let app = builder.build()?;
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
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
