//! ServerBuilder for wiring the menu source and session store into a router

use super::handlers::AppState;
use super::router::build_routes;
use crate::config::KapiConfig;
use crate::core::service::SessionStore;
use crate::menu::{MenuNormalizer, MenuSource};
use crate::storage::InMemorySessionStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the HTTP application
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(KapiConfig::from_yaml_file("kapi.yaml")?)
///     .with_menu_source(FixtureMenuSource::from_file("menu.json")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: KapiConfig,
    menu_source: Option<Arc<dyn MenuSource>>,
    session_store: Option<Arc<dyn SessionStore>>,
}

impl ServerBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: KapiConfig::default_config(),
            menu_source: None,
            session_store: None,
        }
    }

    pub fn with_config(mut self, config: KapiConfig) -> Self {
        self.config = config;
        self
    }

    /// Set where raw menus come from
    ///
    /// Defaults to the upstream HTTP API when the `upstream` feature is on.
    pub fn with_menu_source(mut self, source: impl MenuSource + 'static) -> Self {
        self.menu_source = Some(Arc::new(source));
        self
    }

    /// Set the session store (defaults to [`InMemorySessionStore`])
    pub fn with_session_store(mut self, store: impl SessionStore + 'static) -> Self {
        self.session_store = Some(Arc::new(store));
        self
    }

    /// Build the shared handler state
    pub fn build_state(mut self) -> Result<AppState> {
        self.config.validate()?;

        let menu_source = match self.menu_source.take() {
            Some(source) => source,
            None => default_menu_source(&self.config)?,
        };
        let sessions = self
            .session_store
            .take()
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));

        Ok(AppState {
            normalizer: Arc::new(MenuNormalizer::from_config(&self.config.menu)),
            config: Arc::new(self.config),
            menu_source,
            sessions,
        })
    }

    /// Build the final router with tracing and CORS layers
    pub fn build(self) -> Result<Router> {
        let state = self.build_state()?;
        Ok(build_routes(state).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve on `server.bind_addr` with graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_addr.clone();
        let app = self.build()?;
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

#[cfg(feature = "upstream")]
fn default_menu_source(config: &KapiConfig) -> Result<Arc<dyn MenuSource>> {
    let source = crate::menu::HttpMenuSource::new(&config.upstream)?;
    Ok(Arc::new(source))
}

#[cfg(not(feature = "upstream"))]
fn default_menu_source(_config: &KapiConfig) -> Result<Arc<dyn MenuSource>> {
    Err(anyhow::anyhow!(
        "MenuSource is required without the upstream feature. Call .with_menu_source()"
    ))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
