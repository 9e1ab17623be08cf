//! ServerBuilder for fluent API to build the HTTP server

use super::exposure::{GraphQLExposure, health_routes};
use super::host::ServerHost;
use crate::catalog::Catalog;
use crate::config::DashboardConfig;
use crate::core::AuthProvider;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard HTTP server
///
/// # Example
///
/// ```ignore
/// let catalog = Arc::new(Catalog::in_memory(&config));
/// ServerBuilder::new(config)
///     .with_catalog(catalog)
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: DashboardConfig,
    catalog: Option<Arc<Catalog>>,
    auth: Option<Arc<dyn AuthProvider>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            catalog: None,
            auth: None,
            custom_routes: Vec::new(),
        }
    }

    /// Serve an existing catalog instead of a fresh in-memory one
    pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replace the default JWT header authentication
    pub fn with_auth_provider(mut self, auth: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    /// Add routes next to the GraphQL endpoint
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> ServerHost {
        let catalog = self
            .catalog
            .get_or_insert_with(|| Arc::new(Catalog::in_memory(&self.config)))
            .clone();

        match self.auth.clone() {
            Some(auth) => ServerHost::with_auth_provider(self.config.clone(), catalog, auth),
            None => ServerHost::new(self.config.clone(), catalog),
        }
    }

    /// Build the final router: health, GraphQL and custom routes, traced
    pub fn build(mut self) -> Router {
        let cors_permissive = self.config.server.cors_permissive;
        let host = Arc::new(self.build_host());

        let mut app = health_routes().merge(GraphQLExposure::build_router(host));
        for routes in std::mem::take(&mut self.custom_routes) {
            app = app.merge(routes);
        }

        let cors = cors_permissive.then(CorsLayer::permissive);
        app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .option_layer(cors),
        )
    }

    /// Serve on `server.bind` with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
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

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
