//! Server host
//!
//! Holds the state every exposure needs: the catalog, the schema built over
//! it, the request authenticator and the configuration.

use std::sync::Arc;

use crate::catalog::{Catalog, JwtAuthProvider};
use crate::config::DashboardConfig;
use crate::core::AuthProvider;
use crate::server::exposure::graphql::{DashboardSchema, build_schema};

pub struct ServerHost {
    pub config: Arc<DashboardConfig>,

    pub catalog: Arc<Catalog>,

    pub schema: DashboardSchema,

    /// Turns request headers into an [`AuthContext`](crate::core::AuthContext)
    pub auth: Arc<dyn AuthProvider>,
}

impl ServerHost {
    /// Build a host authenticating with the catalog's JWT service
    pub fn new(config: DashboardConfig, catalog: Arc<Catalog>) -> Self {
        let auth = Arc::new(JwtAuthProvider::new(catalog.clone()));
        Self::with_auth_provider(config, catalog, auth)
    }

    pub fn with_auth_provider(
        config: DashboardConfig,
        catalog: Arc<Catalog>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        let schema = build_schema(catalog.clone());
        Self {
            config: Arc::new(config),
            catalog,
            schema,
            auth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_exposes_schema_sdl() {
        let config = DashboardConfig::default();
        let catalog = Arc::new(Catalog::in_memory(&config));
        let host = ServerHost::new(config, catalog);

        let sdl = host.schema.sdl();
        assert!(sdl.contains("type ProductDashboard"));
        assert!(sdl.contains("interface Node"));
        assert!(sdl.contains("categoryCreate"));
    }
}
