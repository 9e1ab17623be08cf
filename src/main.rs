//! `catalog-dashboard` binary
//!
//! Usage: `catalog-dashboard [config.yaml]`. Without an argument the path is
//! taken from `DASHBOARD_CONFIG`, then `dashboard.yaml`; a missing file means
//! defaults.

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use dashboard::catalog::Catalog;
use dashboard::config::DashboardConfig;
use dashboard::server::ServerBuilder;

const ENV_CONFIG: &str = "DASHBOARD_CONFIG";
const DEFAULT_CONFIG: &str = "dashboard.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ENV_CONFIG).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = DashboardConfig::load_or_default(&path)?.apply_env();
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(config = %path, bind = %config.server.bind, "starting catalog dashboard");

    let catalog = Arc::new(Catalog::in_memory(&config));
    let created = catalog.bootstrap_accounts(&config.accounts).await?;
    tracing::info!(created, "accounts bootstrapped");

    ServerBuilder::new(config)
        .with_catalog(catalog)
        .serve()
        .await
}
