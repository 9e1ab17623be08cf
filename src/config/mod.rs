//! Configuration loading and management
//!
//! The dashboard reads a single YAML document. Every section has defaults, so
//! an empty document (or no file at all) yields a runnable development setup.

use crate::core::error::{ConfigError, DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `jwt.secret`
pub const ENV_JWT_SECRET: &str = "DASHBOARD_JWT_SECRET";

/// Environment variable overriding `server.bind`
pub const ENV_BIND: &str = "DASHBOARD_BIND";

const DEV_SECRET: &str = "change-me-dashboard-development-secret";

/// Complete dashboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub graphql: GraphQLConfig,
    pub jwt: JwtConfig,
    pub logging: LoggingConfig,

    /// Accounts created at startup if their email is not registered yet
    pub accounts: Vec<AccountConfig>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    pub bind: String,

    /// Serve the GraphQL playground on `GET /graphql`
    pub playground: bool,

    /// Allow any origin (development dashboards served from another port)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            playground: true,
            cors_permissive: false,
        }
    }
}

/// Schema-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    /// Upper bound for `first`/`last` on every connection field
    pub max_page_size: usize,

    /// Currency reported on every `Money` value
    pub default_currency: String,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            default_currency: "USD".to_string(),
        }
    }
}

/// JSON web token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HMAC secret used to sign tokens
    pub secret: String,

    /// Scheme expected in the `Authorization` header
    pub header_prefix: String,

    /// Reject tokens whose `exp` lies in the past
    pub verify_expiration: bool,

    /// Lifetime of an issued token
    pub expiration_delta_secs: i64,

    /// Whether `refreshToken` is accepted at all
    pub allow_refresh: bool,

    /// How long after the original login a token may still be refreshed
    pub refresh_expiration_delta_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            header_prefix: "JWT".to_string(),
            verify_expiration: true,
            expiration_delta_secs: 300,
            allow_refresh: true,
            refresh_expiration_delta_secs: 7 * 24 * 60 * 60,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A bootstrap account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            DashboardError::Config(ConfigError::ParseError { message, .. }) => {
                DashboardError::Config(ConfigError::ParseError {
                    file: Some(path.display().to_string()),
                    message,
                })
            }
            other => other,
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> DashboardResult<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_yaml_file(path)
        } else {
            tracing::info!("no config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply `DASHBOARD_*` environment overrides
    pub fn apply_env(mut self) -> Self {
        self.apply_overrides(
            std::env::var(ENV_JWT_SECRET).ok(),
            std::env::var(ENV_BIND).ok(),
        );
        self
    }

    fn apply_overrides(&mut self, secret: Option<String>, bind: Option<String>) {
        if let Some(secret) = secret {
            self.jwt.secret = secret;
        }
        if let Some(bind) = bind {
            self.server.bind = bind;
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> DashboardResult<()> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "jwt.secret".to_string(),
                value: String::new(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if self.jwt.secret == DEV_SECRET {
            tracing::warn!("jwt.secret is the development default, set {}", ENV_JWT_SECRET);
        }
        if self.graphql.max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "graphql.max_page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.jwt.expiration_delta_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "jwt.expiration_delta_secs".to_string(),
                value: self.jwt.expiration_delta_secs.to_string(),
                message: "must be positive".to_string(),
            }
            .into());
        }
        for account in &self.accounts {
            if !account.email.contains('@') {
                return Err(ConfigError::InvalidValue {
                    field: "accounts.email".to_string(),
                    value: account.email.clone(),
                    message: "not an email address".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
