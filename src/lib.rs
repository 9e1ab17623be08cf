//! # Catalog Dashboard
//!
//! A GraphQL dashboard API over a product catalog (categories and products)
//! and content pages.
//!
//! ## Features
//!
//! - **Staff-only dashboard**: every query and catalog mutation is guarded
//! - **Relay-style API**: global ids, a `node` field and counted connections
//! - **Mutation payloads**: input validation failures come back as `errors`
//! - **JWT authentication**: `tokenAuth`, `verifyToken` and `refreshToken`
//! - **Cascading deletes**: removing a category removes its subtree and products
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let config = DashboardConfig::load_or_default("dashboard.yaml")?.apply_env();
//! config.validate()?;
//!
//! let catalog = Arc::new(Catalog::in_memory(&config));
//! catalog.bootstrap_accounts(&config.accounts).await?;
//!
//! ServerBuilder::new(config)
//!     .with_catalog(catalog)
//!     .serve()
//!     .await?;
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod models;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, AuthProvider},
        entity::{Data, Entity, NodeEntity},
        error::{DashboardError, DashboardResult},
        field::FieldValue,
        filter::{DistinctFilterSet, FilterSet},
        id::{GlobalId, NodeKind},
        jwt::{Claims, JwtService},
        service::DataService,
    };

    // === Catalog ===
    pub use crate::catalog::filters::{ProductFilter, ProductOrder};
    pub use crate::catalog::inputs::{CategoryInput, PageInput, ProductInput};
    pub use crate::catalog::{Catalog, CatalogNode, JwtAuthProvider};
    pub use crate::models::{Category, Page, Product, User};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::{AccountConfig, DashboardConfig};

    // === Server ===
    pub use crate::server::exposure::graphql::{DashboardSchema, build_schema};
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
