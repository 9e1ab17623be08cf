//! The catalog facade
//!
//! Everything the GraphQL schema does goes through [`Catalog`]: relay node
//! lookup, the resolve helpers behind the connection fields, the mutation
//! operations and the account/token operations. The schema itself only
//! wires arguments to these methods.

mod accounts;
mod categories;
pub mod filters;
pub mod inputs;
mod pages;
mod products;

pub use accounts::JwtAuthProvider;

use std::sync::Arc;

use crate::config::{DashboardConfig, GraphQLConfig};
use crate::core::error::{DashboardResult, EntityError};
use crate::core::{DataService, GlobalId, JwtService, NodeKind};
use crate::models::{Category, Page, Product, User};
use crate::storage::InMemoryDataService;

/// A node resolved from a global id
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogNode {
    Category(Category),
    Page(Page),
    Product(Product),
}

impl CatalogNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            CatalogNode::Category(_) => NodeKind::Category,
            CatalogNode::Page(_) => NodeKind::Page,
            CatalogNode::Product(_) => NodeKind::Product,
        }
    }
}

/// Shared state behind every resolver
pub struct Catalog {
    categories: Arc<dyn DataService<Category>>,
    pages: Arc<dyn DataService<Page>>,
    products: Arc<dyn DataService<Product>>,
    users: Arc<dyn DataService<User>>,
    jwt: JwtService,
    settings: GraphQLConfig,
}

impl Catalog {
    /// Catalog over fresh in-memory stores
    pub fn in_memory(config: &DashboardConfig) -> Self {
        Self::with_services(
            Arc::new(InMemoryDataService::<Category>::new()),
            Arc::new(InMemoryDataService::<Page>::new()),
            Arc::new(InMemoryDataService::<Product>::new()),
            Arc::new(InMemoryDataService::<User>::new()),
            config,
        )
    }

    /// Catalog over caller-provided stores
    pub fn with_services(
        categories: Arc<dyn DataService<Category>>,
        pages: Arc<dyn DataService<Page>>,
        products: Arc<dyn DataService<Product>>,
        users: Arc<dyn DataService<User>>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            categories,
            pages,
            products,
            users,
            jwt: JwtService::new(config.jwt.clone()),
            settings: config.graphql.clone(),
        }
    }

    pub fn max_page_size(&self) -> usize {
        self.settings.max_page_size
    }

    pub fn currency(&self) -> &str {
        &self.settings.default_currency
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Resolve a relay global id, optionally constrained to one kind
    ///
    /// Decoding failures, kind mismatches and missing rows are all reported
    /// with the id as the client sent it.
    pub async fn get_node(
        &self,
        id: &str,
        only_type: Option<NodeKind>,
    ) -> DashboardResult<CatalogNode> {
        let global_id = GlobalId::decode(id)?;
        if let Some(expected) = only_type {
            global_id.key_for(expected)?;
        }

        let pk = global_id.pk();
        let node = match global_id.kind() {
            NodeKind::Category => self.categories.get(pk).await?.map(CatalogNode::Category),
            NodeKind::Page => self.pages.get(pk).await?.map(CatalogNode::Page),
            NodeKind::Product => self.products.get(pk).await?.map(CatalogNode::Product),
        };

        node.ok_or_else(|| EntityError::NotFound { id: id.to_string() }.into())
    }

    pub async fn get_category(&self, id: &str) -> DashboardResult<Category> {
        match self.get_node(id, Some(NodeKind::Category)).await? {
            CatalogNode::Category(category) => Ok(category),
            other => Err(mismatch(NodeKind::Category, other.kind())),
        }
    }

    pub async fn get_page(&self, id: &str) -> DashboardResult<Page> {
        match self.get_node(id, Some(NodeKind::Page)).await? {
            CatalogNode::Page(page) => Ok(page),
            other => Err(mismatch(NodeKind::Page, other.kind())),
        }
    }

    pub async fn get_product(&self, id: &str) -> DashboardResult<Product> {
        match self.get_node(id, Some(NodeKind::Product)).await? {
            CatalogNode::Product(product) => Ok(product),
            other => Err(mismatch(NodeKind::Product, other.kind())),
        }
    }

    /// Load a category by primary key, for resolving relations
    pub async fn category_by_pk(&self, pk: i64) -> DashboardResult<Option<Category>> {
        Ok(self.categories.get(pk).await?)
    }
}

fn mismatch(expected: NodeKind, found: NodeKind) -> crate::core::DashboardError {
    EntityError::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
    .into()
}
