//! GraphQL object types
//!
//! Thin wrappers over the stored models. Relations are resolved lazily
//! through the [`Catalog`] in the schema data.

use async_graphql::{Context, ID, Interface, Object, Result, ResultExt, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogNode};
use crate::core::NodeEntity;
use crate::core::error::FieldValidationError;
use crate::models::{Category, Page, Product};

/// The catalog stored in the schema data
pub(crate) fn catalog<'a>(ctx: &Context<'a>) -> Result<&'a Arc<Catalog>> {
    ctx.data::<Arc<Catalog>>()
}

/// Relay node interface
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID", desc = "The ID of the object."))]
pub enum Node {
    Category(CategoryType),
    Page(PageType),
    ProductDashboard(ProductDashboardType),
}

impl From<CatalogNode> for Node {
    fn from(node: CatalogNode) -> Self {
        match node {
            CatalogNode::Category(c) => Node::Category(CategoryType(c)),
            CatalogNode::Page(p) => Node::Page(PageType(p)),
            CatalogNode::Product(p) => Node::ProductDashboard(ProductDashboardType(p)),
        }
    }
}

pub struct CategoryType(pub Category);

#[Object(name = "Category")]
impl CategoryType {
    async fn id(&self) -> ID {
        ID(self.0.global_id().encode())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn slug(&self) -> &str {
        &self.0.slug
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    /// Depth in the category tree, 0 for roots
    async fn level(&self) -> i32 {
        self.0.level
    }

    async fn parent(&self, ctx: &Context<'_>) -> Result<Option<CategoryType>> {
        let Some(parent) = self.0.parent else {
            return Ok(None);
        };
        let parent = catalog(ctx)?.category_by_pk(parent).await.extend()?;
        Ok(parent.map(CategoryType))
    }

    async fn children(&self, ctx: &Context<'_>) -> Result<Vec<CategoryType>> {
        let children = catalog(ctx)?
            .category_children(self.0.pk)
            .await
            .extend()?;
        Ok(children.into_iter().map(CategoryType).collect())
    }
}

pub struct PageType(pub Page);

#[Object(name = "Page")]
impl PageType {
    async fn id(&self) -> ID {
        ID(self.0.global_id().encode())
    }

    async fn slug(&self) -> &str {
        &self.0.slug
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn is_visible(&self) -> bool {
        self.0.is_visible
    }

    async fn available_on(&self) -> Option<NaiveDate> {
        self.0.available_on
    }

    /// Visible and available today
    async fn is_published(&self) -> bool {
        self.0.is_published_on(Utc::now().date_naive())
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

/// The dashboard view of a product
pub struct ProductDashboardType(pub Product);

#[Object(name = "ProductDashboard")]
impl ProductDashboardType {
    async fn id(&self) -> ID {
        ID(self.0.global_id().encode())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    async fn category(&self, ctx: &Context<'_>) -> Result<Option<CategoryType>> {
        let category = catalog(ctx)?
            .category_by_pk(self.0.category)
            .await
            .extend()?;
        Ok(category.map(CategoryType))
    }

    async fn price(&self, ctx: &Context<'_>) -> Result<Money> {
        Ok(Money {
            amount: self.0.price,
            currency: catalog(ctx)?.currency().to_string(),
        })
    }

    async fn is_published(&self) -> bool {
        self.0.is_published
    }

    async fn available_on(&self) -> Option<NaiveDate> {
        self.0.available_on
    }

    /// Published and available today
    async fn is_available(&self) -> bool {
        self.0.is_available_on(Utc::now().date_naive())
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.0.updated_at
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

/// A problem with one input field of a mutation
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Error")]
pub struct ErrorType {
    /// Input field in camelCase, absent for errors about the whole input
    pub field: Option<String>,
    pub message: String,
}

impl From<FieldValidationError> for ErrorType {
    fn from(error: FieldValidationError) -> Self {
        Self {
            field: Some(error.field),
            message: error.message,
        }
    }
}
