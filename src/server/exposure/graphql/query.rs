//! Query root
//!
//! Every field is staff-only. Node lookups surface invalid-id, type-mismatch
//! and not-found errors verbatim.

use async_graphql::{Context, ID, Object, Result, ResultExt};

use super::connection::{CountableConnection, connection_from_vec};
use super::guard::PolicyGuard;
use super::types::{CategoryType, Node, PageType, ProductDashboardType, catalog};
use crate::catalog::filters::{ProductFilter, ProductOrder};
use crate::core::{ConnectionArgs, DistinctFilterSet, FilterSet};

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    /// Look up a category by id
    #[graphql(guard = "PolicyGuard::staff()")]
    async fn category(&self, ctx: &Context<'_>, id: ID) -> Result<CategoryType> {
        let category = catalog(ctx)?.get_category(&id).await.extend()?;
        Ok(CategoryType(category))
    }

    /// List categories, optionally of one tree level
    #[graphql(guard = "PolicyGuard::staff()")]
    async fn categories(
        &self,
        ctx: &Context<'_>,
        level: Option<i32>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Result<CountableConnection<CategoryType>> {
        let catalog = catalog(ctx)?;
        let categories = catalog.resolve_categories(level).await.extend()?;
        let categories = DistinctFilterSet.apply(categories);

        let args = ConnectionArgs::new(after, before, first, last);
        connection_from_vec(
            categories,
            &args,
            "categories",
            catalog.max_page_size(),
            CategoryType,
        )
        .extend()
    }

    /// Look up a page by id
    #[graphql(guard = "PolicyGuard::staff()")]
    async fn page(&self, ctx: &Context<'_>, id: ID) -> Result<PageType> {
        let page = catalog(ctx)?.get_page(&id).await.extend()?;
        Ok(PageType(page))
    }

    /// List all pages, visible or not
    #[graphql(guard = "PolicyGuard::staff()")]
    async fn pages(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Result<CountableConnection<PageType>> {
        let catalog = catalog(ctx)?;
        let pages = DistinctFilterSet.apply(catalog.resolve_all_pages().await.extend()?);

        let args = ConnectionArgs::new(after, before, first, last);
        connection_from_vec(pages, &args, "pages", catalog.max_page_size(), PageType).extend()
    }

    /// Look up a product by id
    #[graphql(guard = "PolicyGuard::staff()")]
    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<ProductDashboardType> {
        let product = catalog(ctx)?.get_product(&id).await.extend()?;
        Ok(ProductDashboardType(product))
    }

    /// List products, optionally of a single category
    #[graphql(guard = "PolicyGuard::staff()")]
    #[allow(clippy::too_many_arguments)]
    async fn products(
        &self,
        ctx: &Context<'_>,
        category_id: Option<ID>,
        name: Option<String>,
        name_icontains: Option<String>,
        price: Option<f64>,
        price_gte: Option<f64>,
        price_lte: Option<f64>,
        is_published: Option<bool>,
        sort_by: Option<ProductOrder>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Result<CountableConnection<ProductDashboardType>> {
        let catalog = catalog(ctx)?;
        let filter = ProductFilter {
            name,
            name_icontains,
            price,
            price_gte,
            price_lte,
            is_published,
            sort_by,
        };
        let products = catalog
            .resolve_products(category_id.as_ref().map(|id| id.as_str()), &filter)
            .await
            .extend()?;

        let args = ConnectionArgs::new(after, before, first, last);
        connection_from_vec(
            products,
            &args,
            "products",
            catalog.max_page_size(),
            ProductDashboardType,
        )
        .extend()
    }

    /// Fetch any catalog object by its global id
    #[graphql(guard = "PolicyGuard::staff()")]
    async fn node(&self, ctx: &Context<'_>, id: ID) -> Result<Node> {
        let node = catalog(ctx)?.get_node(&id, None).await.extend()?;
        Ok(node.into())
    }
}
