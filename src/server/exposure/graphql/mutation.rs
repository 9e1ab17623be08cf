//! Mutation root
//!
//! Catalog mutations return `{ errors, <entity> }` payloads: input validation
//! failures land in `errors`, everything else is raised as a GraphQL error.

use async_graphql::{Context, ErrorExtensions, ID, Json, Object, Result, ResultExt, SimpleObject};

use super::guard::PolicyGuard;
use super::types::{CategoryType, ErrorType, PageType, ProductDashboardType, catalog};
use crate::catalog::inputs::{CategoryInput, PageInput, ProductInput};
use crate::core::error::{DashboardResult, ValidationError};
use crate::core::{Claims, DashboardError};

#[derive(SimpleObject)]
pub struct CategoryPayload {
    pub errors: Vec<ErrorType>,
    pub category: Option<CategoryType>,
}

#[derive(SimpleObject)]
pub struct PagePayload {
    pub errors: Vec<ErrorType>,
    pub page: Option<PageType>,
}

#[derive(SimpleObject)]
pub struct ProductPayload {
    pub errors: Vec<ErrorType>,
    pub product: Option<ProductDashboardType>,
}

#[derive(SimpleObject)]
pub struct ObtainJsonWebToken {
    pub token: String,
}

#[derive(SimpleObject)]
pub struct VerifyPayload {
    pub payload: Json<Claims>,
}

#[derive(SimpleObject)]
pub struct RefreshPayload {
    pub token: String,
    pub payload: Json<Claims>,
}

/// Split a mutation result into payload errors or a raised error
fn into_payload<T, P>(
    result: DashboardResult<T>,
    build: impl FnOnce(Vec<ErrorType>, Option<T>) -> P,
) -> Result<P> {
    match result {
        Ok(value) => Ok(build(Vec::new(), Some(value))),
        Err(DashboardError::Validation(ValidationError::FieldErrors(errors))) => {
            Ok(build(errors.into_iter().map(ErrorType::from).collect(), None))
        }
        Err(e) => Err(e.extend()),
    }
}

fn category_payload(result: DashboardResult<crate::models::Category>) -> Result<CategoryPayload> {
    into_payload(result, |errors, category| CategoryPayload {
        errors,
        category: category.map(CategoryType),
    })
}

fn page_payload(result: DashboardResult<crate::models::Page>) -> Result<PagePayload> {
    into_payload(result, |errors, page| PagePayload {
        errors,
        page: page.map(PageType),
    })
}

fn product_payload(result: DashboardResult<crate::models::Product>) -> Result<ProductPayload> {
    into_payload(result, |errors, product| ProductPayload {
        errors,
        product: product.map(ProductDashboardType),
    })
}

#[derive(Default)]
pub struct Mutations;

#[Object]
impl Mutations {
    /// Create a category, optionally under `parentId`
    #[graphql(guard = "PolicyGuard::staff()")]
    async fn category_create(
        &self,
        ctx: &Context<'_>,
        input: CategoryInput,
        parent_id: Option<ID>,
    ) -> Result<CategoryPayload> {
        let parent_id = parent_id.as_ref().map(|id| id.as_str());
        category_payload(catalog(ctx)?.create_category(input, parent_id).await)
    }

    #[graphql(guard = "PolicyGuard::staff()")]
    async fn category_update(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: CategoryInput,
    ) -> Result<CategoryPayload> {
        category_payload(catalog(ctx)?.update_category(&id, input).await)
    }

    /// Delete a category together with its subcategories and their products
    #[graphql(guard = "PolicyGuard::staff()")]
    async fn category_delete(&self, ctx: &Context<'_>, id: ID) -> Result<CategoryPayload> {
        category_payload(catalog(ctx)?.delete_category(&id).await)
    }

    #[graphql(guard = "PolicyGuard::staff()")]
    async fn page_create(&self, ctx: &Context<'_>, input: PageInput) -> Result<PagePayload> {
        page_payload(catalog(ctx)?.create_page(input).await)
    }

    #[graphql(guard = "PolicyGuard::staff()")]
    async fn page_update(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: PageInput,
    ) -> Result<PagePayload> {
        page_payload(catalog(ctx)?.update_page(&id, input).await)
    }

    #[graphql(guard = "PolicyGuard::staff()")]
    async fn page_delete(&self, ctx: &Context<'_>, id: ID) -> Result<PagePayload> {
        page_payload(catalog(ctx)?.delete_page(&id).await)
    }

    #[graphql(guard = "PolicyGuard::staff()")]
    async fn product_create(
        &self,
        ctx: &Context<'_>,
        input: ProductInput,
    ) -> Result<ProductPayload> {
        product_payload(catalog(ctx)?.create_product(input).await)
    }

    #[graphql(guard = "PolicyGuard::staff()")]
    async fn product_update(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ProductInput,
    ) -> Result<ProductPayload> {
        product_payload(catalog(ctx)?.update_product(&id, input).await)
    }

    #[graphql(guard = "PolicyGuard::staff()")]
    async fn product_delete(&self, ctx: &Context<'_>, id: ID) -> Result<ProductPayload> {
        product_payload(catalog(ctx)?.delete_product(&id).await)
    }

    /// Exchange credentials for a token
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<ObtainJsonWebToken> {
        let token = catalog(ctx)?.token_auth(&email, &password).await.extend()?;
        Ok(ObtainJsonWebToken { token })
    }

    async fn verify_token(&self, ctx: &Context<'_>, token: String) -> Result<VerifyPayload> {
        let claims = catalog(ctx)?.verify_token(&token).extend()?;
        Ok(VerifyPayload {
            payload: Json(claims),
        })
    }

    /// Re-sign a token with a fresh expiration, within the refresh window
    async fn refresh_token(&self, ctx: &Context<'_>, token: String) -> Result<RefreshPayload> {
        let (token, claims) = catalog(ctx)?.refresh_token(&token).extend()?;
        Ok(RefreshPayload {
            token,
            payload: Json(claims),
        })
    }
}
