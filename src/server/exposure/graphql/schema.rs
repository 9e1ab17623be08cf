use async_graphql::{EmptySubscription, Schema};
use std::sync::Arc;

use super::mutation::Mutations;
use super::query::Query;
use crate::catalog::Catalog;

pub type DashboardSchema = Schema<Query, Mutations, EmptySubscription>;

/// Build the dashboard schema around a shared catalog
///
/// The per-request [`AuthContext`](crate::core::AuthContext) is attached to
/// each request, not to the schema.
pub fn build_schema(catalog: Arc<Catalog>) -> DashboardSchema {
    Schema::build(Query, Mutations, EmptySubscription)
        .data(catalog)
        .finish()
}
