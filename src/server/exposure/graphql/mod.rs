//! GraphQL API exposure
//!
//! Routes:
//! - `POST /graphql`: queries and mutations, authenticated from the request
//!   headers through the host's [`AuthProvider`](crate::core::AuthProvider)
//! - `GET /graphql`: the playground, when enabled in the server config
//! - `GET /graphql/schema`: the SDL

mod connection;
mod guard;
mod mutation;
mod query;
mod schema;
mod types;

pub use connection::{CountableConnection, CountableFields};
pub use guard::PolicyGuard;
pub use mutation::Mutations;
pub use query::Query;
pub use schema::{DashboardSchema, build_schema};

use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::Extension,
    http::{HeaderMap, header},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;

use crate::core::AuthContext;
use crate::server::host::ServerHost;

pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        let endpoint = if host.config.server.playground {
            get(graphql_playground).post(graphql_handler)
        } else {
            post(graphql_handler)
        };

        Router::new()
            .route("/graphql", endpoint)
            .route("/graphql/schema", get(graphql_schema))
            .layer(Extension(host))
    }
}

/// Handler for GraphQL queries and mutations
async fn graphql_handler(
    Extension(host): Extension<Arc<ServerHost>>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let auth = match host.auth.extract_context(&headers).await {
        Ok(auth) => auth,
        Err(e) => {
            tracing::error!(error = %e, "failed to authenticate request");
            AuthContext::Anonymous
        }
    };
    host.schema.execute(request.into_inner().data(auth)).await.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// Handler for GraphQL schema SDL export
async fn graphql_schema(Extension(host): Extension<Arc<ServerHost>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        host.schema.sdl(),
    )
}
