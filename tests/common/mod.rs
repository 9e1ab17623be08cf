//! Shared fixtures for the integration tests
//!
//! Builds a catalog with a small category tree, a few products and pages,
//! and executes GraphQL documents against the schema as a given caller.

#![allow(dead_code)]

use async_graphql::{Request, Variables};
use dashboard::prelude::*;
use serde_json::Value;

pub const STAFF_EMAIL: &str = "admin@example.com";
pub const CUSTOMER_EMAIL: &str = "customer@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

pub fn staff() -> AuthContext {
    AuthContext::Staff {
        user_id: 1,
        email: STAFF_EMAIL.to_string(),
    }
}

pub fn customer() -> AuthContext {
    AuthContext::User {
        user_id: 2,
        email: CUSTOMER_EMAIL.to_string(),
    }
}

/// Ids of the seeded rows
pub struct Seeded {
    pub shoes: Category,
    pub sneakers: Category,
    pub hats: Category,
    pub runner: Product,
    pub boot: Product,
    pub cap: Product,
    pub about: Page,
}

pub struct Fixture {
    pub catalog: Arc<Catalog>,
    pub schema: DashboardSchema,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        let catalog = Arc::new(Catalog::in_memory(&config));
        let schema = build_schema(catalog.clone());
        Self { catalog, schema }
    }

    /// Seed `Shoes > Sneakers`, `Hats`, three products and one page
    pub async fn seed(&self) -> Seeded {
        let shoes = self
            .catalog
            .create_category(category("Shoes"), None)
            .await
            .unwrap();
        let sneakers = self
            .catalog
            .create_category(category("Sneakers"), Some(gid(&shoes).as_str()))
            .await
            .unwrap();
        let hats = self
            .catalog
            .create_category(category("Hats"), None)
            .await
            .unwrap();

        let runner = self.product("Runner", &sneakers, 89.5).await;
        let boot = self.product("Boot", &shoes, 120.0).await;
        let cap = self.product("Cap", &hats, 15.0).await;

        let about = self
            .catalog
            .create_page(PageInput {
                slug: Some("about".to_string()),
                title: Some("About us".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        Seeded {
            shoes,
            sneakers,
            hats,
            runner,
            boot,
            cap,
            about,
        }
    }

    pub async fn product(&self, name: &str, category: &Category, price: f64) -> Product {
        self.catalog
            .create_product(ProductInput {
                name: Some(name.to_string()),
                category_id: Some(async_graphql::ID(category.global_id().encode())),
                price: Some(price),
                is_published: Some(true),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    /// Execute a document and return the serialized response
    pub async fn run(&self, query: &str, variables: Value, auth: Option<AuthContext>) -> Value {
        let mut request = Request::new(query).variables(Variables::from_json(variables));
        if let Some(auth) = auth {
            request = request.data(auth);
        }
        let response = self.schema.execute(request).await;
        serde_json::to_value(&response).unwrap()
    }

    pub async fn as_staff(&self, query: &str, variables: Value) -> Value {
        self.run(query, variables, Some(staff())).await
    }
}

pub fn category(name: &str) -> CategoryInput {
    CategoryInput {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn gid<T: NodeEntity>(entity: &T) -> String {
    entity.global_id().encode()
}

/// `extensions.code` of the first error
pub fn error_code(response: &Value) -> &str {
    response["errors"][0]["extensions"]["code"]
        .as_str()
        .unwrap_or_default()
}

pub fn error_message(response: &Value) -> &str {
    response["errors"][0]["message"].as_str().unwrap_or_default()
}

pub fn node_names(connection: &Value) -> Vec<String> {
    connection["edges"]
        .as_array()
        .map(|edges| {
            edges
                .iter()
                .map(|e| e["node"]["name"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}
