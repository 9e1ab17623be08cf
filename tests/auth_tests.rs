//! Token operations and request authentication
//!
//! Token mutations run against the schema directly; header authentication
//! runs end-to-end over HTTP.

mod common;

use axum::http::HeaderValue;
use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use common::*;
use dashboard::prelude::*;
use serde_json::{Value, json};

const TOKEN_AUTH: &str = r#"
    mutation($email: String!, $password: String!) {
        tokenAuth(email: $email, password: $password) { token }
    }
"#;

const VERIFY: &str = r#"
    mutation($token: String!) { verifyToken(token: $token) { payload } }
"#;

const REFRESH: &str = r#"
    mutation($token: String!) { refreshToken(token: $token) { token payload } }
"#;

fn accounts() -> Vec<AccountConfig> {
    vec![
        AccountConfig {
            email: STAFF_EMAIL.to_string(),
            password: PASSWORD.to_string(),
            is_staff: true,
        },
        AccountConfig {
            email: CUSTOMER_EMAIL.to_string(),
            password: PASSWORD.to_string(),
            is_staff: false,
        },
    ]
}

async fn fixture_with_accounts() -> Fixture {
    let fixture = Fixture::new();
    fixture.catalog.bootstrap_accounts(&accounts()).await.unwrap();
    fixture
}

async fn login(fixture: &Fixture, email: &str, password: &str) -> Value {
    fixture
        .run(
            TOKEN_AUTH,
            json!({ "email": email, "password": password }),
            None,
        )
        .await
}

// =============================================================================
// Token mutations
// =============================================================================

mod token_tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let fixture = fixture_with_accounts().await;
        let created = fixture.catalog.bootstrap_accounts(&accounts()).await.unwrap();
        assert_eq!(created, 0);
    }

    #[tokio::test]
    async fn test_token_auth_and_verify() {
        let fixture = fixture_with_accounts().await;

        let response = login(&fixture, "Admin@Example.com", PASSWORD).await;
        let token = response["data"]["tokenAuth"]["token"]
            .as_str()
            .unwrap()
            .to_string();

        let verified = fixture.run(VERIFY, json!({ "token": token }), None).await;
        let payload = &verified["data"]["verifyToken"]["payload"];
        assert_eq!(payload["email"], STAFF_EMAIL);
        assert!(payload["exp"].as_i64().unwrap() > payload["orig_iat"].as_i64().unwrap());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let fixture = fixture_with_accounts().await;

        let response = login(&fixture, STAFF_EMAIL, "nope").await;
        assert_eq!(error_code(&response), "INVALID_CREDENTIALS");
        assert_eq!(error_message(&response), "Please, enter valid credentials");
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let fixture = fixture_with_accounts().await;

        let response = login(&fixture, "ghost@example.com", PASSWORD).await;
        assert_eq!(error_code(&response), "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_verify_garbage() {
        let fixture = Fixture::new();

        let response = fixture
            .run(VERIFY, json!({ "token": "a.b.c" }), None)
            .await;
        assert_eq!(error_code(&response), "INVALID_TOKEN");
        assert_eq!(error_message(&response), "Error decoding signature");
    }

    #[tokio::test]
    async fn test_verify_token_signed_with_other_secret() {
        let fixture = Fixture::new();
        let mut config = DashboardConfig::default();
        config.jwt.secret = "another-secret".to_string();
        let token = JwtService::new(config.jwt).issue(STAFF_EMAIL);

        let response = fixture.run(VERIFY, json!({ "token": token }), None).await;
        assert_eq!(error_message(&response), "Error decoding signature");
    }

    #[tokio::test]
    async fn test_verify_expired_token() {
        let mut config = DashboardConfig::default();
        config.jwt.expiration_delta_secs = -10;
        let fixture = Fixture::with_config(config.clone());
        let token = JwtService::new(config.jwt).issue(STAFF_EMAIL);

        let response = fixture.run(VERIFY, json!({ "token": token }), None).await;
        assert_eq!(error_code(&response), "TOKEN_EXPIRED");
        assert_eq!(error_message(&response), "Signature has expired");
    }

    #[tokio::test]
    async fn test_refresh_keeps_orig_iat() {
        let fixture = fixture_with_accounts().await;

        let response = login(&fixture, STAFF_EMAIL, PASSWORD).await;
        let token = response["data"]["tokenAuth"]["token"].as_str().unwrap();
        let original = fixture.catalog.verify_token(token).unwrap();

        let refreshed = fixture.run(REFRESH, json!({ "token": token }), None).await;
        let payload = &refreshed["data"]["refreshToken"]["payload"];
        assert_eq!(payload["email"], STAFF_EMAIL);
        assert_eq!(payload["orig_iat"], json!(original.orig_iat));

        let new_token = refreshed["data"]["refreshToken"]["token"].as_str().unwrap();
        assert!(fixture.catalog.verify_token(new_token).is_ok());
    }

    #[tokio::test]
    async fn test_refresh_window_expired() {
        let mut config = DashboardConfig::default();
        config.jwt.refresh_expiration_delta_secs = -1;
        let fixture = Fixture::with_config(config.clone());
        let token = JwtService::new(config.jwt).issue(STAFF_EMAIL);

        let response = fixture.run(REFRESH, json!({ "token": token }), None).await;
        assert_eq!(error_code(&response), "REFRESH_EXPIRED");
        assert_eq!(error_message(&response), "Refresh has expired");
    }
}

// =============================================================================
// HTTP
// =============================================================================

mod http_tests {
    use super::*;

    async fn server() -> (TestServer, Arc<Catalog>) {
        let config = DashboardConfig::default();
        let catalog = Arc::new(Catalog::in_memory(&config));
        catalog.bootstrap_accounts(&accounts()).await.unwrap();

        let app = ServerBuilder::new(config)
            .with_catalog(catalog.clone())
            .build();
        let server = TestServer::new(app);
        (server, catalog)
    }

    fn auth_header(prefix: &str, token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("{} {}", prefix, token)).unwrap()
    }

    const PAGES: &str = "{ pages { totalCount } }";

    #[tokio::test]
    async fn test_health() {
        let (server, _) = server().await;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_schema_sdl() {
        let (server, _) = server().await;

        let response = server.get("/graphql/schema").await;
        response.assert_status_ok();
        assert!(response.text().contains("type ProductDashboard"));
    }

    #[tokio::test]
    async fn test_playground_enabled_by_default() {
        let (server, _) = server().await;

        let response = server.get("/graphql").await;
        response.assert_status_ok();
        assert!(response.text().contains("<html"));
    }

    #[tokio::test]
    async fn test_staff_token_grants_access() {
        let (server, catalog) = server().await;
        let token = catalog.token_auth(STAFF_EMAIL, PASSWORD).await.unwrap();

        let response = server
            .post("/graphql")
            .add_header(AUTHORIZATION, auth_header("JWT", &token))
            .json(&json!({ "query": PAGES }))
            .await;
        let body = response.json::<Value>();
        assert!(body.get("errors").is_none(), "{}", body);
        assert_eq!(body["data"]["pages"]["totalCount"], 0);
    }

    #[tokio::test]
    async fn test_customer_token_is_denied() {
        let (server, catalog) = server().await;
        let token = catalog.token_auth(CUSTOMER_EMAIL, PASSWORD).await.unwrap();

        let response = server
            .post("/graphql")
            .add_header(AUTHORIZATION, auth_header("JWT", &token))
            .json(&json!({ "query": PAGES }))
            .await;
        assert_eq!(error_code(&response.json::<Value>()), "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_missing_or_bad_credentials_are_anonymous() {
        let (server, catalog) = server().await;
        let token = catalog.token_auth(STAFF_EMAIL, PASSWORD).await.unwrap();

        let anonymous = server
            .post("/graphql")
            .json(&json!({ "query": PAGES }))
            .await;
        assert_eq!(error_code(&anonymous.json::<Value>()), "PERMISSION_DENIED");

        let wrong_prefix = server
            .post("/graphql")
            .add_header(AUTHORIZATION, auth_header("Bearer", &token))
            .json(&json!({ "query": PAGES }))
            .await;
        assert_eq!(error_code(&wrong_prefix.json::<Value>()), "PERMISSION_DENIED");

        let garbage = server
            .post("/graphql")
            .add_header(AUTHORIZATION, auth_header("JWT", "garbage"))
            .json(&json!({ "query": PAGES }))
            .await;
        assert_eq!(error_code(&garbage.json::<Value>()), "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_login_over_http() {
        let (server, _) = server().await;

        let response = server
            .post("/graphql")
            .json(&json!({
                "query": TOKEN_AUTH,
                "variables": { "email": CUSTOMER_EMAIL, "password": PASSWORD },
            }))
            .await;
        let body = response.json::<Value>();
        assert!(body["data"]["tokenAuth"]["token"].as_str().is_some());
    }
}
