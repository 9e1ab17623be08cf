//! Accounts, token operations and request authentication

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use super::Catalog;
use crate::config::AccountConfig;
use crate::core::error::{AuthError, DashboardError, DashboardResult};
use crate::core::password::{hash_password, verify_password};
use crate::core::{AuthContext, AuthProvider, Claims};
use crate::models::User;

impl Catalog {
    /// Create an account; the email must not be registered yet
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        is_staff: bool,
    ) -> DashboardResult<User> {
        self.insert_user(email, password, is_staff)
            .await?
            .ok_or_else(|| DashboardError::field("email", "User with this Email already exists."))
    }

    /// `None` when the email is already registered
    async fn insert_user(
        &self,
        email: &str,
        password: &str,
        is_staff: bool,
    ) -> DashboardResult<Option<User>> {
        let user = User::new(email, hash_password(password)?, is_staff);
        let email = user.email.clone();
        Ok(self.users.create_unique("email", &email, user).await?)
    }

    /// Create the configured accounts that do not exist yet
    ///
    /// Returns how many were created.
    pub async fn bootstrap_accounts(&self, accounts: &[AccountConfig]) -> DashboardResult<usize> {
        let mut created = 0;
        for account in accounts {
            if self.find_user(&account.email).await?.is_some() {
                tracing::debug!(email = %account.email, "account already exists");
                continue;
            }
            let inserted = self
                .insert_user(&account.email, &account.password, account.is_staff)
                .await?;
            if inserted.is_none() {
                tracing::debug!(email = %account.email, "account already exists");
                continue;
            }
            tracing::info!(email = %account.email, staff = account.is_staff, "account created");
            created += 1;
        }
        Ok(created)
    }

    pub async fn find_user(&self, email: &str) -> DashboardResult<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self.users.search("email", &email).await?.into_iter().next())
    }

    /// Exchange credentials for a token
    pub async fn token_auth(&self, email: &str, password: &str) -> DashboardResult<String> {
        let user = self
            .find_user(email)
            .await?
            .filter(|user| user.is_active);
        let Some(user) = user else {
            tracing::warn!(email = %email, "login rejected: unknown or inactive account");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(email = %user.email, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(self.jwt.issue(&user.email))
    }

    pub fn verify_token(&self, token: &str) -> DashboardResult<Claims> {
        Ok(self.jwt.verify(token)?)
    }

    pub fn refresh_token(&self, token: &str) -> DashboardResult<(String, Claims)> {
        Ok(self.jwt.refresh(token)?)
    }

    /// Resolve a token to the caller it identifies
    ///
    /// Tokens of deleted or deactivated accounts are rejected even while their
    /// signature is still valid.
    pub async fn authenticate(&self, token: &str) -> DashboardResult<AuthContext> {
        let claims = self.jwt.verify(token)?;
        let user = self
            .find_user(&claims.email)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(if user.is_staff {
            AuthContext::Staff {
                user_id: user.pk,
                email: user.email,
            }
        } else {
            AuthContext::User {
                user_id: user.pk,
                email: user.email,
            }
        })
    }
}

/// Reads `Authorization: <prefix> <token>` and resolves it through the catalog
pub struct JwtAuthProvider {
    catalog: Arc<Catalog>,
}

impl JwtAuthProvider {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    fn token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, token) = value.trim().split_once(' ')?;
        scheme
            .eq_ignore_ascii_case(self.catalog.jwt().header_prefix())
            .then(|| token.trim())
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext> {
        let Some(token) = self.token(headers) else {
            return Ok(AuthContext::Anonymous);
        };

        match self.catalog.authenticate(token).await {
            Ok(context) => Ok(context),
            Err(DashboardError::Auth(e)) => {
                tracing::debug!("token rejected: {}", e);
                Ok(AuthContext::Anonymous)
            }
            Err(e) => Err(e.into()),
        }
    }
}
