//! Authorization for the dashboard API
//!
//! Every request carries an [`AuthContext`] resolved from its headers by an
//! [`AuthProvider`]. Resolvers then check an [`AuthPolicy`] against it.

use anyhow::Result;
use async_trait::async_trait;
use axum::http::HeaderMap;

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated staff member
    Staff { user_id: i64, email: String },

    /// Authenticated customer account
    User { user_id: i64, email: String },

    /// No (valid) credentials
    Anonymous,
}

impl AuthContext {
    /// Check if context represents a staff member
    pub fn is_staff(&self) -> bool {
        matches!(self, AuthContext::Staff { .. })
    }
}

/// Authorization policy for an operation
///
/// Token operations are public and resolve without a guard; everything
/// else in the API is staff-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Staff members only
    StaffOnly,
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::StaffOnly => context.is_staff(),
        }
    }
}

/// Resolves the caller of a request
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from the request headers
    ///
    /// Missing or unusable credentials resolve to [`AuthContext::Anonymous`];
    /// an `Err` means the provider itself failed.
    async fn extract_context(&self, headers: &HeaderMap) -> Result<AuthContext>;
}
