//! Field guards backed by [`AuthPolicy`]

use async_graphql::{Context, ErrorExtensions, Guard, Result};

use crate::core::{AuthContext, AuthPolicy, DashboardError};

/// Rejects the field unless the request's [`AuthContext`] satisfies the policy
///
/// Requests without an injected context are treated as anonymous.
pub struct PolicyGuard {
    policy: AuthPolicy,
}

impl PolicyGuard {
    pub fn new(policy: AuthPolicy) -> Self {
        Self { policy }
    }

    pub fn staff() -> Self {
        Self::new(AuthPolicy::StaffOnly)
    }
}

impl Guard for PolicyGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        let allowed = match ctx.data_opt::<AuthContext>() {
            Some(auth) => self.policy.check(auth),
            None => self.policy.check(&AuthContext::Anonymous),
        };
        if allowed {
            Ok(())
        } else {
            Err(DashboardError::permission_denied().extend())
        }
    }
}
