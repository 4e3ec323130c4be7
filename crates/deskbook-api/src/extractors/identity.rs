//! Caller identity from the headers set by the upstream authenticating proxy.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use deskbook_core::AppError;
use deskbook_service::{RequestContext, Role};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's role (`admin` or anything else).
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Any identified caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing X-User-Id header"))?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(Role::from_header)
            .unwrap_or_default();

        Ok(AuthUser(RequestContext::new(user_id, role)))
    }
}

/// A caller holding the admin role; anyone else is rejected with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;
        ctx.require_admin()?;
        Ok(AdminUser(ctx))
    }
}
