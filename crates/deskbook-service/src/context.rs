//! Request context carrying the caller's identity and role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskbook_core::{AppError, AppResult};

/// The role asserted by the upstream authenticating proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

impl Role {
    /// `admin` (any case) maps to [`Role::Admin`]; everything else is a member.
    pub fn from_header(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::Member
        }
    }
}

/// Context for the current request.
///
/// Built by the HTTP layer and passed into service methods so that every
/// operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Opaque id of the acting user.
    pub user_id: String,
    pub role: Role,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            request_time: Utc::now(),
        }
    }

    pub fn member(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Member)
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fail with `Forbidden` unless the caller is an admin.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin role required"))
        }
    }
}
