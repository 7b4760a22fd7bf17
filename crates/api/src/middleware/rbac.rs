//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is below
//! the gate. Higher roles pass lower gates: an admin passes [`RequireUser`],
//! a user passes [`RequireGuest`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cookbook_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

const PERMISSION_DENIED: &str = "You do not have the required permissions to view this page!";

async fn require(
    parts: &mut Parts,
    state: &AppState,
    required: Role,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.role.allows(required) {
        tracing::debug!(
            user_id = user.user_id,
            role = %user.role,
            required = %required,
            "Role check failed",
        );
        return Err(AppError::forbidden(PERMISSION_DENIED));
    }
    Ok(user)
}

/// Requires at least the `guest` role (any signed-in account).
pub struct RequireGuest(pub AuthUser);

impl FromRequestParts<AppState> for RequireGuest {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Role::Guest).await.map(RequireGuest)
    }
}

/// Requires at least the `user` role.
pub struct RequireUser(pub AuthUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Role::User).await.map(RequireUser)
    }
}

/// Requires the `admin` role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Role::Admin).await.map(RequireAdmin)
    }
}
