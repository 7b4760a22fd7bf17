//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use cookbook_core::roles::Role;
use cookbook_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Effective role at token issue time.
    pub role: Role,
}

impl AuthUser {
    fn from_header(value: &str, state: &AppState) -> Result<Self, AppError> {
        let token = value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let role = claims
            .role
            .parse()
            .map_err(|_| AppError::unauthorized("Token carries an unknown role"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        AuthUser::from_header(header, state)
    }
}

/// The caller, if a token was presented.
///
/// A missing header means an anonymous caller; a header that is present but
/// invalid is still rejected with 401 so expired sessions are noticed.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get(AUTHORIZATION) {
            None => Ok(MaybeAuthUser(None)),
            Some(value) => {
                let value = value
                    .to_str()
                    .map_err(|_| AppError::unauthorized("Malformed Authorization header"))?;
                AuthUser::from_header(value, state).map(|user| MaybeAuthUser(Some(user)))
            }
        }
    }
}
