//! Sign-in endpoints. Pages that need a role read the access token issued
//! here; the settings page reissues a pair after a password change.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /login    username + password, returns a token pair
/// POST /refresh  rotates a refresh token
/// POST /logout   ends every session of the signed-in user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
