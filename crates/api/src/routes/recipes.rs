//! Route definitions for the `/recipes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recipe;
use crate::state::AppState;

/// Routes mounted at `/recipes`.
///
/// ```text
/// GET  /{id}       -> recipe_view
/// POST /{id}       -> recipe_submit
/// POST /{id}/cook  -> cook_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(recipe::recipe_view).post(recipe::recipe_submit))
        .route("/{id}/cook", post(recipe::cook_log))
}
