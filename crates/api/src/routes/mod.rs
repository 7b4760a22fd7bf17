pub mod auth;
pub mod health;
pub mod plan;
pub mod recipes;

use axum::routing::get;
use axum::Router;

use crate::handlers::{books, history, index, info, search, settings, setup, shopping, system};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  landing redirect
/// /search                            recipe search (anonymous: index page)
///
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
///
/// /recipes/{id}                      detail, comment + bookmark forms (guest)
/// /recipes/{id}/cook                 cook log (user)
///
/// /books                             recipe books (user)
///
/// /plan                              week view, week select (user)
/// /plan/entries/{id}                 single meal plan entry (user)
///
/// /shopping                          shopping list, r= params or form (user)
/// /settings                          preferences, name, password (guest)
/// /history                           view and cook log (guest)
/// /system                            deployment info (admin)
/// /setup                             first-run superuser creation (public)
/// /info/markdown                     markdown help page (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index::landing))
        .route("/search", get(search::search))
        .nest("/auth", auth::router())
        .nest("/recipes", recipes::router())
        .route("/books", get(books::books))
        .nest("/plan", plan::router())
        .route(
            "/shopping",
            get(shopping::shopping_list).post(shopping::shopping_submit),
        )
        .route(
            "/settings",
            get(settings::user_settings).post(settings::user_settings_submit),
        )
        .route("/history", get(history::history))
        .route("/system", get(system::system))
        .route("/setup", get(setup::setup).post(setup::setup_submit))
        .route("/info/markdown", get(info::markdown_info))
}
