//! Route definitions for the `/plan` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::meal_plan;
use crate::state::AppState;

/// Routes mounted at `/plan`.
///
/// ```text
/// GET  /               -> meal_plan (current week)
/// POST /               -> meal_plan_select (week from form)
/// GET  /entries/{id}   -> meal_plan_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(meal_plan::meal_plan).post(meal_plan::meal_plan_select),
        )
        .route("/entries/{id}", get(meal_plan::meal_plan_entry))
}
