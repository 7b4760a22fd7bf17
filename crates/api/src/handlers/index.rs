//! Landing route: sends each caller to the page they should start on.

use axum::extract::State;
use cookbook_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::handlers::load_settings;
use crate::middleware::auth::MaybeAuthUser;
use crate::response::{paths, Redirect};
use crate::state::AppState;

/// GET /api/v1/
///
/// Anonymous callers go to first-run setup while no account exists (and
/// sign-in is not delegated), otherwise to search. Signed-in callers go to
/// their preferred default page.
pub async fn landing(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> AppResult<Redirect> {
    let Some(user) = user else {
        if !state.config.remote_user_auth && UserRepo::count(&state.pool).await? < 1 {
            return Ok(Redirect::to(paths::SETUP));
        }
        return Ok(Redirect::to(paths::SEARCH));
    };

    let settings = load_settings(&state.pool, user.user_id).await?;
    Ok(Redirect::to(settings.default_page.path()))
}
