//! First-run setup: creates the initial administrator account.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cookbook_core::forms::{validate_form, FieldErrors, SuperUserForm};
use cookbook_core::roles::ROLE_ADMIN;
use cookbook_db::models::user::CreateUser;
use cookbook_db::repositories::{RoleRepo, UserRepo};
use serde::Serialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::notices::Notices;
use crate::response::{paths, FormErrors, Page, Redirect};
use crate::state::AppState;

const SETUP_CLOSED: &str = "The setup page can only be used to create the first user! \
    If you have forgotten your superuser credentials, reset the password from the server.";

#[derive(Debug, Default, Serialize)]
pub struct SetupPage {
    pub form_errors: FormErrors,
}

/// GET /api/v1/setup
pub async fn setup(State(state): State<AppState>) -> AppResult<Response> {
    if let Some(redirect) = setup_closed(&state).await? {
        return Ok(redirect.into_response());
    }
    Ok(Page::new("setup", SetupPage::default()).into_response())
}

/// POST /api/v1/setup
///
/// Body: `{ "name", "password", "password_confirm" }`.
pub async fn setup_submit(
    State(state): State<AppState>,
    Json(form): Json<SuperUserForm>,
) -> AppResult<Response> {
    if let Some(redirect) = setup_closed(&state).await? {
        return Ok(redirect.into_response());
    }

    if let Err(field_errors) = check_form(&state, &form) {
        let mut form_errors = FormErrors::new();
        form_errors.insert("form", field_errors);
        return Ok(Page::new("setup", SetupPage { form_errors }).into_response());
    }

    let role = RoleRepo::find_by_name(&state.pool, ROLE_ADMIN)
        .await?
        .ok_or_else(|| AppError::InternalError("Admin role is not seeded".into()))?;
    let password_hash = hash_password(&form.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: form.name.clone(),
            email: None,
            password_hash,
            role_id: role.id,
            is_superuser: true,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "Initial superuser created");

    Ok(Redirect::to(paths::LOGIN)
        .with_messages(Notices::with_success("User has been created, please login!"))
        .into_response())
}

/// Setup is only open while no account exists and sign-in is not delegated.
async fn setup_closed(state: &AppState) -> AppResult<Option<Redirect>> {
    if state.config.remote_user_auth || UserRepo::count(&state.pool).await? > 0 {
        return Ok(Some(
            Redirect::to(paths::LOGIN).with_messages(Notices::with_error(SETUP_CLOSED)),
        ));
    }
    Ok(None)
}

fn check_form(state: &AppState, form: &SuperUserForm) -> Result<(), FieldErrors> {
    validate_form(form)?;
    form.check_confirmation()?;
    state
        .password_policy()
        .validate(&form.password, Some(&form.name))
        .map_err(|messages| {
            let mut field_errors = FieldErrors::new();
            field_errors.add_all("password", messages);
            field_errors
        })
}
