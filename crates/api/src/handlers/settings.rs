//! Account settings: display preferences, name and password.

use axum::extract::State;
use axum::Json;
use cookbook_core::forms::{
    validate_form, FieldErrors, PasswordChangeForm, PreferenceForm, UserNameForm,
};
use cookbook_core::types::DbId;
use cookbook_db::models::preference::UpsertPreference;
use cookbook_db::models::user::{User, UserSummary};
use cookbook_db::repositories::{PreferenceRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::{issue_tokens, AuthResponse};
use crate::handlers::load_settings;
use crate::middleware::rbac::RequireGuest;
use crate::notices::Notices;
use crate::response::{FormErrors, Page};
use crate::state::AppState;

/// The three independent settings forms; each present key is processed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsForms {
    pub preference_form: Option<PreferenceForm>,
    pub user_name_form: Option<UserNameForm>,
    pub password_form: Option<PasswordChangeForm>,
}

#[derive(Debug, Serialize)]
pub struct SettingsPage {
    pub preference_form: PreferenceForm,
    pub user_name_form: UserNameForm,
    /// Users the caller may share meal plans with.
    pub users: Vec<UserSummary>,
    pub form_errors: FormErrors,
    /// New credentials after a password change; all older sessions are revoked.
    pub tokens: Option<AuthResponse>,
}

/// GET /api/v1/settings
pub async fn user_settings(
    State(state): State<AppState>,
    RequireGuest(auth): RequireGuest,
) -> AppResult<Page<SettingsPage>> {
    let user = current_user(&state, auth.user_id).await?;
    render(&state, &user, Notices::new(), FormErrors::new(), None).await
}

/// POST /api/v1/settings
///
/// Body: any of `preference_form`, `user_name_form`, `password_form`.
pub async fn user_settings_submit(
    State(state): State<AppState>,
    RequireGuest(auth): RequireGuest,
    Json(forms): Json<SettingsForms>,
) -> AppResult<Page<SettingsPage>> {
    let mut user = current_user(&state, auth.user_id).await?;
    let mut notices = Notices::new();
    let mut errors = FormErrors::new();
    let mut tokens = None;

    if let Some(form) = forms.preference_form {
        match save_preferences(&state, &user, &form).await? {
            Ok(()) => notices.success("Preferences saved!"),
            Err(field_errors) => errors.insert("preference_form", field_errors),
        }
    }

    if let Some(form) = forms.user_name_form {
        match validate_form(&form) {
            Ok(()) => {
                user = UserRepo::update_name(
                    &state.pool,
                    user.id,
                    &form.first_name,
                    &form.last_name,
                )
                .await?
                .ok_or_else(|| AppError::not_found("User", auth.user_id))?;
                notices.success("Name saved!");
            }
            Err(field_errors) => errors.insert("user_name_form", field_errors),
        }
    }

    if let Some(form) = forms.password_form {
        match change_password(&state, &user, &form).await? {
            Ok(pair) => {
                tokens = Some(pair);
                notices.success("Password changed!");
            }
            Err(field_errors) => errors.insert("password_form", field_errors),
        }
    }

    render(&state, &user, notices, errors, tokens).await
}

// ---------------------------------------------------------------------------
// Form processing
// ---------------------------------------------------------------------------

async fn save_preferences(
    state: &AppState,
    user: &User,
    form: &PreferenceForm,
) -> AppResult<Result<(), FieldErrors>> {
    let mut field_errors = match validate_form(form) {
        Ok(()) => FieldErrors::new(),
        Err(e) => e,
    };

    let mut plan_share = form.plan_share.clone();
    plan_share.sort_unstable();
    plan_share.dedup();
    if plan_share.contains(&user.id) {
        field_errors.add("plan_share", "You cannot share meal plans with yourself.");
    }
    let known = UserRepo::existing_ids(&state.pool, &plan_share).await?;
    for id in plan_share.iter().filter(|id| !known.contains(id)) {
        field_errors.add(
            "plan_share",
            format!("Select a valid choice. {id} is not one of the available choices."),
        );
    }

    if !field_errors.is_empty() {
        return Ok(Err(field_errors));
    }

    let settings = form.settings();
    PreferenceRepo::save(&state.pool, user.id, &UpsertPreference::from(&settings), &plan_share)
        .await?;
    tracing::info!(user_id = user.id, default_page = %settings.default_page, "Preferences saved");
    Ok(Ok(()))
}

/// Verify the old password, enforce the policy, store the new hash and
/// replace every refresh session with a fresh token pair.
async fn change_password(
    state: &AppState,
    user: &User,
    form: &PasswordChangeForm,
) -> AppResult<Result<AuthResponse, FieldErrors>> {
    if let Err(field_errors) = validate_form(form) {
        return Ok(Err(field_errors));
    }

    let old_valid = verify_password(&form.old_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !old_valid {
        return Ok(Err(FieldErrors::single(
            "old_password",
            "Your old password was entered incorrectly. Please enter it again.",
        )));
    }

    if let Err(messages) = state
        .password_policy()
        .validate(&form.new_password1, Some(&user.username))
    {
        let mut field_errors = FieldErrors::new();
        field_errors.add_all("new_password2", messages);
        return Ok(Err(field_errors));
    }

    let hash = hash_password(&form.new_password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hash).await?;

    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, revoked, "Password changed");

    Ok(Ok(issue_tokens(state, user).await?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn current_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))
}

async fn render(
    state: &AppState,
    user: &User,
    notices: Notices,
    form_errors: FormErrors,
    tokens: Option<AuthResponse>,
) -> AppResult<Page<SettingsPage>> {
    let settings = load_settings(&state.pool, user.id).await?;
    let plan_share = PreferenceRepo::plan_share(&state.pool, user.id).await?;
    let users = UserRepo::list_others(&state.pool, user.id).await?;

    Ok(Page::new(
        "settings",
        SettingsPage {
            preference_form: PreferenceForm::from_settings(&settings, plan_share),
            user_name_form: UserNameForm {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
            users,
            form_errors,
            tokens,
        },
    )
    .with_messages(notices))
}
