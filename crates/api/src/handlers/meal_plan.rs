//! Weekly meal plan page and single plan entries.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDate};
use cookbook_core::forms::{validate_form, MealPlanWeekForm};
use cookbook_core::meal_plan::{order_by_meal_type, MealPlanGrid, WeekKey, WeekRange};
use cookbook_core::types::DbId;
use cookbook_db::models::meal_plan::MealPlan;
use cookbook_db::repositories::MealPlanRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireUser;
use crate::notices::Notices;
use crate::response::{paths, FormErrors, Page, Redirect};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MealPlanPage {
    /// The displayed week, e.g. `2024-W10`.
    pub week: WeekKey,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub next: WeekKey,
    pub prev: WeekKey,
    pub days: Vec<NaiveDate>,
    pub plan: MealPlanGrid<MealPlan>,
    pub form_errors: FormErrors,
}

#[derive(Debug, Serialize)]
pub struct MealPlanEntryPage {
    pub plan: MealPlan,
    /// Other entries on the same day visible to the caller, by meal type.
    pub same_day_plan: Vec<MealPlan>,
}

/// GET /api/v1/plan
///
/// The week containing today.
pub async fn meal_plan(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> AppResult<Page<MealPlanPage>> {
    render_week(&state, user.user_id, current_week(), FormErrors::new()).await
}

/// POST /api/v1/plan
///
/// Body: `{ "week": "YYYY-Www" }`. An invalid week is reported on the `week`
/// field and the current week is shown instead.
pub async fn meal_plan_select(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(form): Json<MealPlanWeekForm>,
) -> AppResult<Page<MealPlanPage>> {
    let mut errors = FormErrors::new();
    let mut notices = Notices::new();
    let week = match validate_form(&form).map(|()| form.week_key()) {
        Ok(Some(week)) => week,
        Ok(None) => current_week(),
        Err(field_errors) => {
            errors.insert("week", field_errors);
            notices.info("Showing the current week instead.");
            current_week()
        }
    };
    Ok(render_week(&state, user.user_id, week, errors)
        .await?
        .with_messages(notices))
}

/// GET /api/v1/plan/entries/{id}
pub async fn meal_plan_entry(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(entry_id): Path<DbId>,
) -> AppResult<Response> {
    let plan = MealPlanRepo::find_by_id(&state.pool, entry_id)
        .await?
        .ok_or_else(|| AppError::not_found("MealPlan", entry_id))?;

    if !plan.is_visible_to(user.user_id) {
        tracing::info!(user_id = user.user_id, entry_id, "Meal plan entry not visible to user");
        return Ok(Redirect::to(paths::LANDING)
            .with_messages(Notices::with_error(
                "You do not have the required permissions to view this page!",
            ))
            .into_response());
    }

    let mut same_day_plan =
        MealPlanRepo::list_visible_on_date(&state.pool, user.user_id, plan.date, plan.id).await?;
    order_by_meal_type(&mut same_day_plan, MealPlan::meal_type);

    Ok(Page::new("meal_plan_entry", MealPlanEntryPage { plan, same_day_plan }).into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn current_week() -> WeekKey {
    WeekKey::containing(Local::now().date_naive())
}

async fn render_week(
    state: &AppState,
    user_id: DbId,
    week: WeekKey,
    form_errors: FormErrors,
) -> AppResult<Page<MealPlanPage>> {
    let range = WeekRange::resolve(week);
    let entries =
        MealPlanRepo::list_visible_in_range(&state.pool, user_id, range.first_day, range.last_day)
            .await?;

    let mut plan = MealPlanGrid::new(&range);
    for entry in entries {
        let (meal_type, date) = (entry.meal_type(), entry.date);
        plan.insert(meal_type, date, entry);
    }

    Ok(Page::new(
        "meal_plan",
        MealPlanPage {
            week: range.key,
            first_day: range.first_day,
            last_day: range.last_day,
            next: range.next,
            prev: range.prev,
            days: range.days(),
            plan,
            form_errors,
        },
    ))
}
