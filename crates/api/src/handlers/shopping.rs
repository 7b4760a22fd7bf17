//! Shopping list aggregated over a selection of recipes.

use axum::extract::{Query, State};
use axum::Json;
use cookbook_core::forms::{validate_form, FieldErrors, ShoppingForm};
use cookbook_core::shopping::{
    aggregate_ingredients, parse_recipe_ids, render_markdown, ShoppingLine,
};
use cookbook_core::types::DbId;
use cookbook_db::repositories::RecipeRepo;
use cookbook_db::DbPool;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireUser;
use crate::response::{FormErrors, Page};
use crate::state::AppState;

/// Query parameter carrying a selected recipe id, repeated per recipe.
const RECIPE_PARAM: &str = "r";

#[derive(Debug, Serialize)]
pub struct ShoppingPage {
    /// Selected recipe ids, in selection order.
    pub recipes: Vec<DbId>,
    pub markdown_format: bool,
    pub ingredients: Vec<ShoppingLine>,
    /// The list as a markdown checklist, when requested.
    pub markdown: Option<String>,
    pub form_errors: FormErrors,
}

/// GET /api/v1/shopping?r=1&r=2
///
/// Malformed or unknown recipe ids are dropped without error.
pub async fn shopping_list(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Page<ShoppingPage>> {
    let candidates = parse_recipe_ids(
        pairs
            .iter()
            .filter(|(key, _)| key == RECIPE_PARAM)
            .map(|(_, value)| value.as_str()),
    );
    let recipes = RecipeRepo::existing_ids(&state.pool, &candidates).await?;

    render(&state.pool, recipes, false, FormErrors::new()).await
}

/// POST /api/v1/shopping
///
/// Body: `{ "recipe": [ids], "markdown_format": bool }`. Every id must exist;
/// otherwise the form is rejected with field errors and the list is empty.
pub async fn shopping_submit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(form): Json<ShoppingForm>,
) -> AppResult<Page<ShoppingPage>> {
    let mut errors = FormErrors::new();

    let recipes = match check_selection(&state.pool, &form).await? {
        Ok(recipes) => recipes,
        Err(field_errors) => {
            tracing::debug!(user_id = user.user_id, "Rejected shopping selection");
            errors.insert("form", field_errors);
            Vec::new()
        }
    };

    render(&state.pool, recipes, form.markdown_format, errors).await
}

/// Validate the form and confirm every selected recipe exists.
async fn check_selection(
    pool: &DbPool,
    form: &ShoppingForm,
) -> AppResult<Result<Vec<DbId>, FieldErrors>> {
    if let Err(field_errors) = validate_form(form) {
        return Ok(Err(field_errors));
    }

    let mut selected: Vec<DbId> = Vec::with_capacity(form.recipe.len());
    for &id in &form.recipe {
        if !selected.contains(&id) {
            selected.push(id);
        }
    }

    let existing = RecipeRepo::existing_ids(pool, &selected).await?;
    let mut field_errors = FieldErrors::new();
    for id in selected.iter().filter(|id| !existing.contains(id)) {
        field_errors.add(
            "recipe",
            format!("Select a valid choice. {id} is not one of the available choices."),
        );
    }

    Ok(field_errors.into_result().map(|()| selected))
}

async fn render(
    pool: &DbPool,
    recipes: Vec<DbId>,
    markdown_format: bool,
    form_errors: FormErrors,
) -> AppResult<Page<ShoppingPage>> {
    let rows = if recipes.is_empty() {
        Vec::new()
    } else {
        RecipeRepo::ingredients_for_recipes(pool, &recipes).await?
    };
    let ingredients = aggregate_ingredients(rows.into_iter().map(Into::into));
    let markdown = markdown_format.then(|| render_markdown(&ingredients));

    Ok(Page::new(
        "shopping_list",
        ShoppingPage {
            recipes,
            markdown_format,
            ingredients,
            markdown,
            form_errors,
        },
    ))
}
