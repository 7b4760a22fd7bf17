//! Recipe detail page: comments, bookmarks, cook log and view history.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use cookbook_core::forms::{validate_form, BookmarkForm, CommentForm, CookLogForm, FieldErrors};
use cookbook_core::history::should_record_view;
use cookbook_core::types::DbId;
use cookbook_db::models::book::RecipeBook;
use cookbook_db::models::comment::Comment;
use cookbook_db::models::log::CreateCookLog;
use cookbook_db::models::recipe::{Keyword, Recipe, RecipeIngredientDetail};
use cookbook_db::repositories::{BookRepo, CommentRepo, LogRepo, RecipeRepo};
use cookbook_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireGuest, RequireUser};
use crate::notices::Notices;
use crate::response::{paths, FormErrors, Page, Redirect};
use crate::state::AppState;

/// Forms that may be submitted together on the recipe page. Each present
/// form is handled independently of the other.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipeForms {
    pub comment: Option<CommentForm>,
    pub bookmark: Option<BookmarkForm>,
}

#[derive(Debug, Serialize)]
pub struct RecipePage {
    pub recipe: Recipe,
    pub keywords: Vec<Keyword>,
    pub ingredients: Vec<RecipeIngredientDetail>,
    pub comments: Vec<Comment>,
    /// Books the caller may bookmark into.
    pub books: Vec<RecipeBook>,
    pub form_errors: FormErrors,
}

/// GET /api/v1/recipes/{id}
pub async fn recipe_view(
    State(state): State<AppState>,
    RequireGuest(user): RequireGuest,
    Path(recipe_id): Path<DbId>,
) -> AppResult<Page<RecipePage>> {
    let recipe = find_recipe(&state.pool, recipe_id).await?;
    render(&state, &user, recipe, Notices::new(), FormErrors::new()).await
}

/// POST /api/v1/recipes/{id}
///
/// Body: `{ "comment": { "text" }, "bookmark": { "book" } }`, either key optional.
pub async fn recipe_submit(
    State(state): State<AppState>,
    RequireGuest(user): RequireGuest,
    Path(recipe_id): Path<DbId>,
    Json(forms): Json<RecipeForms>,
) -> AppResult<Page<RecipePage>> {
    let recipe = find_recipe(&state.pool, recipe_id).await?;
    let mut notices = Notices::new();
    let mut errors = FormErrors::new();

    if let Some(form) = forms.comment {
        match validate_form(&form) {
            Ok(()) => {
                let comment =
                    CommentRepo::create(&state.pool, recipe.id, user.user_id, &form.text).await?;
                tracing::info!(
                    user_id = user.user_id,
                    recipe_id = recipe.id,
                    comment_id = comment.id,
                    "Comment saved",
                );
                notices.success("Comment saved!");
            }
            Err(field_errors) => errors.insert("comment", field_errors),
        }
    }

    if let Some(form) = forms.bookmark {
        match save_bookmark(&state.pool, &user, recipe.id, &form).await? {
            Ok(()) => notices.success("Bookmark saved!"),
            Err(field_errors) => errors.insert("bookmark", field_errors),
        }
    }

    render(&state, &user, recipe, notices, errors).await
}

/// POST /api/v1/recipes/{id}/cook
///
/// Body: `{ "servings", "rating" }`. Redirects back to the recipe on success;
/// re-renders the recipe page with field errors otherwise.
pub async fn cook_log(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(recipe_id): Path<DbId>,
    Json(form): Json<CookLogForm>,
) -> AppResult<Response> {
    let recipe = find_recipe(&state.pool, recipe_id).await?;

    if let Err(field_errors) = validate_form(&form) {
        let mut errors = FormErrors::new();
        errors.insert("cook", field_errors);
        return Ok(render(&state, &user, recipe, Notices::new(), errors)
            .await?
            .into_response());
    }

    let input = CreateCookLog {
        recipe_id: recipe.id,
        created_by: user.user_id,
        servings: form.servings,
        rating: form.rating,
    };
    let log = LogRepo::create_cook(&state.pool, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        recipe_id = recipe.id,
        cook_log_id = log.id,
        "Cook log saved",
    );

    Ok(Redirect::to(&paths::recipe(recipe.id))
        .with_messages(Notices::with_success("Cook log saved!"))
        .into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_recipe(pool: &DbPool, recipe_id: DbId) -> AppResult<Recipe> {
    RecipeRepo::find_by_id(pool, recipe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe", recipe_id))
}

/// Validate and store a bookmark. The inner `Err` carries field errors.
async fn save_bookmark(
    pool: &DbPool,
    user: &AuthUser,
    recipe_id: DbId,
    form: &BookmarkForm,
) -> AppResult<Result<(), FieldErrors>> {
    if let Err(field_errors) = validate_form(form) {
        return Ok(Err(field_errors));
    }
    if !BookRepo::is_visible(pool, form.book, user.user_id).await? {
        return Ok(Err(FieldErrors::single(
            "book",
            "Select a valid choice. That choice is not one of the available choices.",
        )));
    }
    if !BookRepo::add_entry(pool, form.book, recipe_id).await? {
        return Ok(Err(FieldErrors::single(
            "book",
            "This recipe is already linked to the book!",
        )));
    }
    tracing::info!(user_id = user.user_id, recipe_id, book_id = form.book, "Bookmark saved");
    Ok(Ok(()))
}

/// Log a view unless the same user viewed the same recipe within the
/// dedup window.
async fn record_view(pool: &DbPool, user_id: DbId, recipe_id: DbId) -> AppResult<()> {
    let last = LogRepo::latest_view_at(pool, user_id, recipe_id).await?;
    if should_record_view(last, Utc::now()) {
        LogRepo::create_view(pool, user_id, recipe_id).await?;
    }
    Ok(())
}

async fn render(
    state: &AppState,
    user: &AuthUser,
    recipe: Recipe,
    notices: Notices,
    form_errors: FormErrors,
) -> AppResult<Page<RecipePage>> {
    let keywords = RecipeRepo::keywords_for_recipe(&state.pool, recipe.id).await?;
    let ingredients = RecipeRepo::ingredients_for_recipes(&state.pool, &[recipe.id]).await?;
    let comments = CommentRepo::list_for_recipe(&state.pool, recipe.id).await?;
    let books = BookRepo::list_visible(&state.pool, user.user_id).await?;

    record_view(&state.pool, user.user_id, recipe.id).await?;

    Ok(Page::new(
        "recipe_view",
        RecipePage {
            recipe,
            keywords,
            ingredients,
            comments,
            books,
            form_errors,
        },
    )
    .with_messages(notices))
}
