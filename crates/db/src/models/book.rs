//! Recipe book models and DTOs.

use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recipe_books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeBook {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A bookmarked recipe, joined with the recipe name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookEntry {
    pub id: DbId,
    pub book_id: DbId,
    pub recipe_id: DbId,
    pub recipe_name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a recipe book.
#[derive(Debug)]
pub struct CreateRecipeBook {
    pub name: String,
    pub description: String,
    pub created_by: DbId,
}
