//! Recipe, keyword and ingredient models.

use cookbook_core::shopping::IngredientRow;
use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `recipes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `keywords` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Keyword {
    pub id: DbId,
    pub name: String,
    pub icon: Option<String>,
}

/// An ingredient line of a recipe, joined with its ingredient and unit names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeIngredientDetail {
    pub id: DbId,
    pub recipe_id: DbId,
    pub ingredient_id: DbId,
    pub ingredient_name: String,
    pub unit_id: DbId,
    pub unit_name: String,
    pub amount: f64,
    pub note: String,
}

impl From<RecipeIngredientDetail> for IngredientRow {
    fn from(row: RecipeIngredientDetail) -> Self {
        Self {
            ingredient_id: row.ingredient_id,
            ingredient_name: row.ingredient_name,
            unit_id: row.unit_id,
            unit_name: row.unit_name,
            amount: row.amount,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a recipe.
#[derive(Debug)]
pub struct CreateRecipe {
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
}

/// DTO for attaching an ingredient line to a recipe.
#[derive(Debug)]
pub struct CreateRecipeIngredient {
    pub recipe_id: DbId,
    pub ingredient_id: DbId,
    pub unit_id: DbId,
    pub amount: f64,
    pub note: String,
}

/// Search filters for the recipe listing.
#[derive(Debug, Default, Clone)]
pub struct RecipeFilter {
    /// Case-insensitive substring of the recipe name.
    pub name: Option<String>,
    /// A recipe must carry every listed keyword.
    pub keywords: Vec<DbId>,
}
