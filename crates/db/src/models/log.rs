//! View and cook log models.

use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A `view_logs` row joined with the recipe name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ViewLog {
    pub id: DbId,
    pub recipe_id: DbId,
    pub recipe_name: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// A `cook_logs` row joined with the recipe name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CookLog {
    pub id: DbId,
    pub recipe_id: DbId,
    pub recipe_name: String,
    pub created_by: DbId,
    pub servings: i32,
    pub rating: Option<i32>,
    pub created_at: Timestamp,
}

/// DTO for appending a cook log.
#[derive(Debug)]
pub struct CreateCookLog {
    pub recipe_id: DbId,
    pub created_by: DbId,
    pub servings: i32,
    pub rating: Option<i32>,
}
