//! Repository for the `comments` table.

use cookbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::Comment;

/// Provides access to recipe comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment, returning it joined with the author's username.
    pub async fn create(
        pool: &PgPool,
        recipe_id: DbId,
        user_id: DbId,
        text: &str,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "WITH inserted AS (
                 INSERT INTO comments (recipe_id, created_by, text)
                 VALUES ($1, $2, $3)
                 RETURNING id, recipe_id, created_by, text, created_at
             )
             SELECT c.id, c.recipe_id, c.created_by, u.username AS author, c.text, c.created_at
             FROM inserted c
             JOIN users u ON u.id = c.created_by",
        )
        .bind(recipe_id)
        .bind(user_id)
        .bind(text)
        .fetch_one(pool)
        .await
    }

    /// Comments on a recipe, oldest first.
    pub async fn list_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "SELECT c.id, c.recipe_id, c.created_by, u.username AS author, c.text, c.created_at
             FROM comments c
             JOIN users u ON u.id = c.created_by
             WHERE c.recipe_id = $1
             ORDER BY c.created_at, c.id",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }
}
