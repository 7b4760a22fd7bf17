//! Repository for the append-only `view_logs` and `cook_logs` tables.

use cookbook_core::history::RecentList;
use cookbook_core::types::{DbId, Timestamp};
use futures::TryStreamExt;
use sqlx::PgPool;

use crate::models::log::{CookLog, CreateCookLog, ViewLog};

const VIEW_COLUMNS: &str = "\
    v.id, v.recipe_id, r.name AS recipe_name, v.created_by, v.created_at";

const COOK_COLUMNS: &str = "\
    c.id, c.recipe_id, r.name AS recipe_name, c.created_by, c.servings, c.rating, c.created_at";

/// Provides access to view and cook history.
pub struct LogRepo;

impl LogRepo {
    // -----------------------------------------------------------------------
    // View logs
    // -----------------------------------------------------------------------

    /// Timestamp of the user's most recent logged view of a recipe.
    pub async fn latest_view_at(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT MAX(created_at) FROM view_logs WHERE created_by = $1 AND recipe_id = $2",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(pool)
        .await
    }

    /// Append a view log row.
    pub async fn create_view(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO view_logs (recipe_id, created_by) VALUES ($1, $2) RETURNING id",
        )
        .bind(recipe_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// The `limit` most recently viewed distinct recipes for a user.
    ///
    /// Streams the log newest first and stops as soon as enough distinct
    /// recipes were seen, so long histories are never loaded whole.
    pub async fn recent_distinct_views(
        pool: &PgPool,
        user_id: DbId,
        limit: usize,
    ) -> Result<Vec<ViewLog>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM view_logs v
             JOIN recipes r ON r.id = v.recipe_id
             WHERE v.created_by = $1
             ORDER BY v.created_at DESC, v.id DESC"
        );
        let mut rows = sqlx::query_as::<_, ViewLog>(&query)
            .bind(user_id)
            .fetch(pool);

        let mut recent = RecentList::new(limit);
        while !recent.is_full() {
            let Some(row) = rows.try_next().await? else {
                break;
            };
            recent.push(row.recipe_id, row);
        }
        Ok(recent.into_items())
    }

    /// One page of the user's view log, newest first.
    pub async fn list_views(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ViewLog>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM view_logs v
             JOIN recipes r ON r.id = v.recipe_id
             WHERE v.created_by = $1
             ORDER BY v.created_at DESC, v.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ViewLog>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of view log rows for a user, optionally for one recipe.
    pub async fn count_views(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM view_logs
             WHERE created_by = $1 AND ($2::BIGINT IS NULL OR recipe_id = $2)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Cook logs
    // -----------------------------------------------------------------------

    /// Append a cook log row, returning it joined with the recipe name.
    pub async fn create_cook(pool: &PgPool, input: &CreateCookLog) -> Result<CookLog, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                 INSERT INTO cook_logs (recipe_id, created_by, servings, rating)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, recipe_id, created_by, servings, rating, created_at
             )
             SELECT {COOK_COLUMNS} FROM c
             JOIN recipes r ON r.id = c.recipe_id"
        );
        sqlx::query_as::<_, CookLog>(&query)
            .bind(input.recipe_id)
            .bind(input.created_by)
            .bind(input.servings)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    /// One page of the user's cook log, newest first.
    pub async fn list_cooks(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CookLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COOK_COLUMNS} FROM cook_logs c
             JOIN recipes r ON r.id = c.recipe_id
             WHERE c.created_by = $1
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CookLog>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of cook log rows for a user.
    pub async fn count_cooks(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cook_logs WHERE created_by = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
