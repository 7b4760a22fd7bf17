//! Repository for the `user_preferences` and `preference_plan_shares` tables.

use cookbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::preference::{UpsertPreference, UserPreference};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, user_id, theme, nav_color, default_unit, default_page, search_style, \
    show_recent, comment_notifications, created_at, updated_at";

/// Provides access to per-user preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Get the preference row for a user.
    ///
    /// Returns `None` if the user has never saved the settings form.
    pub async fn get(pool: &PgPool, user_id: DbId) -> Result<Option<UserPreference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_preferences WHERE user_id = $1");
        sqlx::query_as::<_, UserPreference>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Users the owner shares meal plans with.
    pub async fn plan_share(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT shared_with FROM preference_plan_shares
             WHERE owner_id = $1
             ORDER BY shared_with",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Insert or update the preference row and replace the plan share set,
    /// in one transaction.
    pub async fn save(
        pool: &PgPool,
        user_id: DbId,
        dto: &UpsertPreference,
        plan_share: &[DbId],
    ) -> Result<UserPreference, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO user_preferences \
                 (user_id, theme, nav_color, default_unit, default_page, search_style, \
                  show_recent, comment_notifications) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 theme = EXCLUDED.theme, \
                 nav_color = EXCLUDED.nav_color, \
                 default_unit = EXCLUDED.default_unit, \
                 default_page = EXCLUDED.default_page, \
                 search_style = EXCLUDED.search_style, \
                 show_recent = EXCLUDED.show_recent, \
                 comment_notifications = EXCLUDED.comment_notifications \
             RETURNING {COLUMNS}"
        );
        let preference = sqlx::query_as::<_, UserPreference>(&query)
            .bind(user_id)
            .bind(&dto.theme)
            .bind(&dto.nav_color)
            .bind(&dto.default_unit)
            .bind(&dto.default_page)
            .bind(&dto.search_style)
            .bind(dto.show_recent)
            .bind(dto.comment_notifications)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM preference_plan_shares WHERE owner_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO preference_plan_shares (owner_id, shared_with) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(plan_share)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(user_id, shares = plan_share.len(), "Plan shares replaced");
        Ok(preference)
    }
}
