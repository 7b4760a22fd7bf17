//! Repository for the `meal_plans` table.

use chrono::NaiveDate;
use cookbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::meal_plan::{CreateMealPlan, MealPlan};

/// Column list for `meal_plans` joined with `recipes` as `r`.
const COLUMNS: &str = "\
    mp.id, mp.date, mp.meal_type, mp.recipe_id, r.name AS recipe_name, \
    mp.title, mp.note, mp.created_by, mp.shared_with, mp.created_at";

const FROM: &str = "meal_plans mp LEFT JOIN recipes r ON r.id = mp.recipe_id";

/// Provides access to meal plan entries.
pub struct MealPlanRepo;

impl MealPlanRepo {
    /// Insert a meal plan entry, returning it. Used for seeding.
    pub async fn create(pool: &PgPool, input: &CreateMealPlan) -> Result<MealPlan, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO meal_plans
                 (date, meal_type, recipe_id, title, note, created_by, shared_with)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(input.date)
        .bind(input.meal_type.as_str())
        .bind(input.recipe_id)
        .bind(&input.title)
        .bind(&input.note)
        .bind(input.created_by)
        .bind(input.shared_with)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find an entry by ID regardless of visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MealPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE mp.id = $1");
        sqlx::query_as::<_, MealPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Entries owned by or shared with the user between `first` and `last`
    /// inclusive, ordered by date.
    pub async fn list_visible_in_range(
        pool: &PgPool,
        user_id: DbId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<MealPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE (mp.created_by = $1 OR mp.shared_with = $1)
               AND mp.date BETWEEN $2 AND $3
             ORDER BY mp.date, mp.id"
        );
        sqlx::query_as::<_, MealPlan>(&query)
            .bind(user_id)
            .bind(first)
            .bind(last)
            .fetch_all(pool)
            .await
    }

    /// Other entries on `date` visible to the user, excluding `exclude_id`.
    pub async fn list_visible_on_date(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
        exclude_id: DbId,
    ) -> Result<Vec<MealPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE (mp.created_by = $1 OR mp.shared_with = $1)
               AND mp.date = $2
               AND mp.id <> $3
             ORDER BY mp.id"
        );
        sqlx::query_as::<_, MealPlan>(&query)
            .bind(user_id)
            .bind(date)
            .bind(exclude_id)
            .fetch_all(pool)
            .await
    }
}
